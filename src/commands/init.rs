//! Implementation of the `promptsmith init` command.
//!
//! Writes a default config file. An existing file is only replaced with
//! `--force`.

use crate::cli::InitArgs;
use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::error::{PromptsmithError, Result};
use crate::fs::atomic_write_file;
use std::path::Path;

/// Execute the `promptsmith init` command.
pub fn cmd_init(explicit: Option<&Path>, args: InitArgs) -> Result<()> {
    let path = explicit.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
    write_default_config(path, args.force)?;

    println!("Wrote default config to {}", path.display());
    println!();
    println!("Next steps:");
    println!("  export GEMINI_API_KEY=...");
    println!("  promptsmith generate \"<describe your task>\" -s cot");
    Ok(())
}

/// Write the default config to `path`.
fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(PromptsmithError::UserError(format!(
            "config file '{}' already exists\n\
             Fix: pass --force to overwrite it.",
            path.display()
        )));
    }

    let yaml = Config::default().to_yaml()?;
    atomic_write_file(path, &yaml)
}
