//! Command implementations for promptsmith.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Handlers that talk to the user take their input and
//! output streams as parameters so they can be driven from tests.

mod generate;
mod init;
mod session;
mod strategies;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::error::{PromptsmithError, Result};

/// Dispatch a command to its implementation.
///
/// `config` is the already-resolved configuration; commands that do not
/// need it (`init`, `strategies`) run even when it failed to load.
pub async fn dispatch(cli: Cli, config: Result<Config>) -> Result<()> {
    match cli.command {
        Command::Generate(args) => generate::cmd_generate(args, config?).await,
        Command::Session => session::cmd_session(config?).await,
        Command::Strategies => strategies::cmd_strategies(),
        Command::Init(args) => init::cmd_init(cli.config.as_deref(), args),
    }
}

/// Map a failed write to the user's terminal.
pub(crate) fn output_error(e: std::io::Error) -> PromptsmithError {
    PromptsmithError::UserError(format!("failed to write output: {}", e))
}

/// Map a failed read from the user's terminal.
pub(crate) fn input_error(e: std::io::Error) -> PromptsmithError {
    PromptsmithError::UserError(format!("failed to read input: {}", e))
}
