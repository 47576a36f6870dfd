//! Promptsmith: turn a rough task description into a structured system prompt.
//!
//! This is the main entry point for the `promptsmith` CLI. It parses
//! arguments, loads config, sets up logging, dispatches to the appropriate
//! command handler, and handles errors with proper exit codes.

mod cli;
mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod generator;
pub mod logging;
pub mod present;
pub mod request;
pub mod strategy;
pub mod structured;
pub mod workflow;

#[cfg(test)]
mod test_support;

use cli::Cli;
use config::Config;
use std::process::ExitCode;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let config = Config::resolve(cli.config.as_deref());
    logging::init(
        config.as_ref().ok().map(|c| c.log_level.as_str()),
        cli.verbose,
    );

    match commands::dispatch(cli, config).await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            error!(error = %err.detail(), "command failed");

            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
