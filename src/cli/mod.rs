//! CLI argument parsing for promptsmith.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::present::View;
use crate::strategy::ReasoningStrategy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Promptsmith: turn a rough task description into a structured system prompt.
///
/// The generated prompt has six fields (role, context, instructions, few-shot
/// examples, reasoning strategy, output format) written in Simplified Chinese.
#[derive(Parser, Debug)]
#[command(name = "promptsmith")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file (default: ./promptsmith.yaml if present).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG still takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for promptsmith.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a structured prompt once and print it.
    ///
    /// If step-back prompting is selected and no answer is given, the
    /// general question is asked on stdin before anything is sent.
    Generate(GenerateArgs),

    /// Interactive session over one workflow.
    ///
    /// Set the prompt, toggle strategies, generate, switch views and copy,
    /// one line-oriented command at a time.
    #[command(alias = "repl")]
    Session,

    /// List the available reasoning strategies.
    Strategies,

    /// Write a default promptsmith.yaml.
    Init(InitArgs),
}

/// Arguments for the `generate` command.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// The raw task description.
    pub prompt: String,

    /// Reasoning strategy to embed (repeatable).
    #[arg(short = 's', long = "strategy", value_enum)]
    pub strategies: Vec<ReasoningStrategy>,

    /// Step-back answer; skips the interactive question.
    #[arg(long, value_name = "TEXT")]
    pub step_back_answer: Option<String>,

    /// How to print the result.
    #[arg(long, value_enum, default_value_t = View::Sectioned)]
    pub view: View,

    /// Also copy the canonical JSON to the clipboard.
    #[arg(long)]
    pub copy: bool,
}

/// Arguments for the `init` command.
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(long)]
    pub force: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_generate_minimal() {
        let cli = Cli::try_parse_from(["promptsmith", "generate", "写一个客服机器人"]).unwrap();
        if let Command::Generate(args) = cli.command {
            assert_eq!(args.prompt, "写一个客服机器人");
            assert!(args.strategies.is_empty());
            assert!(args.step_back_answer.is_none());
            assert_eq!(args.view, View::Sectioned);
            assert!(!args.copy);
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn parse_generate_full() {
        let cli = Cli::try_parse_from([
            "promptsmith",
            "generate",
            "summarize tickets",
            "-s",
            "cot",
            "--strategy",
            "step-back",
            "-s",
            "sc",
            "--step-back-answer",
            "good summaries are short",
            "--view",
            "json",
            "--copy",
        ])
        .unwrap();
        if let Command::Generate(args) = cli.command {
            assert_eq!(
                args.strategies,
                vec![
                    ReasoningStrategy::ChainOfThought,
                    ReasoningStrategy::StepBack,
                    ReasoningStrategy::SelfConsistency,
                ]
            );
            assert_eq!(
                args.step_back_answer.as_deref(),
                Some("good summaries are short")
            );
            assert_eq!(args.view, View::Json);
            assert!(args.copy);
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn parse_generate_rejects_unknown_strategy() {
        let result = Cli::try_parse_from(["promptsmith", "generate", "x", "-s", "tree-of-thought"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_generate_requires_prompt() {
        assert!(Cli::try_parse_from(["promptsmith", "generate"]).is_err());
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "promptsmith",
            "session",
            "--config",
            "custom.yaml",
            "--verbose",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Session));
        assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
        assert!(cli.verbose);
    }

    #[test]
    fn parse_session_alias() {
        let cli = Cli::try_parse_from(["promptsmith", "repl"]).unwrap();
        assert!(matches!(cli.command, Command::Session));
    }

    #[test]
    fn parse_strategies() {
        let cli = Cli::try_parse_from(["promptsmith", "strategies"]).unwrap();
        assert!(matches!(cli.command, Command::Strategies));
    }

    #[test]
    fn parse_init_force() {
        let cli = Cli::try_parse_from(["promptsmith", "init", "--force"]).unwrap();
        if let Command::Init(args) = cli.command {
            assert!(args.force);
        } else {
            panic!("Expected Init command");
        }
    }
}
