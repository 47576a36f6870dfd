//! Implementation of the `promptsmith session` command.
//!
//! A line-oriented loop over one owned [`Workflow`]. Each input line is one
//! command; a failed command prints its error and the loop continues.

use super::generate::{BUSY_MESSAGE, STEP_BACK_QUESTION};
use super::strategies::write_strategies;
use super::{input_error, output_error};
use crate::config::Config;
use crate::error::{PromptsmithError, Result};
use crate::generator::GeneratorClient;
use crate::present::{Clipboard, CommandClipboard, CopyAck, View, copy_export, render};
use crate::request::GenerationRequest;
use crate::strategy::ReasoningStrategy;
use crate::workflow::{Trigger, Workflow};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

const HELP: &str = "\
Commands:
  prompt <text>        set the raw prompt
  toggle <strategy>    select/deselect cot, step-back or self-consistency
  strategies           list strategies and the current selection
  generate             generate a structured prompt
  answer <text>        answer the step-back question and generate
  cancel               abandon the pending step-back question
  show [view]          show the result (sectioned, json or canonical)
  copy                 copy the canonical JSON to the clipboard
  state                show the workflow state
  help                 show this help
  quit                 leave the session";

/// One parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SessionCommand {
    Prompt(String),
    Toggle(ReasoningStrategy),
    Strategies,
    Generate,
    Answer(String),
    Cancel,
    Show(View),
    Copy,
    State,
    Help,
    Quit,
    Empty,
}

impl SessionCommand {
    /// Parse one input line.
    pub(crate) fn parse(line: &str) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        let (word, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest),
            None => (trimmed, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "" => SessionCommand::Empty,
            "prompt" => SessionCommand::Prompt(rest.to_string()),
            "toggle" => {
                let strategy = ReasoningStrategy::parse(rest).ok_or_else(|| {
                    PromptsmithError::UserError(format!(
                        "unknown strategy '{}'; expected cot, step-back or self-consistency",
                        rest.trim()
                    ))
                })?;
                SessionCommand::Toggle(strategy)
            }
            "strategies" => SessionCommand::Strategies,
            "generate" | "go" => SessionCommand::Generate,
            "answer" => SessionCommand::Answer(rest.to_string()),
            "cancel" => SessionCommand::Cancel,
            "show" => {
                let view = if rest.trim().is_empty() {
                    View::Sectioned
                } else {
                    View::parse(rest).ok_or_else(|| {
                        PromptsmithError::UserError(format!(
                            "unknown view '{}'; expected sectioned, json or canonical",
                            rest.trim()
                        ))
                    })?
                };
                SessionCommand::Show(view)
            }
            "copy" => SessionCommand::Copy,
            "state" => SessionCommand::State,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" => SessionCommand::Quit,
            other => {
                return Err(PromptsmithError::UserError(format!(
                    "unknown command '{}'; type 'help' for a list",
                    other
                )));
            }
        };
        Ok(command)
    }
}

/// Execute the `promptsmith session` command.
pub async fn cmd_session(config: Config) -> Result<()> {
    let client = GeneratorClient::from_config(&config)?;
    let clipboard = CommandClipboard::from_config(&config)?;
    let mut input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();

    run_session(&client, &clipboard, &mut input, &mut out).await
}

/// The session loop with explicit streams. Ends on `quit` or end of input.
pub(crate) async fn run_session<R, W>(
    client: &GeneratorClient,
    clipboard: &dyn Clipboard,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut session = Session {
        workflow: Workflow::new(),
        ack: CopyAck::new(),
        client,
        clipboard,
    };

    writeln!(out, "promptsmith session; type 'help' for commands").map_err(output_error)?;
    loop {
        write!(out, "> ").map_err(output_error)?;
        out.flush().map_err(output_error)?;

        let mut line = String::new();
        if input.read_line(&mut line).await.map_err(input_error)? == 0 {
            writeln!(out).map_err(output_error)?;
            return Ok(());
        }

        let outcome = match SessionCommand::parse(&line) {
            Ok(SessionCommand::Quit) => return Ok(()),
            Ok(command) => session.execute(command, out).await,
            Err(err) => Err(err),
        };
        if let Err(err) = outcome {
            debug!(error = %err.detail(), "session command failed");
            writeln!(out, "Error: {}", err).map_err(output_error)?;
        }
    }
}

struct Session<'a> {
    workflow: Workflow,
    ack: CopyAck,
    client: &'a GeneratorClient,
    clipboard: &'a dyn Clipboard,
}

impl Session<'_> {
    async fn execute<W: Write>(&mut self, command: SessionCommand, out: &mut W) -> Result<()> {
        match command {
            SessionCommand::Empty | SessionCommand::Quit => Ok(()),
            SessionCommand::Prompt(text) => self.workflow.set_prompt(text),
            SessionCommand::Toggle(strategy) => {
                let selected = self.workflow.toggle(strategy)?;
                let mark = if selected { "[x]" } else { "[ ]" };
                writeln!(out, "{} {}", mark, strategy.display_name()).map_err(output_error)
            }
            SessionCommand::Strategies => write_strategies(out, self.workflow.strategies(), true),
            SessionCommand::Generate => match self.workflow.trigger()? {
                Trigger::Generate(request) => self.generate(&request, out).await,
                Trigger::AwaitStepBack => writeln!(
                    out,
                    "{}\nReply with 'answer <text>' or 'cancel'.",
                    STEP_BACK_QUESTION
                )
                .map_err(output_error),
            },
            SessionCommand::Answer(text) => {
                let request = self.workflow.confirm(&text)?;
                self.generate(&request, out).await
            }
            SessionCommand::Cancel => {
                self.workflow.cancel()?;
                writeln!(out, "已取消 (Cancelled)").map_err(output_error)
            }
            SessionCommand::Show(view) => match self.workflow.result() {
                Some(prompt) => writeln!(out, "{}", render(prompt, view)?).map_err(output_error),
                None => writeln!(out, "No result yet; run 'generate' first.").map_err(output_error),
            },
            SessionCommand::Copy => {
                let prompt = self.workflow.result().ok_or_else(|| {
                    PromptsmithError::UserError("nothing to copy yet".to_string())
                })?;
                copy_export(self.clipboard, prompt, &mut self.ack).await?;
                writeln!(out, "Copied!").map_err(output_error)
            }
            SessionCommand::State => self.write_state(out),
            SessionCommand::Help => writeln!(out, "{}", HELP).map_err(output_error),
        }
    }

    async fn generate<W: Write>(&mut self, request: &GenerationRequest, out: &mut W) -> Result<()> {
        writeln!(out, "{}", BUSY_MESSAGE).map_err(output_error)?;
        out.flush().map_err(output_error)?;

        self.workflow.run(self.client, request).await?;
        if let Some(prompt) = self.workflow.result() {
            writeln!(out, "{}", render(prompt, View::Sectioned)?).map_err(output_error)?;
        }
        Ok(())
    }

    fn write_state<W: Write>(&self, out: &mut W) -> Result<()> {
        let prompt = self.workflow.raw_prompt();
        writeln!(out, "state:      {}", self.workflow.state())
            .and_then(|()| {
                writeln!(
                    out,
                    "prompt:     {}",
                    if prompt.is_empty() { "(empty)" } else { prompt }
                )
            })
            .and_then(|()| writeln!(out, "strategies: {}", self.workflow.strategies().clause()))
            .and_then(|()| {
                writeln!(
                    out,
                    "ready:      {}",
                    if self.workflow.can_trigger() { "yes" } else { "no" }
                )
            })
            .and_then(|()| {
                writeln!(
                    out,
                    "result:     {}",
                    if self.workflow.result().is_some() { "available" } else { "none" }
                )
            })
            .and_then(|()| {
                if self.ack.is_visible() {
                    writeln!(out, "clipboard:  copied")
                } else {
                    Ok(())
                }
            })
            .map_err(output_error)
    }
}
