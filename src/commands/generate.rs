//! Implementation of the `promptsmith generate` command.
//!
//! Runs one workflow from start to finish: trigger, optional step-back
//! question on stdin, one generation call, render, optional copy.

use super::{input_error, output_error};
use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::generator::GeneratorClient;
use crate::present::{Clipboard, CommandClipboard, CopyAck, copy_export, render};
use crate::request::validate_step_back_answer;
use crate::strategy::{ReasoningStrategy, StrategySelection};
use crate::workflow::{Trigger, Workflow};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::warn;

/// Input line that abandons the step-back question.
pub(crate) const CANCEL_INPUT: &str = ":cancel";

/// The general question shown before collecting a step-back answer.
pub(crate) const STEP_BACK_QUESTION: &str = "后退一步 (Step-back): 请回答一个通用/宏观问题以激活相关知识\n\
     例如：客户服务的核心原则是什么？";

/// Shown while the generation call is in flight.
pub(crate) const BUSY_MESSAGE: &str = "正在优化 (Optimizing)...";

/// Execute the `promptsmith generate` command.
pub async fn cmd_generate(args: GenerateArgs, config: Config) -> Result<()> {
    let client = GeneratorClient::from_config(&config)?;
    let clipboard = CommandClipboard::from_config(&config)?;
    let mut input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();

    run_generate(&args, &client, &clipboard, &mut input, &mut out).await
}

/// Drive one generation with explicit streams.
///
/// Prompts and status go to stderr; only the rendered result goes to `out`.
pub(crate) async fn run_generate<R, W>(
    args: &GenerateArgs,
    client: &GeneratorClient,
    clipboard: &dyn Clipboard,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let strategies: StrategySelection = args.strategies.iter().copied().collect();
    if args.step_back_answer.is_some() && !strategies.contains(ReasoningStrategy::StepBack) {
        warn!("--step-back-answer ignored: step-back strategy not selected");
    }

    let mut workflow = Workflow::with_input(args.prompt.clone(), strategies);

    let request = match workflow.trigger()? {
        Trigger::Generate(request) => request,
        Trigger::AwaitStepBack => {
            let answer = match &args.step_back_answer {
                Some(answer) => Some(answer.clone()),
                None => ask_step_back(input).await?,
            };
            match answer {
                Some(answer) => workflow.confirm(&answer)?,
                None => {
                    workflow.cancel()?;
                    eprintln!("已取消 (Cancelled): nothing was sent.");
                    return Ok(());
                }
            }
        }
    };

    eprintln!("{}", BUSY_MESSAGE);
    workflow.run(client, &request).await?;

    let Some(prompt) = workflow.result() else {
        return Ok(());
    };
    writeln!(out, "{}", render(prompt, args.view)?).map_err(output_error)?;

    if args.copy {
        copy_export(clipboard, prompt, &mut CopyAck::new()).await?;
        eprintln!("Copied!");
    }
    Ok(())
}

/// Ask the step-back question until a non-blank answer is given.
///
/// Returns `None` on end of input or when the user types [`CANCEL_INPUT`].
pub(crate) async fn ask_step_back<R>(input: &mut R) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    eprintln!("{}", STEP_BACK_QUESTION);
    eprintln!("(Enter an answer, or {} to cancel.)", CANCEL_INPUT);

    loop {
        eprint!("> ");
        let mut line = String::new();
        let read = input.read_line(&mut line).await.map_err(input_error)?;
        if read == 0 {
            return Ok(None);
        }

        let answer = line.trim_end_matches(['\r', '\n']);
        if answer.trim() == CANCEL_INPUT {
            return Ok(None);
        }
        if let Err(err) = validate_step_back_answer(answer) {
            eprintln!("{}", err);
            continue;
        }
        return Ok(Some(answer.to_string()));
    }
}
