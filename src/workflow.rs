//! Generation workflow state machine.
//!
//! One [`Workflow`] value owns the raw prompt, the strategy selection, the
//! current [`WorkflowState`], and the last successful result. Every operation
//! is an explicit transition; an operation the current state does not accept
//! is rejected with [`PromptsmithError::InvalidTransition`] and changes nothing.
//!
//! ```text
//!   idle/succeeded/failed --trigger--> generating          (step-back not selected)
//!   idle/succeeded/failed --trigger--> awaiting_step_back  (step-back selected)
//!   awaiting_step_back --confirm(answer)--> generating
//!   awaiting_step_back --cancel--> idle
//!   generating --complete(Ok)--> succeeded
//!   generating --complete(Err)--> failed
//!   generating --complete(Err before the call)--> state before trigger
//! ```

use crate::error::{PromptsmithError, Result};
use crate::generator::GeneratorClient;
use crate::request::{GenerationRequest, validate_prompt, validate_step_back_answer};
use crate::strategy::{ReasoningStrategy, StrategySelection};
use crate::structured::StructuredPrompt;
use std::fmt;
use tracing::{debug, warn};


/// The single active state of a workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    AwaitingStepBack,
    Generating,
    Succeeded(StructuredPrompt),
    /// Carries the user-facing failure message.
    Failed(String),
}

impl WorkflowState {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::AwaitingStepBack => "awaiting step-back answer",
            WorkflowState::Generating => "generating",
            WorkflowState::Succeeded(_) => "succeeded",
            WorkflowState::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowState::Failed(message) => write!(f, "failed: {}", message),
            other => f.write_str(other.name()),
        }
    }
}

/// Outcome of [`Workflow::trigger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// The workflow is now generating; issue this request.
    Generate(GenerationRequest),
    /// A step-back answer must be confirmed (or the trigger cancelled).
    AwaitStepBack,
}

/// The owned state of one prompt-generation workflow.
#[derive(Debug, Clone)]
pub struct Workflow {
    raw_prompt: String,
    strategies: StrategySelection,
    state: WorkflowState,
    /// Last successful result while the state is not `Succeeded`.
    previous: Option<StructuredPrompt>,
    /// State the pending generation was triggered from.
    resume: Option<WorkflowState>,
}

impl Default for Workflow {
    fn default() -> Self {
        Self {
            raw_prompt: String::new(),
            strategies: StrategySelection::new(),
            state: WorkflowState::Idle,
            previous: None,
            resume: None,
        }
    }
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// A workflow with prompt text and strategies already set.
    pub fn with_input(raw_prompt: impl Into<String>, strategies: StrategySelection) -> Self {
        Self {
            raw_prompt: raw_prompt.into(),
            strategies,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn raw_prompt(&self) -> &str {
        &self.raw_prompt
    }

    pub fn strategies(&self) -> &StrategySelection {
        &self.strategies
    }

    /// Whether a generation call is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self.state, WorkflowState::Generating)
    }

    /// Whether triggering a generation would currently be accepted.
    pub fn can_trigger(&self) -> bool {
        matches!(
            self.state,
            WorkflowState::Idle | WorkflowState::Succeeded(_) | WorkflowState::Failed(_)
        ) && !self.raw_prompt.trim().is_empty()
    }

    /// The current result: the new one on success, otherwise the last success.
    pub fn result(&self) -> Option<&StructuredPrompt> {
        match &self.state {
            WorkflowState::Succeeded(prompt) => Some(prompt),
            _ => self.previous.as_ref(),
        }
    }

    /// Replace the raw prompt text.
    pub fn set_prompt(&mut self, text: impl Into<String>) -> Result<()> {
        self.reject_if(
            matches!(self.state, WorkflowState::Generating),
            "edit the prompt",
        )?;
        self.raw_prompt = text.into();
        Ok(())
    }

    /// Flip membership of `strategy`. Returns whether it is selected afterwards.
    ///
    /// Rejected while a step-back answer is being collected: the pending
    /// generation was started for the selection as it stood.
    pub fn toggle(&mut self, strategy: ReasoningStrategy) -> Result<bool> {
        self.reject_if(
            matches!(self.state, WorkflowState::AwaitingStepBack),
            "change strategies",
        )?;
        let selected = self.strategies.toggle(strategy);
        debug!(strategy = %strategy, selected, "toggled strategy");
        Ok(selected)
    }

    /// Start a generation.
    ///
    /// An empty prompt is a validation error and leaves the state untouched.
    pub fn trigger(&mut self) -> Result<Trigger> {
        self.reject_if(
            matches!(
                self.state,
                WorkflowState::Generating | WorkflowState::AwaitingStepBack
            ),
            "start a generation",
        )?;
        validate_prompt(&self.raw_prompt)?;
        let resume = self.state.clone();

        if self.strategies.contains(ReasoningStrategy::StepBack) {
            self.transition(WorkflowState::AwaitingStepBack);
            self.resume = Some(resume);
            return Ok(Trigger::AwaitStepBack);
        }

        let request = GenerationRequest::new(self.raw_prompt.clone(), self.strategies.clone(), None)?;
        self.transition(WorkflowState::Generating);
        self.resume = Some(resume);
        Ok(Trigger::Generate(request))
    }

    /// Confirm the step-back answer and start generating with it.
    ///
    /// A blank answer is a validation error and leaves the state untouched.
    pub fn confirm(&mut self, answer: &str) -> Result<GenerationRequest> {
        self.reject_if(
            !matches!(self.state, WorkflowState::AwaitingStepBack),
            "confirm a step-back answer",
        )?;
        validate_step_back_answer(answer)?;

        let request = GenerationRequest::new(
            self.raw_prompt.clone(),
            self.strategies.clone(),
            Some(answer.to_string()),
        )?;
        self.transition(WorkflowState::Generating);
        Ok(request)
    }

    /// Abandon the pending generation. No call is issued.
    pub fn cancel(&mut self) -> Result<()> {
        self.reject_if(
            !matches!(self.state, WorkflowState::AwaitingStepBack),
            "cancel",
        )?;
        self.resume = None;
        self.transition(WorkflowState::Idle);
        Ok(())
    }

    /// Record the outcome of the in-flight generation.
    ///
    /// A failure keeps the last successful result available via [`result`].
    /// An error raised before the call was issued is not a failed generation:
    /// the workflow returns to the state it was triggered from.
    ///
    /// [`result`]: Workflow::result
    pub fn complete(&mut self, outcome: Result<StructuredPrompt>) -> Result<()> {
        self.reject_if(
            !matches!(self.state, WorkflowState::Generating),
            "complete a generation",
        )?;

        match outcome {
            Ok(prompt) => {
                self.resume = None;
                self.previous = None;
                self.transition(WorkflowState::Succeeded(prompt));
            }
            Err(err) => self.settle_error(&err),
        }
        Ok(())
    }

    /// Issue `request` through `client` and record the outcome.
    ///
    /// The workflow must be `Generating` (as left by [`trigger`] or
    /// [`confirm`]). The `&mut` borrow is held for the whole call, so no
    /// second generation can start while this one is in flight. Errors are
    /// returned after being settled the same way [`complete`] settles them.
    ///
    /// [`trigger`]: Workflow::trigger
    /// [`confirm`]: Workflow::confirm
    /// [`complete`]: Workflow::complete
    pub async fn run(&mut self, client: &GeneratorClient, request: &GenerationRequest) -> Result<()> {
        self.reject_if(!self.is_busy(), "run a generation")?;

        match client.generate(request).await {
            Ok(prompt) => self.complete(Ok(prompt)),
            Err(err) => {
                self.settle_error(&err);
                Err(err)
            }
        }
    }

    fn settle_error(&mut self, err: &PromptsmithError) {
        if err.is_generation_failure() {
            warn!(error = %err.detail(), "generation failed");
            self.resume = None;
            self.transition(WorkflowState::Failed(err.to_string()));
            return;
        }

        warn!(error = %err, "generation abandoned before the call");
        let resumed = self.resume.take().unwrap_or(WorkflowState::Idle);
        debug!(from = self.state.name(), to = resumed.name(), "workflow restored");
        if matches!(resumed, WorkflowState::Succeeded(_)) {
            self.previous = None;
        }
        self.state = resumed;
    }

    fn reject_if(&self, rejected: bool, operation: &'static str) -> Result<()> {
        if rejected {
            return Err(PromptsmithError::InvalidTransition {
                from: self.state.name(),
                operation,
            });
        }
        Ok(())
    }

    fn transition(&mut self, next: WorkflowState) {
        debug!(from = self.state.name(), to = next.name(), "workflow transition");
        let old = std::mem::replace(&mut self.state, next);
        if let WorkflowState::Succeeded(prompt) = old {
            self.previous = Some(prompt);
        }
    }
}
