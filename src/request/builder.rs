//! Generation request construction.
//!
//! A [`GenerationRequest`] bundles the three inputs of one generation. The
//! [`RequestBuilder`] turns it into instruction text by rendering a template.
//! Building is pure: the same request always yields the same text.

use super::template::Template;
use crate::config::Config;
use crate::error::{PromptsmithError, Result};
use crate::logging::preview;
use crate::strategy::StrategySelection;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Placeholders a custom template must reference.
pub const REQUIRED_PLACEHOLDERS: [&str; 3] = ["raw_prompt", "strategies", "language_directive"];

/// Optional placeholder for the step-back directive.
pub const STEP_BACK_PLACEHOLDER: &str = "step_back";

/// Output-language directive. All six result fields must be Simplified Chinese.
pub const LANGUAGE_DIRECTIVE: &str = "IMPORTANT:\n\
The content of all generated fields must be in Simplified Chinese (简体中文).\n\
Even if the input prompt is in English, translate and adapt the structured output into Chinese.";

/// Built-in instruction template.
pub const DEFAULT_TEMPLATE: &str = r#"You are an expert Prompt Engineer and System Architect.
Your task is to take a raw, unstructured user intent and transform it into a high-quality, structured, production-ready system prompt.

Input Raw Prompt: "{raw_prompt}"

Selected Reasoning Strategies to Embed: {strategies}
{step_back}
Please restructure this into the following specific sections:
1. System & Role: Define the persona.
2. Context & Variables: Define the background and variables like {{var_name}}.
3. Instructions & Constraints: Clear steps and negative constraints.
4. Few-Shot Examples: Provide 1-2 realistic examples.
5. Reasoning Strategy: Embed the specific logic for {strategies}.
6. Output Format: Define the JSON schema for the output.

Respond with a single JSON object containing exactly the fields system_role, context_variables, instructions_constraints, few_shot_examples, reasoning_strategy and output_format, each a string.

{language_directive}

Ensure the tone is professional and the instructions are precise.
"#;

/// Inputs for one generation.
///
/// Cannot be constructed with an empty or whitespace-only raw prompt, nor
/// with a blank step-back answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    raw_prompt: String,
    strategies: StrategySelection,
    step_back_answer: Option<String>,
}

impl GenerationRequest {
    pub fn new(
        raw_prompt: impl Into<String>,
        strategies: StrategySelection,
        step_back_answer: Option<String>,
    ) -> Result<Self> {
        let raw_prompt = raw_prompt.into();
        validate_prompt(&raw_prompt)?;
        if let Some(answer) = &step_back_answer {
            validate_step_back_answer(answer)?;
        }
        Ok(Self {
            raw_prompt,
            strategies,
            step_back_answer,
        })
    }

    /// The raw prompt exactly as entered.
    pub fn raw_prompt(&self) -> &str {
        &self.raw_prompt
    }

    pub fn strategies(&self) -> &StrategySelection {
        &self.strategies
    }

    pub fn step_back_answer(&self) -> Option<&str> {
        self.step_back_answer.as_deref()
    }
}

/// Reject empty or whitespace-only raw prompts.
pub fn validate_prompt(raw_prompt: &str) -> Result<()> {
    if raw_prompt.trim().is_empty() {
        return Err(PromptsmithError::ValidationError(
            "the prompt is empty; describe the task you want a prompt for".to_string(),
        ));
    }
    Ok(())
}

/// Reject empty or whitespace-only step-back answers.
pub fn validate_step_back_answer(answer: &str) -> Result<()> {
    if answer.trim().is_empty() {
        return Err(PromptsmithError::ValidationError(
            "the step-back answer is empty; answer the general question or cancel".to_string(),
        ));
    }
    Ok(())
}

/// Directive grounding the output in the user's step-back answer.
pub fn step_back_directive(answer: &str) -> String {
    format!(
        "\nThe user has performed a \"Step-back Prompting\" exercise.\n\
         Here is the General/Macro Knowledge provided by the user to ground the prompt:\n\
         \"{}\"\n\n\
         Please incorporate this high-level knowledge into the generated prompt, \
         grounding the reasoning_strategy and instructions_constraints fields in it.\n",
        answer
    )
}

fn placeholder_list(names: &[&str]) -> String {
    names
        .iter()
        .map(|name| format!("{{{}}}", name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders generation requests into instruction text.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    template: Template,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self {
            template: Template::parse(DEFAULT_TEMPLATE).expect("Invalid built-in template"),
        }
    }
}

impl RequestBuilder {
    /// Builder with a custom template.
    ///
    /// The template must reference every placeholder in [`REQUIRED_PLACEHOLDERS`]
    /// and nothing besides those and [`STEP_BACK_PLACEHOLDER`].
    pub fn with_template(source: &str) -> Result<Self> {
        let template = Template::parse(source).map_err(|e| {
            PromptsmithError::UserError(format!("invalid prompt template: {}", e))
        })?;

        let missing: Vec<&str> = REQUIRED_PLACEHOLDERS
            .iter()
            .copied()
            .filter(|name| !template.references(name))
            .collect();
        if !missing.is_empty() {
            return Err(PromptsmithError::UserError(format!(
                "invalid prompt template: missing required placeholder(s) {}",
                placeholder_list(&missing)
            )));
        }

        let unknown: Vec<&str> = template
            .placeholders()
            .into_iter()
            .filter(|name| !REQUIRED_PLACEHOLDERS.contains(name) && *name != STEP_BACK_PLACEHOLDER)
            .collect();
        if !unknown.is_empty() {
            return Err(PromptsmithError::UserError(format!(
                "invalid prompt template: unknown placeholder(s) {}",
                placeholder_list(&unknown)
            )));
        }

        Ok(Self { template })
    }

    /// Builder for the configured template, or the built-in one.
    pub fn from_config(config: &Config) -> Result<Self> {
        match &config.prompt_template {
            Some(path) => Self::from_template_file(path),
            None => Ok(Self::default()),
        }
    }

    fn from_template_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            PromptsmithError::UserError(format!(
                "failed to read prompt template '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::with_template(&source)
    }

    /// Render the instruction text for `request`.
    pub fn build(&self, request: &GenerationRequest) -> Result<String> {
        let step_back = request
            .step_back_answer()
            .map(step_back_directive)
            .unwrap_or_default();

        let mut variables = HashMap::new();
        variables.insert("raw_prompt", request.raw_prompt().to_string());
        variables.insert("strategies", request.strategies().clause());
        variables.insert("language_directive", LANGUAGE_DIRECTIVE.to_string());
        variables.insert(STEP_BACK_PLACEHOLDER, step_back.clone());

        let mut text = self.template.render(&variables).map_err(|e| {
            PromptsmithError::UserError(format!("failed to render prompt template: {}", e))
        })?;

        // Custom templates may leave the step-back slot out; the directive
        // still has to reach the generator.
        if !step_back.is_empty() && !self.template.references(STEP_BACK_PLACEHOLDER) {
            text.push_str(&step_back);
        }

        debug!(
            prompt = %preview(request.raw_prompt()),
            chars = text.chars().count(),
            strategies = %request.strategies().clause(),
            step_back = request.step_back_answer().is_some(),
            "built generation instruction"
        );
        Ok(text)
    }
}
