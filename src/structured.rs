//! The six-field structured prompt returned by the generator.
//!
//! Parsing is strict: every field must be present and be a string. A payload
//! missing any field is rejected as a whole; nothing is ever defaulted.

use crate::generator::GeneratorError;
use serde::{Deserialize, Serialize};

/// Field names in canonical order. Serialization follows this order.
pub const FIELD_NAMES: [&str; 6] = [
    "system_role",
    "context_variables",
    "instructions_constraints",
    "few_shot_examples",
    "reasoning_strategy",
    "output_format",
];

/// A schema-conformant prompt specification.
///
/// Field declaration order is the canonical JSON property order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredPrompt {
    /// Who the model is, its persona and core objectives.
    pub system_role: String,
    /// Background information and `{variable}` placeholders.
    pub context_variables: String,
    /// Steps to take and negative constraints.
    pub instructions_constraints: String,
    /// Input/output examples.
    pub few_shot_examples: String,
    /// The thinking process the model should follow.
    pub reasoning_strategy: String,
    /// Required format of the final response.
    pub output_format: String,
}

impl StructuredPrompt {
    /// Parse a raw generator payload.
    ///
    /// Empty or whitespace-only payloads, invalid JSON, non-string values and
    /// missing fields all yield [`GeneratorError::EmptyOrMalformedResponse`].
    pub fn from_payload(payload: &str) -> Result<Self, GeneratorError> {
        if payload.trim().is_empty() {
            return Err(GeneratorError::EmptyOrMalformedResponse(
                "empty response from model".to_string(),
            ));
        }

        serde_json::from_str(payload).map_err(|e| {
            GeneratorError::EmptyOrMalformedResponse(format!(
                "response does not match the structured prompt schema: {}",
                e
            ))
        })
    }

    /// Look up a field by its schema name.
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "system_role" => &self.system_role,
            "context_variables" => &self.context_variables,
            "instructions_constraints" => &self.instructions_constraints,
            "few_shot_examples" => &self.few_shot_examples,
            "reasoning_strategy" => &self.reasoning_strategy,
            "output_format" => &self.output_format,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// All fields as `(name, value)` pairs in canonical order.
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            (FIELD_NAMES[0], self.system_role.as_str()),
            (FIELD_NAMES[1], self.context_variables.as_str()),
            (FIELD_NAMES[2], self.instructions_constraints.as_str()),
            (FIELD_NAMES[3], self.few_shot_examples.as_str()),
            (FIELD_NAMES[4], self.reasoning_strategy.as_str()),
            (FIELD_NAMES[5], self.output_format.as_str()),
        ]
    }
}
