//! Output schema attached to every generation call.

use crate::structured::FIELD_NAMES;
use serde_json::{Map, Value, json};

/// Description of each field, in canonical order.
const FIELD_DESCRIPTIONS: [&str; 6] = [
    "Defines who the AI is, its persona, and core objectives.",
    "Background information and dynamic variables (e.g., {variable}).",
    "Specific step-by-step actions the AI must take and negative constraints.",
    "Input/Output examples to guide the model.",
    "The specific thinking process the AI should use (e.g., Let's think step by step).",
    "The required JSON schema or format of the final response.",
];

/// Schema requiring all six structured prompt fields as strings.
///
/// Uses the generator service's OpenAPI-subset dialect (upper-case type
/// names, `propertyOrdering` for output order).
pub fn structured_prompt_schema() -> Value {
    let mut properties = Map::new();
    for (name, description) in FIELD_NAMES.iter().zip(FIELD_DESCRIPTIONS) {
        properties.insert(
            name.to_string(),
            json!({ "type": "STRING", "description": description }),
        );
    }

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": FIELD_NAMES,
        "propertyOrdering": FIELD_NAMES,
    })
}
