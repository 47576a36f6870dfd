//! Canonical and spaced JSON renderings.

use super::serialization_error;
use crate::error::Result;
use crate::structured::StructuredPrompt;
use regex::Regex;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::sync::LazyLock;

const INDENT: &[u8] = b"    ";

/// Start of a line holding a top-level property key.
static TOP_LEVEL_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^    ""#).expect("Invalid top-level key regex"));

/// The prompt as 4-space-indented JSON in canonical field order.
///
/// This is the exact text placed on the clipboard.
pub fn canonical_json(prompt: &StructuredPrompt) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    prompt
        .serialize(&mut serializer)
        .map_err(serialization_error)?;
    String::from_utf8(buf).map_err(serialization_error)
}

/// Display-only JSON: the canonical text with one extra blank line before
/// every top-level key.
pub fn spaced_json(prompt: &StructuredPrompt) -> Result<String> {
    let canonical = canonical_json(prompt)?;
    Ok(TOP_LEVEL_KEY.replace_all(&canonical, "\n$0").into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structured::FIELD_NAMES;
    use crate::structured::fixtures::sample_prompt;

    fn key_positions(text: &str) -> Vec<usize> {
        FIELD_NAMES
            .iter()
            .map(|name| text.find(&format!("\"{}\"", name)).unwrap())
            .collect()
    }

    #[test]
    fn canonical_uses_four_space_indent_and_declaration_order() {
        let text = canonical_json(&sample_prompt()).unwrap();

        assert!(text.starts_with("{\n    \"system_role\": "));
        assert!(text.ends_with("\n}"));
        let positions = key_positions(&text);
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{text}");
    }

    #[test]
    fn canonical_reparses_to_equal_prompt() {
        let prompt = sample_prompt();
        let text = canonical_json(&prompt).unwrap();
        assert_eq!(serde_json::from_str::<StructuredPrompt>(&text).unwrap(), prompt);
    }

    #[test]
    fn canonical_keeps_non_ascii_unescaped() {
        let text = canonical_json(&sample_prompt()).unwrap();
        assert!(text.contains("让我们一步一步地思考。"));
    }

    #[test]
    fn spaced_inserts_one_blank_line_before_each_top_level_key() {
        let prompt = sample_prompt();
        let canonical = canonical_json(&prompt).unwrap();
        let spaced = spaced_json(&prompt).unwrap();

        for name in FIELD_NAMES {
            assert!(spaced.contains(&format!("\n\n    \"{}\":", name)), "{name}");
            assert!(!spaced.contains(&format!("\n\n\n    \"{}\":", name)), "{name}");
        }
        assert_eq!(spaced.lines().count(), canonical.lines().count() + 6);
        assert_eq!(spaced.replace("\n\n", "\n"), canonical);
    }

    #[test]
    fn spaced_reparses_to_equal_prompt_in_same_order() {
        let prompt = sample_prompt();
        let spaced = spaced_json(&prompt).unwrap();

        let reparsed: serde_json::Value = serde_json::from_str(&spaced).unwrap();
        let keys: Vec<&str> = reparsed
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        let mut sorted = FIELD_NAMES.to_vec();
        sorted.sort();
        // serde_json's default map is ordered by key; compare sets here and
        // the textual order via key positions.
        assert_eq!(keys, sorted);
        let positions = key_positions(&spaced);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert_eq!(serde_json::from_str::<StructuredPrompt>(&spaced).unwrap(), prompt);
    }

    #[test]
    fn embedded_newlines_in_values_are_not_spaced() {
        let mut prompt = sample_prompt();
        prompt.context_variables = "line one\n    \"quoted\" line".to_string();
        let spaced = spaced_json(&prompt).unwrap();

        // The value's newline is escaped inside the JSON string, so only the
        // six top-level keys gain a blank line.
        assert_eq!(spaced.matches("\n\n").count(), 6);
        assert_eq!(serde_json::from_str::<StructuredPrompt>(&spaced).unwrap(), prompt);
    }
}
