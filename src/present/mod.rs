//! Result presentation: sectioned view, JSON views, and the clipboard export.
//!
//! Every rendering is computed from the stored [`StructuredPrompt`] on demand,
//! so the views can never go stale relative to each other.
//!
//! [`StructuredPrompt`]: crate::structured::StructuredPrompt

mod copy;
mod json;
mod sectioned;

#[cfg(test)]
pub(crate) mod fake;

pub use copy::{COPY_ACK_WINDOW, Clipboard, CommandClipboard, CopyAck, copy_export};
pub use json::{canonical_json, spaced_json};
pub use sectioned::{SECTIONS, Section, render_sectioned};

use crate::error::{PromptsmithError, Result};
use crate::structured::StructuredPrompt;
use clap::ValueEnum;

/// Which rendering to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum View {
    /// Numbered sections with titles and descriptions.
    #[default]
    Sectioned,
    /// 4-space JSON with a blank line before each top-level key.
    Json,
    /// Unmodified 4-space JSON, identical to the copy export.
    Canonical,
}

impl View {
    pub fn parse(name: &str) -> Option<Self> {
        <View as ValueEnum>::from_str(name.trim(), true).ok()
    }
}

/// Render `prompt` in the requested view.
pub fn render(prompt: &StructuredPrompt, view: View) -> Result<String> {
    match view {
        View::Sectioned => Ok(render_sectioned(prompt)),
        View::Json => spaced_json(prompt),
        View::Canonical => canonical_json(prompt),
    }
}

fn serialization_error(e: impl std::fmt::Display) -> PromptsmithError {
    PromptsmithError::UserError(format!("failed to serialize structured prompt: {}", e))
}
