//! In-memory clipboard for tests.

use super::Clipboard;
use crate::error::{PromptsmithError, Result};
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub(crate) struct RecordingClipboard {
    fail: bool,
    writes: Mutex<Vec<String>>,
}

impl RecordingClipboard {
    /// Clipboard that rejects every write.
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clipboard for RecordingClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        if self.fail {
            return Err(PromptsmithError::ClipboardError("denied".to_string()));
        }
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
