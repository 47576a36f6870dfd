//! Clipboard export of the canonical JSON and the "copied" acknowledgment.

use super::json::canonical_json;
use crate::config::Config;
use crate::error::{PromptsmithError, Result};
use crate::structured::StructuredPrompt;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::Instant;
use tracing::{debug, warn};

/// How long the acknowledgment stays visible after a successful copy.
pub const COPY_ACK_WINDOW: Duration = Duration::from_secs(2);

/// The system clipboard.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<()>;
}

/// Clipboard backed by an external command that reads the text on stdin.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    /// Parse a command line such as `xclip -selection clipboard`.
    pub fn new(command_line: &str) -> Result<Self> {
        let mut words = shell_words::split(command_line).map_err(|e| {
            PromptsmithError::UserError(format!(
                "failed to parse clipboard command '{}': {}\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                command_line, e
            ))
        })?;

        if words.is_empty() {
            return Err(PromptsmithError::UserError(format!(
                "clipboard command is empty after parsing: '{}'",
                command_line
            )));
        }

        let program = words.remove(0);
        Ok(Self {
            program,
            args: words,
        })
    }

    /// The configured command, or the platform default.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.effective_clipboard_command())
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        debug!(program = %self.program, bytes = text.len(), "writing to clipboard");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                PromptsmithError::ClipboardError(format!(
                    "failed to run '{}': {}\nFix: install it or set clipboard_command in the config.",
                    self.program, e
                ))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await.map_err(|e| {
                PromptsmithError::ClipboardError(format!(
                    "failed to write to '{}': {}",
                    self.program, e
                ))
            })?;
            // Closing stdin signals end of input.
        }

        let output = child.wait_with_output().await.map_err(|e| {
            PromptsmithError::ClipboardError(format!("failed to wait for '{}': {}", self.program, e))
        })?;

        if !output.status.success() {
            return Err(PromptsmithError::ClipboardError(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(())
    }
}

/// Transient "copied" acknowledgment.
///
/// Visible for [`COPY_ACK_WINDOW`] after the last successful copy and clears
/// by itself once that deadline passes. A new copy restarts the window.
#[derive(Debug, Default, Clone)]
pub struct CopyAck {
    visible_until: Option<Instant>,
}

impl CopyAck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the window.
    pub fn acknowledge(&mut self) {
        self.visible_until = Some(Instant::now() + COPY_ACK_WINDOW);
    }

    pub fn is_visible(&self) -> bool {
        self.remaining().is_some()
    }

    /// Time left before the acknowledgment clears.
    pub fn remaining(&self) -> Option<Duration> {
        let deadline = self.visible_until?;
        let left = deadline.saturating_duration_since(Instant::now());
        (!left.is_zero()).then_some(left)
    }
}

/// Copy the canonical JSON of `prompt` and acknowledge on success.
///
/// On failure the acknowledgment is left untouched and the error is logged
/// and returned.
pub async fn copy_export(
    clipboard: &dyn Clipboard,
    prompt: &StructuredPrompt,
    ack: &mut CopyAck,
) -> Result<()> {
    let text = canonical_json(prompt)?;
    match clipboard.write_text(&text).await {
        Ok(()) => {
            ack.acknowledge();
            debug!("copied canonical JSON to clipboard");
            Ok(())
        }
        Err(err) => {
            warn!(error = %err, "clipboard write failed");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::fake::RecordingClipboard;
    use crate::present::spaced_json;
    use crate::structured::fixtures::sample_prompt;

    #[tokio::test]
    async fn copy_writes_canonical_not_spaced_json() {
        let clipboard = RecordingClipboard::default();
        let mut ack = CopyAck::new();
        let prompt = sample_prompt();

        copy_export(&clipboard, &prompt, &mut ack).await.unwrap();

        let writes = clipboard.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0], canonical_json(&prompt).unwrap());
        assert_ne!(writes[0], spaced_json(&prompt).unwrap());
        assert!(!writes[0].contains("\n\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn ack_clears_after_two_seconds() {
        let clipboard = RecordingClipboard::default();
        let mut ack = CopyAck::new();
        assert!(!ack.is_visible());

        copy_export(&clipboard, &sample_prompt(), &mut ack).await.unwrap();
        assert!(ack.is_visible());

        tokio::time::advance(Duration::from_millis(1999)).await;
        assert!(ack.is_visible());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(!ack.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn second_copy_restarts_window() {
        let clipboard = RecordingClipboard::default();
        let mut ack = CopyAck::new();

        copy_export(&clipboard, &sample_prompt(), &mut ack).await.unwrap();
        tokio::time::advance(Duration::from_millis(1500)).await;
        copy_export(&clipboard, &sample_prompt(), &mut ack).await.unwrap();

        tokio::time::advance(Duration::from_millis(1500)).await;
        assert!(ack.is_visible());
        assert_eq!(ack.remaining(), Some(Duration::from_millis(500)));

        tokio::time::advance(Duration::from_millis(500)).await;
        assert!(!ack.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_copy_shows_no_ack() {
        let clipboard = RecordingClipboard::failing();
        let mut ack = CopyAck::new();

        let err = copy_export(&clipboard, &sample_prompt(), &mut ack)
            .await
            .unwrap_err();
        assert!(matches!(err, PromptsmithError::ClipboardError(_)));
        assert!(!ack.is_visible());
    }

    #[test]
    fn command_line_is_split_like_a_shell() {
        let clipboard = CommandClipboard::new("xclip -selection 'clip board'").unwrap();
        assert_eq!(clipboard.program, "xclip");
        assert_eq!(clipboard.args, vec!["-selection", "clip board"]);
    }

    #[test]
    fn empty_or_unbalanced_command_is_user_error() {
        assert!(matches!(
            CommandClipboard::new("   "),
            Err(PromptsmithError::UserError(_))
        ));
        assert!(matches!(
            CommandClipboard::new("xclip 'unterminated"),
            Err(PromptsmithError::UserError(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn command_clipboard_pipes_text_to_stdin() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("clip.txt");
        let command = format!(
            "sh -c {}",
            shell_words::quote(&format!("cat > '{}'", target.display()))
        );
        let clipboard = CommandClipboard::new(&command).unwrap();

        clipboard.write_text("剪贴板内容").await.unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "剪贴板内容");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_command_is_clipboard_error() {
        let clipboard = CommandClipboard::new("sh -c 'cat >/dev/null; exit 3'").unwrap();
        let err = clipboard.write_text("x").await.unwrap_err();
        assert!(matches!(err, PromptsmithError::ClipboardError(_)));
    }

    #[tokio::test]
    async fn missing_program_is_clipboard_error() {
        let clipboard = CommandClipboard::new("promptsmith-no-such-clipboard-tool").unwrap();
        let err = clipboard.write_text("x").await.unwrap_err();
        assert!(matches!(err, PromptsmithError::ClipboardError(_)));
    }
}
