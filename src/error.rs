//! Error types for the promptsmith CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use crate::generator::GeneratorError;
use thiserror::Error;

/// Message shown to the user for any failed generation attempt.
///
/// The underlying cause is logged, not displayed.
pub const GENERATION_FAILED_MESSAGE: &str = "an error occurred while generating; please try again";

/// Main error type for promptsmith operations.
#[derive(Error, Debug)]
pub enum PromptsmithError {
    /// User provided invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),

    /// Input rejected before any external call (empty prompt, empty answer).
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// The workflow cannot accept `operation` while in state `from`.
    #[error("cannot {operation} while {from}")]
    InvalidTransition {
        from: &'static str,
        operation: &'static str,
    },

    /// The generator call could not complete (network, auth, rate limit).
    #[error("{}", GENERATION_FAILED_MESSAGE)]
    TransportOrServiceError(String),

    /// The call completed but the payload was empty or not schema-conformant.
    #[error("{}", GENERATION_FAILED_MESSAGE)]
    EmptyOrMalformedResponse(String),

    /// The copy export could not be written to the clipboard.
    #[error("Clipboard write failed: {0}")]
    ClipboardError(String),
}

impl PromptsmithError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            PromptsmithError::UserError(_) => exit_codes::USER_ERROR,
            PromptsmithError::InvalidTransition { .. } => exit_codes::USER_ERROR,
            PromptsmithError::ValidationError(_) => exit_codes::VALIDATION_FAILURE,
            PromptsmithError::TransportOrServiceError(_) => exit_codes::GENERATION_FAILURE,
            PromptsmithError::EmptyOrMalformedResponse(_) => exit_codes::GENERATION_FAILURE,
            PromptsmithError::ClipboardError(_) => exit_codes::CLIPBOARD_FAILURE,
        }
    }

    /// Whether this error ended a generation call, as opposed to one raised
    /// before the call was issued.
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            PromptsmithError::TransportOrServiceError(_)
                | PromptsmithError::EmptyOrMalformedResponse(_)
        )
    }

    /// Detailed cause for logging. For generation failures this is the
    /// detail hidden behind the generic display message.
    pub fn detail(&self) -> String {
        match self {
            PromptsmithError::TransportOrServiceError(detail)
            | PromptsmithError::EmptyOrMalformedResponse(detail) => detail.clone(),
            other => other.to_string(),
        }
    }
}

impl From<GeneratorError> for PromptsmithError {
    fn from(err: GeneratorError) -> Self {
        match err {
            GeneratorError::TransportOrServiceError(detail) => {
                PromptsmithError::TransportOrServiceError(detail)
            }
            GeneratorError::EmptyOrMalformedResponse(detail) => {
                PromptsmithError::EmptyOrMalformedResponse(detail)
            }
        }
    }
}

/// Result type alias for promptsmith operations.
pub type Result<T> = std::result::Result<T, PromptsmithError>;
