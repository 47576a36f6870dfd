//! Exit code constants for the promptsmith CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, bad config, illegal workflow operation)
//! - 2: Validation failure (empty prompt, empty step-back answer)
//! - 3: Generation failure (transport/service error or malformed response)
//! - 4: Clipboard failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid configuration, or an operation the
/// workflow cannot accept in its current state.
pub const USER_ERROR: i32 = 1;

/// Validation failure: input rejected before any external call.
pub const VALIDATION_FAILURE: i32 = 2;

/// Generation failure: the generator call failed or returned an unusable payload.
pub const GENERATION_FAILURE: i32 = 3;

/// Clipboard failure: the copy export could not be written.
pub const CLIPBOARD_FAILURE: i32 = 4;
