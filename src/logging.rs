//! Tracing subscriber setup.
//!
//! Logs go to stderr so stdout carries only rendered output. `RUST_LOG`
//! overrides everything; otherwise the configured level applies to this
//! crate and dependencies log at `warn`.

use tracing_subscriber::EnvFilter;

/// Level used when neither `RUST_LOG` nor the config names a usable one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Longest prompt excerpt written to logs, in characters.
const PREVIEW_CHARS: usize = 60;

/// Map a configured level name to a filter level. Unknown names fall back to
/// [`DEFAULT_LOG_LEVEL`].
pub fn fallback_level(configured: Option<&str>, verbose: bool) -> &'static str {
    if verbose {
        return "debug";
    }
    match configured
        .map(|level| level.trim().to_ascii_lowercase())
        .as_deref()
    {
        Some("trace") => "trace",
        Some("debug") => "debug",
        Some("info") => "info",
        Some("warn") => "warn",
        Some("error") => "error",
        _ => DEFAULT_LOG_LEVEL,
    }
}

fn fallback_directive(level: &str) -> String {
    format!("{},{}={}", DEFAULT_LOG_LEVEL, env!("CARGO_CRATE_NAME"), level)
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(configured: Option<&str>, verbose: bool) {
    let directive = fallback_directive(fallback_level(configured, verbose));
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&directive))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// A bounded excerpt of user text for log fields.
pub fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}
