//! Configuration model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "promptsmith.yaml";

/// Configuration for promptsmith.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Generator settings
    // =========================================================================
    /// Model identifier sent to the generator service.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base endpoint of the generator service.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Sampling temperature (0.0 - 2.0).
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    // =========================================================================
    // Request settings
    // =========================================================================
    /// Path to a custom instruction template (built-in template when unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_template: Option<PathBuf>,

    // =========================================================================
    // Presentation settings
    // =========================================================================
    /// Command that receives the copy export on stdin.
    /// When unset a platform default is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clipboard_command: Option<String>,

    // =========================================================================
    // Logging
    // =========================================================================
    /// Fallback log level when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}
fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_timeout_seconds() -> u64 {
    60
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            timeout_seconds: default_timeout_seconds(),
            prompt_template: None,
            clipboard_command: None,
            log_level: default_log_level(),
        }
    }
}
