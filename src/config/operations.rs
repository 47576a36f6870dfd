//! Config loading, validation, and utility operations.

use super::model::{Config, DEFAULT_CONFIG_FILE};
use crate::error::{PromptsmithError, Result};
use std::path::Path;

/// Log levels accepted by `log_level`.
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(PromptsmithError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            PromptsmithError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Resolve the effective config.
    ///
    /// An explicit path must exist. Without one, `promptsmith.yaml` in the
    /// working directory is used if present, defaults otherwise.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| {
                PromptsmithError::UserError(format!("failed to parse config YAML: {}", e))
            })?
        };

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            PromptsmithError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `model`, `endpoint` and `api_key_env` must be non-empty
    /// - `temperature` must be within 0.0..=2.0
    /// - `timeout_seconds` must be positive
    /// - `log_level` must be a known level
    /// - `clipboard_command`, when set, must be non-empty
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("model", &self.model),
            ("endpoint", &self.endpoint),
            ("api_key_env", &self.api_key_env),
        ] {
            if value.trim().is_empty() {
                return Err(PromptsmithError::UserError(format!(
                    "config validation failed: {} must not be empty",
                    name
                )));
            }
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(PromptsmithError::UserError(format!(
                "config validation failed: temperature must be between 0.0 and 2.0 (found {})",
                self.temperature
            )));
        }

        if self.timeout_seconds == 0 {
            return Err(PromptsmithError::UserError(
                "config validation failed: timeout_seconds must be greater than 0".to_string(),
            ));
        }

        let level = self.log_level.trim().to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(PromptsmithError::UserError(format!(
                "config validation failed: log_level must be one of {} (found '{}')",
                LOG_LEVELS.join(", "),
                self.log_level
            )));
        }

        if let Some(command) = &self.clipboard_command
            && command.trim().is_empty()
        {
            return Err(PromptsmithError::UserError(
                "config validation failed: clipboard_command must not be empty when set"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(PromptsmithError::UserError(format!(
                "no API key found: set the {} environment variable",
                self.api_key_env
            ))),
        }
    }

    /// The clipboard command to run, falling back to a platform default.
    pub fn effective_clipboard_command(&self) -> String {
        if let Some(command) = &self.clipboard_command {
            return command.clone();
        }

        if cfg!(target_os = "macos") {
            "pbcopy".to_string()
        } else if cfg!(windows) {
            "clip".to_string()
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            "wl-copy".to_string()
        } else {
            "xclip -selection clipboard".to_string()
        }
    }
}
