//! Tests for config functionality.

use crate::config::Config;
use crate::test_support::{DirGuard, EnvGuard};
use serial_test::serial;
use std::io::Write;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.model, "gemini-3-flash-preview");
    assert_eq!(
        config.endpoint,
        "https://generativelanguage.googleapis.com/v1beta"
    );
    assert_eq!(config.api_key_env, "GEMINI_API_KEY");
    assert_eq!(config.temperature, 0.7);
    assert_eq!(config.timeout_seconds, 60);
    assert!(config.prompt_template.is_none());
    assert!(config.clipboard_command.is_none());
    assert_eq!(config.log_level, "warn");
}

#[test]
fn test_parse_empty_yaml() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
model: gemini-2.5-pro
temperature: 0.3
"#;
    let config = Config::from_yaml(yaml).unwrap();

    // Specified values should be used
    assert_eq!(config.model, "gemini-2.5-pro");
    assert_eq!(config.temperature, 0.3);

    // Unspecified values should use defaults
    assert_eq!(config.api_key_env, "GEMINI_API_KEY");
    assert_eq!(config.timeout_seconds, 60);
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
model: custom-model
endpoint: http://localhost:8080/v1beta
api_key_env: MY_KEY
temperature: 1.2
timeout_seconds: 15
prompt_template: ./templates/prompt.txt
clipboard_command: "xsel --clipboard --input"
log_level: debug
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.model, "custom-model");
    assert_eq!(config.endpoint, "http://localhost:8080/v1beta");
    assert_eq!(config.api_key_env, "MY_KEY");
    assert_eq!(config.temperature, 1.2);
    assert_eq!(config.timeout_seconds, 15);
    assert_eq!(
        config.prompt_template.as_deref(),
        Some(std::path::Path::new("./templates/prompt.txt"))
    );
    assert_eq!(
        config.clipboard_command.as_deref(),
        Some("xsel --clipboard --input")
    );
    assert_eq!(config.log_level, "debug");
}

#[test]
fn test_unknown_fields_are_ignored() {
    let yaml = r#"
model: m
future_setting: true
nested:
  key: value
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.model, "m");
}

#[test]
fn test_invalid_yaml_is_user_error() {
    let err = Config::from_yaml("temperature: [not, a, number]").unwrap_err();
    assert!(err.to_string().contains("failed to parse config YAML"));
}

#[test]
fn test_validate_temperature_range() {
    let err = Config::from_yaml("temperature: 2.5").unwrap_err();
    assert!(err.to_string().contains("temperature"));

    let err = Config::from_yaml("temperature: -0.1").unwrap_err();
    assert!(err.to_string().contains("temperature"));

    assert!(Config::from_yaml("temperature: 0.0").is_ok());
    assert!(Config::from_yaml("temperature: 2.0").is_ok());
}

#[test]
fn test_validate_timeout() {
    let err = Config::from_yaml("timeout_seconds: 0").unwrap_err();
    assert!(err.to_string().contains("timeout_seconds"));
}

#[test]
fn test_validate_empty_strings() {
    for yaml in ["model: ''", "endpoint: ' '", "api_key_env: ''"] {
        assert!(Config::from_yaml(yaml).is_err(), "{yaml}");
    }
}

#[test]
fn test_validate_log_level() {
    assert!(Config::from_yaml("log_level: INFO").is_ok());
    let err = Config::from_yaml("log_level: loud").unwrap_err();
    assert!(err.to_string().contains("log_level"));
}

#[test]
fn test_validate_clipboard_command() {
    let err = Config::from_yaml("clipboard_command: '  '").unwrap_err();
    assert!(err.to_string().contains("clipboard_command"));
}

#[test]
fn test_yaml_round_trip_preserves_values() {
    let config = Config {
        model: "m".to_string(),
        clipboard_command: Some("pbcopy".to_string()),
        ..Config::default()
    };
    let yaml = config.to_yaml().unwrap();
    assert_eq!(Config::from_yaml(&yaml).unwrap(), config);
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "model: from-file").unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.model, "from-file");
}

#[test]
fn test_resolve_explicit_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.yaml");
    let err = Config::resolve(Some(missing.as_path())).unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
#[serial]
fn test_resolve_uses_default_file_in_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("promptsmith.yaml"), "model: local-default\n").unwrap();
    let _guard = DirGuard::new(dir.path());

    let config = Config::resolve(None).unwrap();
    assert_eq!(config.model, "local-default");
}

#[test]
#[serial]
fn test_resolve_without_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let _guard = DirGuard::new(dir.path());

    assert_eq!(Config::resolve(None).unwrap(), Config::default());
}

#[test]
fn test_explicit_clipboard_command_wins() {
    let config = Config {
        clipboard_command: Some("my-copy --stdin".to_string()),
        ..Config::default()
    };
    assert_eq!(config.effective_clipboard_command(), "my-copy --stdin");
}

#[test]
#[serial]
fn test_api_key_from_environment() {
    let _guard = EnvGuard::set("PROMPTSMITH_TEST_KEY", Some("secret"));
    let config = Config {
        api_key_env: "PROMPTSMITH_TEST_KEY".to_string(),
        ..Config::default()
    };
    assert_eq!(config.api_key().unwrap(), "secret");
}

#[test]
#[serial]
fn test_missing_api_key_is_user_error() {
    let _guard = EnvGuard::set("PROMPTSMITH_TEST_KEY", None);
    let config = Config {
        api_key_env: "PROMPTSMITH_TEST_KEY".to_string(),
        ..Config::default()
    };
    let err = config.api_key().unwrap_err();
    assert!(err.to_string().contains("PROMPTSMITH_TEST_KEY"));
}

#[test]
#[serial]
fn test_blank_api_key_is_rejected() {
    let _guard = EnvGuard::set("PROMPTSMITH_TEST_KEY", Some("   "));
    let config = Config {
        api_key_env: "PROMPTSMITH_TEST_KEY".to_string(),
        ..Config::default()
    };
    assert!(config.api_key().is_err());
}
