//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_parse_error() {
    let result = load_from_path(Path::new("/tmp/nonexistent_gemchat_config.toml"));
    let err = result.unwrap_err();
    assert!(matches!(err, gemchat_common::ConfigError::ParseError(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[api]
model = "gemini-2.0-flash"
max_retries = 0

[chat]
stream = true
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.api.model, "gemini-2.0-flash");
    assert_eq!(config.api.max_retries, 0);
    assert!(config.chat.stream);
    // Defaults preserved
    assert_eq!(config.api.connect_timeout_secs, 10);
    assert_eq!(config.api.api_key_env, "GEMINI_API_KEY");
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, gemchat_common::ConfigError::ParseError(_)));
}

#[test]
fn load_from_path_keeps_out_of_range_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[api]\nrequest_timeout_secs = 0\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.api.request_timeout_secs, 0);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gemchat").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.api.model, "gemini-1.5-flash");
    assert!(config.api.api_key.is_none());
}

#[test]
fn default_config_toml_is_valid() {
    use super::template::default_config_toml;
    use crate::schema::GemchatConfig;

    let config: GemchatConfig = toml::from_str(&default_config_toml()).unwrap();
    assert!(crate::validation::validate(&config).is_ok());
}

#[test]
fn default_config_path_is_reasonable() {
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("gemchat"));
        assert!(path_str.ends_with("config.toml"));
    }
}
