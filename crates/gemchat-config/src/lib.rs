//! gemchat configuration system.
//!
//! TOML-based configuration for the API endpoint, credentials, generation
//! settings and logging. Every section uses serde defaults so partial
//! configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gemchat_config::load_config;
//!
//! let config = load_config(None).expect("failed to load config");
//! let key = config.api.resolved_api_key().expect("no api key");
//! ```

pub mod env;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use env::{apply_env_overrides, apply_env_overrides_from};
pub use schema::{
    ApiConfig, ChatConfig, GemchatConfig, GenerationConfig, LogLevel, LoggingConfig,
};

use std::path::Path;

use gemchat_common::ConfigError;

/// Load, override from the environment, and validate.
///
/// With `path = None` the platform default path is used, and a commented
/// default file is created there if none exists.
pub fn load_config(path: Option<&Path>) -> Result<GemchatConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.to_path_buf()));
            }
            toml_loader::load_from_path(path)?
        }
        None => toml_loader::load_default()?,
    };

    apply_env_overrides(&mut config);
    validation::validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_config_missing_explicit_path_is_file_not_found() {
        let err = load_config(Some(Path::new("/tmp/nonexistent_gemchat_dir/config.toml")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn load_config_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nmax_retries = 50\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("api.max_retries"));
    }
}
