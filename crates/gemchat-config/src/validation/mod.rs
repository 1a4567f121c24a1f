//! Configuration validation.
//!
//! Checks the endpoint, numeric ranges and generation settings, collecting
//! every problem into a single `ConfigError`.

mod helpers;


use crate::schema::GemchatConfig;
use gemchat_common::ConfigError;

use helpers::{validate_range, validate_range_f64};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &GemchatConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_api(&mut errors, config);
    validate_generation(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_api(errors: &mut Vec<String>, config: &GemchatConfig) {
    let api = &config.api;

    if !(api.base_url.starts_with("http://") || api.base_url.starts_with("https://")) {
        errors.push(format!(
            "api.base_url = {:?} must start with http:// or https://",
            api.base_url
        ));
    }
    if api.model.trim().is_empty() {
        errors.push("api.model must not be empty".into());
    }

    validate_range(errors, "api.connect_timeout_secs", api.connect_timeout_secs, 1, 120);
    validate_range(errors, "api.request_timeout_secs", api.request_timeout_secs, 1, 600);
    validate_range(errors, "api.max_retries", api.max_retries, 0, 10);
    validate_range(errors, "api.retry_backoff_ms", api.retry_backoff_ms, 0, 60_000);
}

fn validate_generation(errors: &mut Vec<String>, config: &GemchatConfig) {
    if let Some(temperature) = config.generation.temperature {
        validate_range_f64(errors, "generation.temperature", temperature, 0.0, 2.0);
    }
    if config.generation.max_output_tokens == Some(0) {
        errors.push("generation.max_output_tokens must be greater than 0".into());
    }
}
