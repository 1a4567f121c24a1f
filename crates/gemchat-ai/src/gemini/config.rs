//! Gemini API client configuration.

use std::time::Duration;

use gemchat_common::ConfigError;
use gemchat_config::GemchatConfig;

pub(crate) const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini API client configuration.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Extra attempts for 429/5xx/connect/timeout failures.
    pub max_retries: u32,
    /// Delay before retry `n` is `n * retry_backoff`.
    pub retry_backoff: Duration,
    pub temperature: Option<f64>,
    pub max_output_tokens: Option<u32>,
    pub system_instruction: Option<String>,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff", &self.retry_backoff)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("system_instruction", &self.system_instruction)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: GEMINI_API_BASE.to_string(),
            model: "gemini-1.5-flash".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
            max_retries: 2,
            retry_backoff: Duration::from_millis(500),
            temperature: None,
            max_output_tokens: None,
            system_instruction: None,
        }
    }

    /// Build from the loaded application config. Fails if no API key is set.
    pub fn from_config(config: &GemchatConfig) -> Result<Self, ConfigError> {
        let api = &config.api;
        let generation = &config.generation;
        Ok(Self {
            api_key: api.resolved_api_key()?,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            model: api.model.clone(),
            connect_timeout: Duration::from_secs(u64::from(api.connect_timeout_secs)),
            request_timeout: Duration::from_secs(u64::from(api.request_timeout_secs)),
            max_retries: api.max_retries,
            retry_backoff: Duration::from_millis(u64::from(api.retry_backoff_ms)),
            temperature: generation.temperature,
            max_output_tokens: generation.max_output_tokens,
            system_instruction: generation
                .system_instruction
                .clone()
                .filter(|s| !s.trim().is_empty()),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeouts(mut self, connect: Duration, request: Duration) -> Self {
        self.connect_timeout = connect;
        self.request_timeout = request;
        self
    }

    pub fn with_retries(mut self, max_retries: u32, backoff: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_backoff = backoff;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_api_key() {
        let debug = format!("{:?}", GeminiConfig::new("AIza-secret"));
        assert!(!debug.contains("AIza-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn from_config_copies_api_and_generation_settings() {
        let mut config = GemchatConfig::default();
        config.api.api_key = Some("k".into());
        config.api.base_url = "http://localhost:9999/models/".into();
        config.api.request_timeout_secs = 30;
        config.api.max_retries = 0;
        config.generation.temperature = Some(0.3);
        config.generation.system_instruction = Some("  ".into());

        let gemini = GeminiConfig::from_config(&config).unwrap();
        assert_eq!(gemini.api_key, "k");
        assert_eq!(gemini.base_url, "http://localhost:9999/models");
        assert_eq!(gemini.request_timeout, Duration::from_secs(30));
        assert_eq!(gemini.max_retries, 0);
        assert_eq!(gemini.temperature, Some(0.3));
        assert!(gemini.system_instruction.is_none());
    }

    #[test]
    fn from_config_without_key_fails() {
        let err = GeminiConfig::from_config(&GemchatConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey(_)));
    }

    #[test]
    fn builders_override_defaults() {
        let config = GeminiConfig::new("k")
            .with_model("gemini-2.0-flash")
            .with_max_output_tokens(256)
            .with_retries(5, Duration::from_millis(10));
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.max_output_tokens, Some(256));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.retry_backoff, Duration::from_millis(10));
    }
}
