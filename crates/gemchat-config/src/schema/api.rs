//! API endpoint, credential and transport settings.

use gemchat_common::ConfigError;
use serde::{Deserialize, Serialize};

/// Endpoint, credentials, timeouts and retry policy for the generative API.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Models collection URL; the request goes to `{base_url}/{model}:generateContent`.
    pub base_url: String,
    pub model: String,
    /// Inline key. Prefer the environment variable named by `api_key_env`.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub api_key_env: String,
    /// Valid range: 1-120.
    pub connect_timeout_secs: u32,
    /// Valid range: 1-600.
    pub request_timeout_secs: u32,
    /// Extra attempts for transient failures (valid range: 0-10).
    pub max_retries: u32,
    /// Backoff before retry `n` is `n * retry_backoff_ms` (valid range: 0-60000).
    pub retry_backoff_ms: u32,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_key_env", &self.api_key_env)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_ms", &self.retry_backoff_ms)
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta/models".into(),
            model: "gemini-1.5-flash".into(),
            api_key: None,
            api_key_env: "GEMINI_API_KEY".into(),
            connect_timeout_secs: 10,
            request_timeout_secs: 120,
            max_retries: 2,
            retry_backoff_ms: 500,
        }
    }
}

impl ApiConfig {
    /// The API key to use, or `MissingApiKey` if none is configured.
    ///
    /// Environment overrides are folded into `api_key` by
    /// [`crate::apply_env_overrides`] before this is called.
    pub fn resolved_api_key(&self) -> Result<String, ConfigError> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key.to_string()),
            _ => Err(ConfigError::MissingApiKey(self.api_key_env.clone())),
        }
    }
}
