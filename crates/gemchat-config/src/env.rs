//! Environment variable overrides.

use crate::schema::GemchatConfig;
use tracing::debug;

/// Override config values from the process environment.
///
/// The variable named by `api.api_key_env` replaces `api.api_key` when it
/// is set and non-empty.
pub fn apply_env_overrides(config: &mut GemchatConfig) {
    apply_env_overrides_from(config, |name| std::env::var(name).ok());
}

/// Same as [`apply_env_overrides`] with an explicit variable lookup.
pub fn apply_env_overrides_from(
    config: &mut GemchatConfig,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if config.api.api_key_env.is_empty() {
        return;
    }
    if let Some(key) = lookup(&config.api.api_key_env).filter(|v| !v.trim().is_empty()) {
        debug!(var = %config.api.api_key_env, "API key taken from environment");
        config.api.api_key = Some(key);
    }
}
