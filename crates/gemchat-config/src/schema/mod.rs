//! Configuration schema types.
//!
//! All sections use `#[serde(default)]` so a partial TOML file only needs
//! to mention the values it changes.

mod api;
mod chat;
mod generation;
mod logging;

pub use api::ApiConfig;
pub use chat::ChatConfig;
pub use generation::GenerationConfig;
pub use logging::{LogLevel, LoggingConfig};

use serde::{Deserialize, Serialize};

/// Top-level gemchat configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GemchatConfig {
    pub api: ApiConfig,
    pub generation: GenerationConfig,
    pub chat: ChatConfig,
    pub logging: LoggingConfig,
}
