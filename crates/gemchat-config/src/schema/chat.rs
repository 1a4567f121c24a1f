use serde::{Deserialize, Serialize};

/// Front-end behaviour.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Print the answer as it streams in instead of all at once.
    pub stream: bool,
}
