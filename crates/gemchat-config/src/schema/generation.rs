use serde::{Deserialize, Serialize};

/// Optional model tuning. Unset fields are left out of the request so the
/// API applies its own defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Valid range: 0.0-2.0.
    pub temperature: Option<f64>,
    pub max_output_tokens: Option<u32>,
    /// Sent as `systemInstruction`; never part of the transcript.
    pub system_instruction: Option<String>,
}
