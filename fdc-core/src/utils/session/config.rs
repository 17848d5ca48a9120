//! Recording parameters.

use serde::{Deserialize, Serialize};

/// Samples written per recording.
pub const DEFAULT_SAMPLE_SIZE: u16 = 80;
/// Pause after each sample (ms).
pub const DEFAULT_SAMPLE_INTERVAL_MS: u32 = 20;
/// How long each countdown step is shown (ms).
pub const DEFAULT_COUNTDOWN_STEP_MS: u32 = 500;

/// Tunable recording parameters.
///
/// Deserializes from JSON; missing keys keep their defaults, unknown keys are
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecorderConfig {
    pub sample_size: u16,
    pub sample_interval_ms: u32,
    pub countdown_step_ms: u32,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            sample_interval_ms: DEFAULT_SAMPLE_INTERVAL_MS,
            countdown_step_ms: DEFAULT_COUNTDOWN_STEP_MS,
        }
    }
}

impl RecorderConfig {
    /// Parse a JSON config. Missing keys take their defaults.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
