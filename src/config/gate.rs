use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_CLOSED_EYE_THRESHOLD: f32 = 0.4;
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct GateConfig {
    // an eye counts as closed when its open probability is strictly below this
    pub closed_eye_threshold: f32,
    // minimum gap between two triggered captures, exclusive
    pub debounce_ms: u64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            closed_eye_threshold: DEFAULT_CLOSED_EYE_THRESHOLD,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl GateConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = self.closed_eye_threshold;
        if !(t > 0.0 && t < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "gate.closed_eye_threshold must be in (0, 1), got {}",
                t
            )));
        }
        Ok(())
    }
}
