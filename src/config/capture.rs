use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Flash {
    #[default]
    Off,
    On,
    Auto,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityPrioritization {
    Speed,
    Balanced,
    #[default]
    Quality,
}

/// Options forwarded to the photo capture collaborator with every request.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct CaptureConfig {
    pub flash: Flash,
    pub quality_prioritization: QualityPrioritization,
    pub skip_metadata: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            flash: Flash::Off,
            quality_prioritization: QualityPrioritization::Quality,
            skip_metadata: true,
        }
    }
}
