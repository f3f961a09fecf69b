use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceMode {
    Fast,
    #[default]
    Accurate,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DetectorMode {
    None,
    All,
}

/// Options handed to the face detector. Eye-open probabilities are only
/// reported when `classification_mode` is `all`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct DetectionConfig {
    pub performance_mode: PerformanceMode,
    pub landmark_mode: DetectorMode,
    pub contour_mode: DetectorMode,
    pub classification_mode: DetectorMode,
    // smallest face to report, as a fraction of the frame width
    pub min_face_size: f32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            performance_mode: PerformanceMode::Accurate,
            landmark_mode: DetectorMode::All,
            contour_mode: DetectorMode::None,
            classification_mode: DetectorMode::All,
            min_face_size: 0.15,
        }
    }
}

impl DetectionConfig {
    pub fn reports_eye_state(&self) -> bool {
        self.classification_mode == DetectorMode::All
    }
}
