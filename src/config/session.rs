use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CameraPosition {
    #[default]
    Front,
    Back,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    // evaluate against the frame's own timestamp instead of the wall clock
    pub use_frame_timestamps: bool,
    pub camera_position: CameraPosition,
    // stop evaluating after a successful capture until the session is resumed
    pub pause_after_capture: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            use_frame_timestamps: false,
            camera_position: CameraPosition::Front,
            pause_after_capture: true,
        }
    }
}
