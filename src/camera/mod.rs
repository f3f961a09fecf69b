mod dry_run;
mod replay;

pub use dry_run::DryRunCapture;
pub use replay::ReplayFrames;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::CaptureConfig;
use crate::error::{CameraError, CaptureError};
use crate::gate::FaceObservation;

/// Face detection output for one camera frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectedFrame {
    pub timestamp_ms: u64,
    #[serde(default)]
    pub faces: Vec<FaceObservation>,
}

/// Frame delivery plus face detection. `Ok(None)` ends the stream.
pub trait FrameProcessor: Send {
    fn next_frame(&mut self) -> Result<Option<DetectedFrame>, CameraError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedPhoto {
    pub path: PathBuf,
    pub captured_at_ms: u64,
}

/// Takes, encodes and stores a photo. Called from capture threads, so a
/// slow capture never stalls frame evaluation.
pub trait PhotoCapture: Send + Sync {
    fn take_photo(&self, options: &CaptureConfig, at_ms: u64) -> Result<CapturedPhoto, CaptureError>;
}
