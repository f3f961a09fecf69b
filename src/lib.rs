mod app;
pub mod api;
pub mod camera;
pub mod config;
pub mod error;
pub mod gate;
pub mod session;
pub mod utils;

pub use camera::{CapturedPhoto, DetectedFrame, FrameProcessor, PhotoCapture};
pub use error::{Error, Result};
pub use gate::{BlinkCaptureGate, CaptureRequest, FaceObservation, GateState};
pub use session::{CaptureSession, SessionStats};

pub fn run() {
    app::run();
}
