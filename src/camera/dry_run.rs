use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::debug;

use super::{CapturedPhoto, PhotoCapture};
use crate::config::CaptureConfig;
use crate::error::CaptureError;

/// Capture backend for replays: names the photo it would have taken and
/// writes nothing.
#[derive(Debug)]
pub struct DryRunCapture {
    dir: PathBuf,
    taken: AtomicUsize,
}

impl DryRunCapture {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            taken: AtomicUsize::new(0),
        }
    }

    pub fn taken(&self) -> usize {
        self.taken.load(Ordering::SeqCst)
    }
}

impl PhotoCapture for DryRunCapture {
    fn take_photo(&self, options: &CaptureConfig, at_ms: u64) -> Result<CapturedPhoto, CaptureError> {
        let n = self.taken.fetch_add(1, Ordering::SeqCst);
        debug!("[DryRunCapture::take_photo] #{} at {}ms with {:?}", n, at_ms, options);
        Ok(CapturedPhoto {
            path: self.dir.join(format!("blink-{}-{}.jpg", at_ms, n)),
            captured_at_ms: at_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_photos_by_time_and_sequence() {
        let capture = DryRunCapture::new("shots");
        let photo = capture.take_photo(&CaptureConfig::default(), 1_200).unwrap();
        assert_eq!(photo.path, PathBuf::from("shots").join("blink-1200-0.jpg"));
        assert_eq!(photo.captured_at_ms, 1_200);
        assert_eq!(capture.taken(), 1);
    }
}
