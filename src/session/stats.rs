use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub frames: u64,
    pub detector_errors: u64,
    pub captures_requested: u64,
    pub captures_succeeded: u64,
    pub captures_failed: u64,
}

#[derive(Debug, Default)]
pub(crate) struct Counters {
    frames: AtomicU64,
    detector_errors: AtomicU64,
    captures_requested: AtomicU64,
    captures_succeeded: AtomicU64,
    captures_failed: AtomicU64,
}

impl Counters {
    pub fn frame(&self) {
        self.frames.fetch_add(1, Ordering::Relaxed);
    }

    pub fn detector_error(&self) {
        self.detector_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requested(&self) {
        self.captures_requested.fetch_add(1, Ordering::Relaxed);
    }

    pub fn succeeded(&self) {
        self.captures_succeeded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn failed(&self) {
        self.captures_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> SessionStats {
        SessionStats {
            frames: self.frames.load(Ordering::Relaxed),
            detector_errors: self.detector_errors.load(Ordering::Relaxed),
            captures_requested: self.captures_requested.load(Ordering::Relaxed),
            captures_succeeded: self.captures_succeeded.load(Ordering::Relaxed),
            captures_failed: self.captures_failed.load(Ordering::Relaxed),
        }
    }
}
