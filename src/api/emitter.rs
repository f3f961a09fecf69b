use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use log::error;
use serde::{Deserialize, Serialize};

use crate::session::SessionStats;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    CaptureRequested { at_ms: u64 },
    CaptureSucceeded { path: PathBuf, at_ms: u64 },
    CaptureFailed { reason: String },
    SessionStopped { stats: SessionStats },
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: &SessionEvent);
}

/// Writes each event as one JSON object per line.
pub struct JsonLinesSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send> EventSink for JsonLinesSink<W> {
    fn emit(&self, event: &SessionEvent) {
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        let writer = &mut *writer;
        let result = serde_json::to_writer(&mut *writer, event)
            .map_err(std::io::Error::from)
            .and_then(|_| {
                writer.write_all(b"\n")?;
                writer.flush()
            });
        if let Err(e) = result {
            error!("[JsonLinesSink::emit] write event failed: {}", e);
        }
    }
}
