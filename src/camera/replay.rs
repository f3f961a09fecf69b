use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::info;

use super::{DetectedFrame, FrameProcessor};
use crate::error::CameraError;

/// Replays a recorded detection trace, one JSON `DetectedFrame` per line.
pub struct ReplayFrames {
    lines: Box<dyn BufRead + Send>,
    line_no: usize,
}

impl ReplayFrames {
    pub fn open(path: &Path) -> Result<Self, CameraError> {
        let file = File::open(path)?;
        info!("[ReplayFrames::open] replaying {}", path.display());
        Ok(Self::from_reader(file))
    }

    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        Self {
            lines: Box::new(BufReader::new(reader)),
            line_no: 0,
        }
    }
}

impl FrameProcessor for ReplayFrames {
    fn next_frame(&mut self) -> Result<Option<DetectedFrame>, CameraError> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            // raw bytes, so a line that is not UTF-8 is a decode error like any other
            if self.lines.read_until(b'\n', &mut buf)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            let line = buf.trim_ascii();
            if line.is_empty() {
                continue;
            }
            return serde_json::from_slice(line)
                .map(Some)
                .map_err(|source| CameraError::Decode {
                    line: self.line_no,
                    source,
                });
        }
    }
}
