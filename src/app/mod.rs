use log::{error, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod panic_handler;

use crate::{
    api::emitter::JsonLinesSink,
    camera::{DryRunCapture, ReplayFrames},
    config::{self, Config},
    session::CaptureSession,
    utils::{clock::SystemClock, logger},
    Result,
};

const CAPTURE_DIR: &str = "captures";

/// Replays a recorded detection trace through a capture session and
/// prints session events to stdout as JSON lines.
pub fn run() {
    let trace_path = match std::env::args_os().nth(1) {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("usage: blink-shutter <trace.jsonl>");
            std::process::exit(2);
        }
    };

    let config = match config::init_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[run] {}", e);
            std::process::exit(1);
        }
    };

    let _logger = match logger::init_logger(config.system.log_level()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("[run] logger initialize failed: {}", e);
            None
        }
    };
    info!("=== blink-shutter started ===");
    info!("debug mode: {}", cfg!(debug_assertions));

    panic_handler::setup_panic_handler();
    info!("[✓] panic handler initialized");

    let session = match start_replay(&trace_path, config) {
        Ok(session) => session,
        Err(e) => {
            error!("[✗] start replay of {} failed: {}", trace_path.display(), e);
            std::process::exit(1);
        }
    };
    info!("[✓] replaying {}", trace_path.display());

    let stats = session.join();
    info!(
        "=== replay finished: {} frames, {} captures ({} failed) ===",
        stats.frames, stats.captures_succeeded, stats.captures_failed
    );
}

fn start_replay(trace_path: &Path, mut config: Config) -> Result<Arc<CaptureSession>> {
    let frames = ReplayFrames::open(trace_path)?;
    // recorded frames carry their own capture times and there is no preview to dismiss
    config.session.use_frame_timestamps = true;
    config.session.pause_after_capture = false;
    let session = Arc::new(
        CaptureSession::new(
            &config,
            Arc::new(DryRunCapture::new(CAPTURE_DIR)),
            Arc::new(SystemClock),
        )
        .with_sink(Arc::new(JsonLinesSink::new(std::io::stdout()))),
    );
    session.start(Box::new(frames));
    Ok(session)
}
