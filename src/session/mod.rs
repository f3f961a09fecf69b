mod stats;

pub use stats::SessionStats;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use log::{debug, error, info, warn};

use crate::api::emitter::{EventSink, SessionEvent};
use crate::camera::{CapturedPhoto, DetectedFrame, FrameProcessor, PhotoCapture};
use crate::config::{CaptureConfig, Config};
use crate::error::CameraError;
use crate::gate::{BlinkCaptureGate, CaptureRequest};
use crate::utils::clock::Clock;
use stats::Counters;

/// One camera session: feeds detected frames through the blink gate and
/// hands capture requests to the capture backend without waiting on them.
pub struct CaptureSession {
    // evaluation is a read-modify-write of the last trigger time
    gate: Mutex<BlinkCaptureGate>,
    capture: Arc<dyn PhotoCapture>,
    options: CaptureConfig,
    clock: Arc<dyn Clock>,
    use_frame_timestamps: bool,
    pause_after_capture: bool,
    sink: Option<Arc<dyn EventSink>>,
    counters: Arc<Counters>,
    last_photo: Arc<Mutex<Option<CapturedPhoto>>>,
    running: AtomicBool,
    paused: Arc<AtomicBool>,
    frame_thread: Mutex<Option<JoinHandle<()>>>,
    captures: Mutex<Vec<JoinHandle<()>>>,
}

impl CaptureSession {
    pub fn new(config: &Config, capture: Arc<dyn PhotoCapture>, clock: Arc<dyn Clock>) -> Self {
        info!(
            "[CaptureSession::new] camera: {:?}, threshold: {}, debounce: {}ms",
            config.session.camera_position, config.gate.closed_eye_threshold, config.gate.debounce_ms
        );
        Self {
            gate: Mutex::new(BlinkCaptureGate::new(config.gate)),
            capture,
            options: config.capture,
            clock,
            use_frame_timestamps: config.session.use_frame_timestamps,
            pause_after_capture: config.session.pause_after_capture,
            sink: None,
            counters: Arc::new(Counters::default()),
            last_photo: Arc::new(Mutex::new(None)),
            running: AtomicBool::new(false),
            paused: Arc::new(AtomicBool::new(false)),
            frame_thread: Mutex::new(None),
            captures: Mutex::new(Vec::new()),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(sink) = &self.sink {
            sink.emit(&event);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stops evaluating frames, as the camera does while a photo is shown.
    /// With `pause_after_capture` this happens on every successful capture.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
        info!("[CaptureSession::pause] frame evaluation paused");
    }

    /// Resumes evaluation, e.g. once the captured photo is dismissed.
    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
        info!("[CaptureSession::resume] frame evaluation resumed");
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub fn last_photo(&self) -> Option<CapturedPhoto> {
        self.last_photo.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn stats(&self) -> SessionStats {
        self.counters.snapshot()
    }

    /// Evaluates one frame. A returned request has already been dispatched.
    pub fn process_frame(&self, frame: &DetectedFrame) -> Option<CaptureRequest> {
        if self.is_paused() {
            return None;
        }
        self.counters.frame();
        let now_ms = if self.use_frame_timestamps {
            frame.timestamp_ms
        } else {
            self.clock.now_millis()
        };
        let request = {
            let mut gate = self.gate.lock().unwrap_or_else(|e| e.into_inner());
            gate.evaluate(&frame.faces, now_ms)
        };
        if let Some(request) = request {
            self.dispatch(request);
        }
        request
    }

    fn dispatch(&self, request: CaptureRequest) {
        self.counters.requested();
        self.emit(SessionEvent::CaptureRequested { at_ms: request.at_ms });

        let capture = Arc::clone(&self.capture);
        let options = self.options;
        let counters = Arc::clone(&self.counters);
        let last_photo = Arc::clone(&self.last_photo);
        let sink = self.sink.clone();
        let paused = self.pause_after_capture.then(|| Arc::clone(&self.paused));
        let handle = std::thread::spawn(move || {
            let event = match capture.take_photo(&options, request.at_ms) {
                Ok(photo) => {
                    info!("[dispatch] photo captured: {}", photo.path.display());
                    counters.succeeded();
                    let event = SessionEvent::CaptureSucceeded {
                        path: photo.path.clone(),
                        at_ms: photo.captured_at_ms,
                    };
                    *last_photo.lock().unwrap_or_else(|e| e.into_inner()) = Some(photo);
                    if let Some(paused) = paused {
                        paused.store(true, Ordering::SeqCst);
                        info!("[dispatch] frame evaluation paused until resume");
                    }
                    event
                }
                Err(e) => {
                    error!("[dispatch] photo capture failed: {}", e);
                    counters.failed();
                    SessionEvent::CaptureFailed {
                        reason: e.to_string(),
                    }
                }
            };
            if let Some(sink) = sink {
                sink.emit(&event);
            }
        });

        let mut captures = self.captures.lock().unwrap_or_else(|e| e.into_inner());
        captures.retain(|h| !h.is_finished());
        captures.push(handle);
    }

    /// Pulls frames until the source ends or the session is stopped.
    pub fn run(&self, source: &mut dyn FrameProcessor) {
        self.running.store(true, Ordering::SeqCst);
        self.run_loop(source);
    }

    fn run_loop(&self, source: &mut dyn FrameProcessor) {
        while self.is_running() {
            match source.next_frame() {
                Ok(Some(frame)) => {
                    self.process_frame(&frame);
                }
                Ok(None) => {
                    info!("[run] frame source ended");
                    break;
                }
                Err(CameraError::Io(e)) => {
                    error!("[run] frame source failed, stopping: {}", e);
                    break;
                }
                Err(e) => {
                    warn!("[run] face detection failed: {}", e);
                    self.counters.detector_error();
                    // no faces to look at, which is a no-op for the gate
                    self.process_frame(&DetectedFrame {
                        timestamp_ms: self.clock.now_millis(),
                        faces: Vec::new(),
                    });
                }
            }
        }
        self.running.store(false, Ordering::SeqCst);
        debug!("[run] frame loop exited");
    }

    /// Starts the frame loop on its own thread with a re-armed gate.
    /// Returns false, leaving the running loop alone, if a loop is still active.
    pub fn start(self: &Arc<Self>, mut source: Box<dyn FrameProcessor>) -> bool {
        let mut frame_thread = self.frame_thread.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = frame_thread.take() {
            if !previous.is_finished() {
                warn!("[CaptureSession::start] frame loop already running, start refused");
                *frame_thread = Some(previous);
                return false;
            }
            if previous.join().is_err() {
                error!("[CaptureSession::start] previous frame loop panicked");
            }
        }
        self.gate.lock().unwrap_or_else(|e| e.into_inner()).reset();
        self.running.store(true, Ordering::SeqCst);
        let session = Arc::clone(self);
        *frame_thread = Some(std::thread::spawn(move || session.run_loop(source.as_mut())));
        true
    }

    /// Blocks until every dispatched capture has completed.
    pub fn wait_for_captures(&self) {
        let handles: Vec<_> = self
            .captures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .drain(..)
            .collect();
        for handle in handles {
            if handle.join().is_err() {
                error!("[wait_for_captures] capture thread panicked");
            }
        }
    }

    /// Waits for the frame loop to end on its own, then for pending captures.
    pub fn join(&self) -> SessionStats {
        let handle = self.frame_thread.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                error!("[join] frame loop panicked");
            }
        }
        self.wait_for_captures();
        let stats = self.stats();
        info!("[join] session finished: {:?}", stats);
        self.emit(SessionEvent::SessionStopped { stats });
        stats
    }

    pub fn stop(&self) -> SessionStats {
        self.running.store(false, Ordering::SeqCst);
        self.join()
    }
}
