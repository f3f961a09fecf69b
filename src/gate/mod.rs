//! Turns per-frame face observations into capture requests.
//!
//! A face counts as blinking when both eye-open probabilities are present
//! and both fall strictly below the closed-eye threshold. A blink fires a
//! capture only when strictly more than the debounce interval has passed
//! since the previous capture, so at most one request leaves any frame.

mod observation;

pub use observation::FaceObservation;

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use crate::config::GateConfig;

/// Fire-and-forget trigger for the capture collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRequest {
    /// Time the gate fired, in the same milliseconds the gate was fed.
    pub at_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// The next blink will trigger.
    Armed,
    /// A capture fired within the debounce interval.
    CoolingDown,
}

#[derive(Debug, Clone)]
pub struct BlinkCaptureGate {
    config: GateConfig,
    // None means never triggered, i.e. armed regardless of `now`
    last_trigger_ms: Option<u64>,
}

impl Default for BlinkCaptureGate {
    fn default() -> Self {
        Self::new(GateConfig::default())
    }
}

impl BlinkCaptureGate {
    pub fn new(config: GateConfig) -> Self {
        Self {
            config,
            last_trigger_ms: None,
        }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn last_trigger_ms(&self) -> Option<u64> {
        self.last_trigger_ms
    }

    /// Returns the gate to its initial armed state.
    pub fn reset(&mut self) {
        self.last_trigger_ms = None;
    }

    pub fn state(&self, now_ms: u64) -> GateState {
        if self.debounce_elapsed(now_ms) {
            GateState::Armed
        } else {
            GateState::CoolingDown
        }
    }

    fn debounce_elapsed(&self, now_ms: u64) -> bool {
        match self.last_trigger_ms {
            None => true,
            // a clock stepping backwards reads as zero elapsed
            Some(last) => now_ms.saturating_sub(last) > self.config.debounce_ms,
        }
    }

    /// Evaluates every observation of one frame in order. Each blinking face
    /// checks the debounce against the timestamp as updated by the faces
    /// before it, so a frame yields zero or one request.
    pub fn evaluate(
        &mut self,
        observations: &[FaceObservation],
        now_ms: u64,
    ) -> Option<CaptureRequest> {
        let mut request = None;
        for (index, observation) in observations.iter().enumerate() {
            if !observation.has_eye_state() {
                trace!("[evaluate] face {} has no eye probabilities", index);
                continue;
            }
            if !observation.is_blink(self.config.closed_eye_threshold) {
                continue;
            }
            if self.debounce_elapsed(now_ms) {
                info!("[evaluate] blink detected on face {} at {}ms, requesting capture", index, now_ms);
                self.last_trigger_ms = Some(now_ms);
                request = Some(CaptureRequest { at_ms: now_ms });
            } else {
                debug!(
                    "[evaluate] blink on face {} suppressed, last capture at {:?}ms",
                    index, self.last_trigger_ms
                );
            }
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed() -> FaceObservation {
        FaceObservation::new(Some(0.1), Some(0.1))
    }

    #[test]
    fn first_blink_triggers() {
        let mut gate = BlinkCaptureGate::default();
        assert_eq!(gate.state(0), GateState::Armed);
        assert_eq!(gate.evaluate(&[closed()], 0), Some(CaptureRequest { at_ms: 0 }));
        assert_eq!(gate.last_trigger_ms(), Some(0));
    }

    #[test]
    fn blink_within_interval_is_suppressed() {
        let mut gate = BlinkCaptureGate::default();
        gate.evaluate(&[closed()], 0);
        assert_eq!(gate.evaluate(&[closed()], 200), None);
        assert_eq!(gate.last_trigger_ms(), Some(0));
        assert_eq!(gate.state(200), GateState::CoolingDown);
    }

    #[test]
    fn exactly_the_interval_is_still_cooling_down() {
        let mut gate = BlinkCaptureGate::default();
        gate.evaluate(&[closed()], 1_000);
        assert_eq!(gate.evaluate(&[closed()], 1_500), None);
        assert_eq!(gate.evaluate(&[closed()], 1_501), Some(CaptureRequest { at_ms: 1_501 }));
    }

    #[test]
    fn blink_after_interval_triggers_again() {
        let mut gate = BlinkCaptureGate::default();
        gate.evaluate(&[closed()], 0);
        assert_eq!(gate.evaluate(&[closed()], 600), Some(CaptureRequest { at_ms: 600 }));
        assert_eq!(gate.last_trigger_ms(), Some(600));
    }

    #[test]
    fn one_open_eye_never_triggers() {
        let mut gate = BlinkCaptureGate::default();
        assert_eq!(gate.evaluate(&[FaceObservation::new(Some(0.9), Some(0.1))], 1_000), None);
        assert_eq!(gate.evaluate(&[FaceObservation::new(Some(0.1), Some(0.4))], 1_000), None);
        assert_eq!(gate.evaluate(&[FaceObservation::new(Some(0.4), Some(0.4))], 1_000), None);
        assert_eq!(gate.last_trigger_ms(), None);
    }

    #[test]
    fn missing_probability_never_triggers() {
        let mut gate = BlinkCaptureGate::default();
        assert_eq!(gate.evaluate(&[FaceObservation::new(None, Some(0.1))], 1_000), None);
        assert_eq!(gate.evaluate(&[FaceObservation::new(Some(0.1), None)], 1_000), None);
        assert_eq!(gate.evaluate(&[FaceObservation::default()], 1_000), None);
        assert_eq!(gate.state(1_000), GateState::Armed);
    }

    #[test]
    fn empty_frame_is_a_no_op() {
        let mut gate = BlinkCaptureGate::default();
        assert_eq!(gate.evaluate(&[], 5), None);
        assert_eq!(gate.last_trigger_ms(), None);
    }

    #[test]
    fn two_blinking_faces_fire_once() {
        let mut gate = BlinkCaptureGate::default();
        gate.evaluate(&[closed()], 600);
        let frame = [closed(), FaceObservation::new(Some(0.2), Some(0.3))];
        assert_eq!(gate.evaluate(&frame, 2_000), Some(CaptureRequest { at_ms: 2_000 }));
        assert_eq!(gate.last_trigger_ms(), Some(2_000));
    }

    #[test]
    fn later_face_can_fire_after_non_qualifying_ones() {
        let mut gate = BlinkCaptureGate::default();
        let frame = [
            FaceObservation::new(Some(0.9), Some(0.9)),
            FaceObservation::new(None, None),
            closed(),
        ];
        assert_eq!(gate.evaluate(&frame, 10), Some(CaptureRequest { at_ms: 10 }));
    }

    #[test]
    fn non_qualifying_faces_do_not_change_outcomes() {
        let timeline = [0u64, 100, 450, 501, 700, 1_100, 1_200];
        let noise = [
            FaceObservation::new(Some(0.8), Some(0.95)),
            FaceObservation::new(None, Some(0.0)),
        ];

        let mut plain = BlinkCaptureGate::default();
        let mut noisy = BlinkCaptureGate::default();
        for &t in &timeline {
            let a = plain.evaluate(&[closed()], t);
            let b = noisy.evaluate(&[noise[0], closed(), noise[1]], t);
            assert_eq!(a, b, "diverged at {}ms", t);
        }
        assert_eq!(plain.last_trigger_ms(), noisy.last_trigger_ms());
    }

    #[test]
    fn clock_going_backwards_keeps_last_trigger() {
        let mut gate = BlinkCaptureGate::default();
        gate.evaluate(&[closed()], 10_000);
        assert_eq!(gate.evaluate(&[closed()], 2_000), None);
        assert_eq!(gate.last_trigger_ms(), Some(10_000));
    }

    #[test]
    fn zero_debounce_still_fires_once_per_frame() {
        let mut gate = BlinkCaptureGate::new(GateConfig {
            closed_eye_threshold: 0.4,
            debounce_ms: 0,
        });
        assert!(gate.evaluate(&[closed(), closed()], 7).is_some());
        assert_eq!(gate.evaluate(&[closed()], 7), None);
        assert!(gate.evaluate(&[closed()], 8).is_some());
    }

    #[test]
    fn custom_threshold_is_honoured() {
        let mut gate = BlinkCaptureGate::new(GateConfig {
            closed_eye_threshold: 0.2,
            debounce_ms: 500,
        });
        assert_eq!(gate.evaluate(&[FaceObservation::new(Some(0.3), Some(0.1))], 0), None);
        assert!(gate.evaluate(&[FaceObservation::new(Some(0.19), Some(0.1))], 0).is_some());
    }

    #[test]
    fn reset_rearms_the_gate() {
        let mut gate = BlinkCaptureGate::default();
        gate.evaluate(&[closed()], 100);
        gate.reset();
        assert_eq!(gate.state(101), GateState::Armed);
        assert!(gate.evaluate(&[closed()], 101).is_some());
    }
}
