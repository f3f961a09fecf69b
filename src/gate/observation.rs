use serde::{Deserialize, Serialize};

/// One face's eye-state readout for a single frame. Probabilities are in
/// [0, 1]; a detector without classification leaves them unset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FaceObservation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_eye_open_probability: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_eye_open_probability: Option<f32>,
}

impl FaceObservation {
    pub fn new(left: Option<f32>, right: Option<f32>) -> Self {
        Self {
            left_eye_open_probability: left,
            right_eye_open_probability: right,
        }
    }

    pub fn has_eye_state(&self) -> bool {
        self.left_eye_open_probability.is_some() && self.right_eye_open_probability.is_some()
    }

    /// Both eyes closed. Unknown eye state is never a blink.
    pub fn is_blink(&self, closed_eye_threshold: f32) -> bool {
        match (self.left_eye_open_probability, self.right_eye_open_probability) {
            (Some(left), Some(right)) => left < closed_eye_threshold && right < closed_eye_threshold,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_deserialize_as_none() {
        let obs: FaceObservation = serde_json::from_str(r#"{"right_eye_open_probability":0.1}"#).unwrap();
        assert_eq!(obs.left_eye_open_probability, None);
        assert_eq!(obs.right_eye_open_probability, Some(0.1));
        assert!(!obs.has_eye_state());
        assert!(!obs.is_blink(0.4));
    }

    #[test]
    fn nan_probability_is_not_closed() {
        let obs = FaceObservation::new(Some(f32::NAN), Some(0.1));
        assert!(!obs.is_blink(0.4));
    }
}
