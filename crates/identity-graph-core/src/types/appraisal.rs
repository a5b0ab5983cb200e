//! Minimal appraisal records and VAD estimates.
//!
//! The gate builds a fixed appraisal shape for candidate responses and
//! consumes the estimate as an already-computed input; the numeric model
//! behind [`crate::traits::VadEstimator`] is out of scope.

use serde::{Deserialize, Serialize};

/// Where the appraised stimulus originates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StimulusSource {
    /// Produced outside the user (an assistant response is external).
    External,
    /// Produced by the user's own cognition.
    Internal,
}

/// Whose situation the stimulus concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    /// Directed at the appraising user.
    SelfDirected,
    /// Directed at someone else.
    OtherDirected,
}

/// Temporal framing of the stimulus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    /// Concerns something already over.
    Past,
    /// Concerns the current moment.
    Present,
    /// Concerns something anticipated.
    Future,
}

/// How settled the appraiser is about accepting the stimulus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptanceState {
    /// Taken at face value.
    Accepted,
    /// Not yet settled either way.
    Uncertain,
    /// Actively rejected.
    Rejected,
}

/// The categorical cognitive-appraisal variables handed to the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppraisalRecord {
    /// Stimulus origin.
    pub source: StimulusSource,
    /// Whose situation it concerns.
    pub perspective: Perspective,
    /// Temporal framing.
    pub timeframe: Timeframe,
    /// Acceptance stance.
    pub acceptance: AcceptanceState,
}

impl AppraisalRecord {
    /// The fixed appraisal shape for a not-yet-delivered candidate response:
    /// externally sourced, self-directed, present tense, uncertain
    /// acceptance.
    pub fn for_candidate_response() -> Self {
        Self {
            source: StimulusSource::External,
            perspective: Perspective::SelfDirected,
            timeframe: Timeframe::Present,
            acceptance: AcceptanceState::Uncertain,
        }
    }
}

/// A predicted (valence, arousal, dominance, confidence) tuple.
///
/// Valence, arousal, and dominance are in [-1, 1]; confidence in [0, 1].
/// Constructors clamp so downstream threshold comparisons never see an
/// out-of-range axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VadEstimate {
    /// Predicted valence.
    pub valence: f32,
    /// Predicted arousal.
    pub arousal: f32,
    /// Predicted dominance.
    pub dominance: f32,
    /// Estimator confidence in the prediction.
    pub confidence: f32,
}

impl VadEstimate {
    /// Build an estimate, clamping each axis into its interval.
    pub fn new(valence: f32, arousal: f32, dominance: f32, confidence: f32) -> Self {
        Self {
            valence: valence.clamp(-1.0, 1.0),
            arousal: arousal.clamp(-1.0, 1.0),
            dominance: dominance.clamp(-1.0, 1.0),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// A neutral estimate: all affect axes at rest, full confidence.
    pub fn neutral() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_response_appraisal_shape() {
        let a = AppraisalRecord::for_candidate_response();
        assert_eq!(a.source, StimulusSource::External);
        assert_eq!(a.perspective, Perspective::SelfDirected);
        assert_eq!(a.timeframe, Timeframe::Present);
        assert_eq!(a.acceptance, AcceptanceState::Uncertain);
    }

    #[test]
    fn test_estimate_clamps_axes() {
        let e = VadEstimate::new(-2.0, 1.5, 0.3, 7.0);
        assert_eq!(e.valence, -1.0);
        assert_eq!(e.arousal, 1.0);
        assert_eq!(e.dominance, 0.3);
        assert_eq!(e.confidence, 1.0);
    }

    #[test]
    fn test_neutral() {
        let e = VadEstimate::neutral();
        assert_eq!(e.valence, 0.0);
        assert_eq!(e.arousal, 0.0);
        assert_eq!(e.dominance, 0.0);
        assert_eq!(e.confidence, 1.0);
    }
}
