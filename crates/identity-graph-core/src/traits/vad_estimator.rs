//! VAD Estimator trait: the external affect model the gate consumes.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{AppraisalRecord, Attachment, VadEstimate};

/// Predicts a (valence, arousal, dominance, confidence) tuple for an
/// appraised stimulus.
///
/// The numeric model is out of scope; the gate treats it as a leaf
/// dependency. The gate applies its own deadline around `estimate` and
/// fails closed on timeout, so implementations that go over the network
/// need no timeout of their own.
#[async_trait]
pub trait VadEstimator: Send + Sync {
    /// Estimate affect for a stimulus.
    ///
    /// # Arguments
    /// * `appraisal` - Categorical cognitive-appraisal variables
    /// * `prior_attachments` - Attachments providing prior context (the
    ///   gate passes none; upstream analysis passes the user's profile)
    /// * `sentiment_proxy` - Sentiment signal in [0, 1]
    ///
    /// # Errors
    /// - `EstimatorError` - Any failure; the gate fails closed on it
    async fn estimate(
        &self,
        appraisal: &AppraisalRecord,
        prior_attachments: &[Attachment],
        sentiment_proxy: f32,
    ) -> Result<VadEstimate>;
}
