//! Stub implementations of [`VadEstimator`].
//!
//! # TEST ONLY - NOT FOR PRODUCTION
//!
//! The real estimator is an external affect model; these stubs make gate
//! behavior deterministic per test: a fixed estimate, an injected failure,
//! or an injected delay for timeout tests.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{EstimatorError, Result};
use crate::traits::VadEstimator;
use crate::types::{AppraisalRecord, Attachment, VadEstimate};

/// Returns a fixed estimate (or a fixed failure) on every call.
///
/// # TEST ONLY - NOT FOR PRODUCTION
pub struct FixedVadEstimator {
    estimate: Option<VadEstimate>,
    delay: Option<Duration>,
}

impl FixedVadEstimator {
    /// Always answer with `estimate`.
    pub fn new(estimate: VadEstimate) -> Self {
        Self {
            estimate: Some(estimate),
            delay: None,
        }
    }

    /// Always fail with `EstimatorError::Unavailable`.
    pub fn failing() -> Self {
        Self {
            estimate: None,
            delay: None,
        }
    }

    /// Sleep before answering, for deadline tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl VadEstimator for FixedVadEstimator {
    async fn estimate(
        &self,
        _appraisal: &AppraisalRecord,
        _prior_attachments: &[Attachment],
        _sentiment_proxy: f32,
    ) -> Result<VadEstimate> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.estimate {
            Some(estimate) => Ok(estimate),
            None => Err(EstimatorError::Unavailable("stub configured to fail".to_string()).into()),
        }
    }
}
