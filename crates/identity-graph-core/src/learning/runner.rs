//! Interval runner for the learning engine.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::engine::LearningEngine;

/// Drives [`LearningEngine::process_batch`] on a fixed interval until the
/// engine's cancellation flag is raised.
///
/// Deliberately has no retry policy of its own: a failed batch (or a
/// failed record within one) is simply picked up again on the next tick.
pub struct BatchRunner {
    engine: Arc<LearningEngine>,
    period: Duration,
    batch_size: usize,
}

impl BatchRunner {
    /// Create a runner using the engine's configured default batch size.
    pub fn new(engine: Arc<LearningEngine>, period: Duration) -> Self {
        let batch_size = engine.config().default_batch_size;
        Self {
            engine,
            period,
            batch_size,
        }
    }

    /// Override the per-tick batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Run until cancelled. One batch per tick; a slow batch delays the
    /// next tick rather than overlapping it.
    pub async fn run(self) {
        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        let cancel = self.engine.cancel_flag();

        info!(period_ms = self.period.as_millis() as u64, "batch runner started");
        loop {
            interval.tick().await;
            if cancel.is_cancelled() {
                break;
            }
            match self.engine.process_batch(self.batch_size).await {
                Ok(report) => {
                    if report.total() > 0 {
                        info!(
                            processed = report.processed,
                            failed = report.failed,
                            skipped = report.skipped,
                            "scheduled batch finished"
                        );
                    }
                }
                Err(e) => {
                    // Next tick is the retry.
                    warn!(error = %e, "scheduled batch failed to fetch");
                }
            }
            if cancel.is_cancelled() {
                break;
            }
        }
        info!("batch runner stopped");
    }
}
