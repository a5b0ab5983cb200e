//! The asynchronous feedback learning engine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::LearningConfig;
use crate::error::Result;
use crate::traits::{AttachmentStore, AuditLedger, FeedbackSource};
use crate::types::FeedbackRecord;

use super::rules::{default_rules, evaluate_rules, UpdateRule};
use super::selection::select_top_by_activation;

/// Cooperative cancellation flag shared between an engine and its
/// operator. Checked between records: the current record always finishes,
/// so cancellation never leaves a record half-updated.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create an unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop after the in-flight record.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether a stop has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Aggregate counts for one batch run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Records whose updates (possibly zero) were fully applied and which
    /// were marked processed.
    pub processed: usize,
    /// Records left unprocessed for a future batch after a failure.
    pub failed: usize,
    /// Records with no relevant graph context to learn from.
    pub skipped: usize,
}

impl BatchReport {
    /// Total records the batch looked at.
    #[inline]
    pub fn total(&self) -> usize {
        self.processed + self.failed + self.skipped
    }
}

/// Terminal state of one record within a batch.
enum RecordOutcome {
    Processed,
    Skipped,
    Failed,
}

/// Background batch worker that turns user feedback into bounded,
/// audited mutations of the Unified Identity Graph.
///
/// The central split: [`evaluate_rules`](super::rules::evaluate_rules)
/// computes deltas purely from a snapshot, and the engine applies them
/// with per-record failure isolation. A record either ends fully applied
/// and marked processed, or is left untouched in the queue for the next
/// batch. It is never half-marked.
pub struct LearningEngine {
    source: Arc<dyn FeedbackSource>,
    store: Arc<dyn AttachmentStore>,
    ledger: Arc<dyn AuditLedger>,
    rules: Vec<UpdateRule>,
    config: LearningConfig,
    cancel: CancelFlag,
}

impl LearningEngine {
    /// Create an engine with the reference rule table.
    ///
    /// # Errors
    /// Returns `ConfigError` on invalid configuration. Fatal at startup.
    pub fn new(
        source: Arc<dyn FeedbackSource>,
        store: Arc<dyn AttachmentStore>,
        ledger: Arc<dyn AuditLedger>,
        config: LearningConfig,
    ) -> Result<Self> {
        Self::with_rules(source, store, ledger, config, default_rules())
    }

    /// Create an engine with an alternate rule table.
    ///
    /// # Errors
    /// Returns `ConfigError` on invalid configuration. Fatal at startup.
    pub fn with_rules(
        source: Arc<dyn FeedbackSource>,
        store: Arc<dyn AttachmentStore>,
        ledger: Arc<dyn AuditLedger>,
        config: LearningConfig,
        rules: Vec<UpdateRule>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source,
            store,
            ledger,
            rules,
            config,
            cancel: CancelFlag::new(),
        })
    }

    /// The engine's cancellation flag, for handing to an operator task.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// The active configuration.
    pub fn config(&self) -> &LearningConfig {
        &self.config
    }

    /// Pull up to `max_items` unprocessed feedback records and work through
    /// them with per-record failure isolation.
    ///
    /// # Errors
    /// Only the initial fetch can fail the whole call; everything after is
    /// isolated per record and reflected in the report's counters.
    pub async fn process_batch(&self, max_items: usize) -> Result<BatchReport> {
        let records = self.source.fetch_unprocessed(max_items).await?;
        debug!(count = records.len(), "fetched unprocessed feedback");

        let mut report = BatchReport::default();
        for record in &records {
            if self.cancel.is_cancelled() {
                info!(
                    remaining = records.len() - report.total(),
                    "batch cancelled between records"
                );
                break;
            }
            match self.process_record(record).await {
                RecordOutcome::Processed => report.processed += 1,
                RecordOutcome::Skipped => report.skipped += 1,
                RecordOutcome::Failed => report.failed += 1,
            }
        }

        info!(
            processed = report.processed,
            failed = report.failed,
            skipped = report.skipped,
            "learning batch complete"
        );
        Ok(report)
    }

    /// Work through one record: context, selection, rule evaluation,
    /// apply, mark.
    async fn process_record(&self, record: &FeedbackRecord) -> RecordOutcome {
        let context = match self
            .store
            .feedback_context(record.interaction_id, record.user_id)
            .await
        {
            Ok(Some(context)) => context,
            Ok(None) => {
                info!(
                    feedback_id = %record.id,
                    interaction_id = %record.interaction_id,
                    "no graph context for interaction; skipping"
                );
                return self.finish(record, RecordOutcome::Skipped).await;
            }
            Err(e) => {
                warn!(feedback_id = %record.id, error = %e, "context query failed");
                return RecordOutcome::Failed;
            }
        };

        if context.is_empty() {
            info!(feedback_id = %record.id, "no relevant attachments; skipping");
            return self.finish(record, RecordOutcome::Skipped).await;
        }

        let top = select_top_by_activation(context.attachments, self.config.top_activations);
        let updates = evaluate_rules(record, &top, &self.rules);

        if updates.is_empty() {
            // No applicable rules is a valid terminal state, not a failure.
            debug!(feedback_id = %record.id, "no rules fired");
            return self.finish(record, RecordOutcome::Processed).await;
        }

        // Apply sequentially; first failure aborts the rest of this
        // record's updates and leaves it eligible for the next batch.
        for update in &updates {
            let applied = self
                .store
                .update_attribute(
                    record.user_id,
                    update.attachment_id,
                    update.property,
                    update.new_value,
                )
                .await;
            match applied {
                Ok(true) => {}
                Ok(false) => {
                    warn!(
                        feedback_id = %record.id,
                        attachment_id = %update.attachment_id,
                        "attachment vanished mid-update; record left for retry"
                    );
                    return RecordOutcome::Failed;
                }
                Err(e) => {
                    warn!(
                        feedback_id = %record.id,
                        attachment_id = %update.attachment_id,
                        error = %e,
                        "graph write failed; record left for retry"
                    );
                    return RecordOutcome::Failed;
                }
            }

            if let Err(e) = self.ledger.append_update(record.id, update).await {
                warn!(
                    feedback_id = %record.id,
                    error = %e,
                    "audit append failed; record left for retry"
                );
                return RecordOutcome::Failed;
            }
        }

        debug!(
            feedback_id = %record.id,
            updates = updates.len(),
            "record applied"
        );
        self.finish(record, RecordOutcome::Processed).await
    }

    /// Mark a record processed and return the intended outcome.
    ///
    /// Skipped records are marked too: "nothing to learn from" is terminal
    /// and re-examining the record next batch would find the same nothing.
    /// A `false` mark means another run won the race; the outcome stands
    /// and this run's work was a no-op.
    async fn finish(&self, record: &FeedbackRecord, outcome: RecordOutcome) -> RecordOutcome {
        match self.source.mark_processed(record.id).await {
            Ok(true) => outcome,
            Ok(false) => {
                debug!(feedback_id = %record.id, "record already marked by another run");
                outcome
            }
            Err(e) => {
                warn!(feedback_id = %record.id, error = %e, "mark_processed failed");
                RecordOutcome::Failed
            }
        }
    }
}
