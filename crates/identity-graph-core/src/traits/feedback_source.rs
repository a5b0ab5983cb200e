//! Feedback source trait: the engine's read side of Feedback Intake.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{FeedbackId, FeedbackRecord};

/// The Learning Engine's only contract with Feedback Intake:
/// "give me unprocessed records, up to N" plus a single idempotent mark.
///
/// # Concurrency
///
/// The `processed_at IS NULL` selection plus the atomic mark is the guard
/// against two batch runs processing the same record: first writer wins,
/// the loser's mark returns `false` and its work is a no-op.
#[async_trait]
pub trait FeedbackSource: Send + Sync {
    /// Fetch up to `max` records with `processed_at = None`.
    ///
    /// Reference ordering is resonance before coherence, oldest first, but
    /// ordering across kinds is not load-bearing; both kinds must
    /// eventually drain.
    ///
    /// # Errors
    /// - `StorageError::Backend` - Intake backend failure
    async fn fetch_unprocessed(&self, max: usize) -> Result<Vec<FeedbackRecord>>;

    /// Mark a record processed. Idempotent.
    ///
    /// # Returns
    /// `true` if this call performed the transition, `false` if the record
    /// was already marked (or unknown).
    ///
    /// # Errors
    /// - `StorageError::Backend` - Intake backend failure
    async fn mark_processed(&self, id: FeedbackId) -> Result<bool>;
}
