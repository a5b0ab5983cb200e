//! Audit Ledger trait: append-only compliance record.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{CalculatedUpdate, FeedbackId, GuardrailAlert};

/// Append-only record of every computed update and every safety alert.
///
/// Two write paths with different failure contracts:
/// - [`append_alert`](AuditLedger::append_alert) is best-effort: the gate
///   logs a failure and still returns its decision
/// - [`append_update`](AuditLedger::append_update) must succeed for a batch
///   item to count as fully processed
#[async_trait]
pub trait AuditLedger: Send + Sync {
    /// Append a guardrail alert.
    ///
    /// # Errors
    /// - `LedgerError::WriteFailed` / `LedgerError::Unavailable` - the
    ///   caller logs and swallows these; they never change the gate's
    ///   decision
    async fn append_alert(&self, alert: &GuardrailAlert) -> Result<()>;

    /// Append a calculated update, keyed by the feedback that caused it.
    ///
    /// # Errors
    /// - `LedgerError::WriteFailed` / `LedgerError::Unavailable` - the
    ///   engine treats these as a record-level failure and retries the
    ///   whole record in a later batch
    async fn append_update(&self, feedback_id: FeedbackId, update: &CalculatedUpdate)
        -> Result<()>;
}
