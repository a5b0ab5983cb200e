//! In-memory stub implementation of [`AuditLedger`].
//!
//! # TEST ONLY - NOT FOR PRODUCTION
//!
//! Append-only vectors behind `parking_lot` mutexes, with failure
//! injection switches for both write paths so tests can exercise the
//! best-effort and must-succeed contracts separately.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{LedgerError, Result};
use crate::traits::AuditLedger;
use crate::types::{CalculatedUpdate, FeedbackId, GuardrailAlert};

/// In-memory append-only audit ledger.
///
/// # TEST ONLY - NOT FOR PRODUCTION
#[derive(Default)]
pub struct InMemoryAuditLedger {
    alerts: Mutex<Vec<GuardrailAlert>>,
    updates: Mutex<Vec<(FeedbackId, CalculatedUpdate)>>,
    fail_alerts: AtomicBool,
    fail_updates: AtomicBool,
}

impl InMemoryAuditLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `append_alert` fail.
    pub fn set_fail_alerts(&self, fail: bool) {
        self.fail_alerts.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `append_update` fail.
    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of appended alerts.
    pub fn alerts(&self) -> Vec<GuardrailAlert> {
        self.alerts.lock().clone()
    }

    /// Snapshot of appended updates.
    pub fn updates(&self) -> Vec<(FeedbackId, CalculatedUpdate)> {
        self.updates.lock().clone()
    }

    /// Number of appended updates.
    pub fn update_count(&self) -> usize {
        self.updates.lock().len()
    }
}

#[async_trait]
impl AuditLedger for InMemoryAuditLedger {
    async fn append_alert(&self, alert: &GuardrailAlert) -> Result<()> {
        if self.fail_alerts.load(Ordering::SeqCst) {
            return Err(LedgerError::WriteFailed("injected alert failure".to_string()).into());
        }
        self.alerts.lock().push(alert.clone());
        Ok(())
    }

    async fn append_update(
        &self,
        feedback_id: FeedbackId,
        update: &CalculatedUpdate,
    ) -> Result<()> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(LedgerError::WriteFailed("injected update failure".to_string()).into());
        }
        self.updates.lock().push((feedback_id, update.clone()));
        Ok(())
    }
}
