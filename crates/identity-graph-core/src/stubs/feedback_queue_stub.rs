//! In-memory stub implementation of [`FeedbackSource`].
//!
//! # TEST ONLY - NOT FOR PRODUCTION
//!
//! Implements the reference ordering (resonance before coherence, oldest
//! first) and the idempotent first-writer-wins mark.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use crate::error::Result;
use crate::traits::FeedbackSource;
use crate::types::{FeedbackId, FeedbackKind, FeedbackRecord};

/// In-memory feedback queue.
///
/// # TEST ONLY - NOT FOR PRODUCTION
#[derive(Default)]
pub struct InMemoryFeedbackQueue {
    records: Mutex<Vec<FeedbackRecord>>,
}

impl InMemoryFeedbackQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record (intake write path).
    pub fn push(&self, record: FeedbackRecord) {
        self.records.lock().push(record);
    }

    /// Read back a record for test assertions.
    pub fn record(&self, id: &FeedbackId) -> Option<FeedbackRecord> {
        self.records.lock().iter().find(|r| r.id == *id).cloned()
    }

    /// How many records are still unprocessed.
    pub fn unprocessed_count(&self) -> usize {
        self.records.lock().iter().filter(|r| !r.is_processed()).count()
    }
}

#[async_trait]
impl FeedbackSource for InMemoryFeedbackQueue {
    async fn fetch_unprocessed(&self, max: usize) -> Result<Vec<FeedbackRecord>> {
        let records = self.records.lock();
        let mut unprocessed: Vec<FeedbackRecord> = records
            .iter()
            .filter(|r| !r.is_processed())
            .cloned()
            .collect();
        // Reference ordering: resonance first, then oldest first.
        unprocessed.sort_by(|a, b| {
            let kind_rank = |r: &FeedbackRecord| match r.kind() {
                FeedbackKind::Resonance => 0u8,
                FeedbackKind::Coherence => 1u8,
            };
            kind_rank(a)
                .cmp(&kind_rank(b))
                .then(a.submitted_at.cmp(&b.submitted_at))
        });
        unprocessed.truncate(max);
        Ok(unprocessed)
    }

    async fn mark_processed(&self, id: FeedbackId) -> Result<bool> {
        let mut records = self.records.lock();
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) if record.processed_at.is_none() => {
                record.processed_at = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
