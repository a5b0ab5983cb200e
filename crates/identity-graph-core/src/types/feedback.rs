//! Normalized user feedback records.
//!
//! Two concrete feedback kinds arrive from the intake write paths:
//! resonance flags (explicit "didn't land" signals with reason tags) and
//! coherence ratings (1-5). Both are normalized into a single tagged-union
//! [`FeedbackRecord`] at ingestion, so downstream readers never do
//! defensive multi-field lookups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::attachment::UserId;

/// Type alias for feedback record identifiers.
pub type FeedbackId = Uuid;

/// Type alias for interaction (assistant response) identifiers.
pub type InteractionId = Uuid;

/// Kind discriminant for a feedback record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    /// Explicit negative reaction with reason tags.
    Resonance,
    /// 1-5 rating of how well a response matched the user's needs.
    Coherence,
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Resonance => "resonance",
            Self::Coherence => "coherence",
        };
        write!(f, "{}", s)
    }
}

/// The payload of a feedback record, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedbackValue {
    /// Resonance flag: free-form reason tags (e.g. "values_mismatch").
    Resonance {
        /// Reason tags attached by the user.
        tags: Vec<String>,
    },
    /// Coherence rating in [1, 5].
    Coherence {
        /// The rating itself.
        rating: u8,
    },
}

impl FeedbackValue {
    /// Kind discriminant for this payload.
    #[inline]
    pub fn kind(&self) -> FeedbackKind {
        match self {
            Self::Resonance { .. } => FeedbackKind::Resonance,
            Self::Coherence { .. } => FeedbackKind::Coherence,
        }
    }
}

/// A single normalized feedback event.
///
/// Lifecycle: created append-only with `processed_at = None`; read once by
/// the Learning Engine; transitions to `processed_at = Some(..)` exactly
/// once and is immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// Unique identifier for this record.
    pub id: FeedbackId,

    /// The user who gave the feedback.
    pub user_id: UserId,

    /// The assistant response being judged.
    pub interaction_id: InteractionId,

    /// Tagged payload.
    pub value: FeedbackValue,

    /// When the feedback was submitted.
    pub submitted_at: DateTime<Utc>,

    /// When the Learning Engine finished with this record. `None` means
    /// eligible for the next batch.
    pub processed_at: Option<DateTime<Utc>>,
}

impl FeedbackRecord {
    /// Create a resonance flag record.
    pub fn resonance(
        user_id: UserId,
        interaction_id: InteractionId,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            interaction_id,
            value: FeedbackValue::Resonance { tags },
            submitted_at: Utc::now(),
            processed_at: None,
        }
    }

    /// Create a coherence rating record.
    ///
    /// # Panics
    /// Panics if `rating` is outside [1, 5]; intake normalizes before
    /// constructing records, so an out-of-range rating here is a bug.
    pub fn coherence(user_id: UserId, interaction_id: InteractionId, rating: u8) -> Self {
        assert!(
            (1..=5).contains(&rating),
            "coherence rating must be 1-5, got {}",
            rating
        );
        Self {
            id: Uuid::new_v4(),
            user_id,
            interaction_id,
            value: FeedbackValue::Coherence { rating },
            submitted_at: Utc::now(),
            processed_at: None,
        }
    }

    /// Kind discriminant for this record.
    #[inline]
    pub fn kind(&self) -> FeedbackKind {
        self.value.kind()
    }

    /// Whether this record has already been processed.
    #[inline]
    pub fn is_processed(&self) -> bool {
        self.processed_at.is_some()
    }
}
