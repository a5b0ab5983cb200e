//! Ephemeral per-feedback graph context.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::attachment::Attachment;

/// An attachment considered relevant to a judged interaction, annotated
/// with how strongly the system believes it was actually implicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivatedAttachment {
    /// The attachment itself, as read from the graph.
    pub attachment: Attachment,
    /// 1.0 when the interaction explicitly activated the attachment,
    /// a lower constant when it was only touched inside the window.
    pub activation_weight: f32,
}

impl ActivatedAttachment {
    /// Annotate an attachment with an activation weight.
    pub fn new(attachment: Attachment, activation_weight: f32) -> Self {
        Self {
            attachment,
            activation_weight,
        }
    }
}

/// Graph context computed per feedback record. Never persisted.
///
/// Holds the judged interaction's timestamp plus the candidate attachments:
/// the union of attachments explicitly activated by the interaction and
/// attachments whose user relationship was last touched within the
/// symmetric context window around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackContext {
    /// When the judged interaction happened.
    pub interaction_at: DateTime<Utc>,
    /// Candidate attachments with activation weights.
    pub attachments: Vec<ActivatedAttachment>,
}

impl FeedbackContext {
    /// True when there is nothing to learn from (the `skipped` outcome).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty()
    }
}
