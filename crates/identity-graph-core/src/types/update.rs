//! Calculated attribute updates written to the Audit Ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::attachment::{AttachmentId, AttachmentProperty};

/// One computed attribute delta for one attachment, produced by rule
/// evaluation and appended to the Audit Ledger 1:1 with each applied graph
/// mutation. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedUpdate {
    /// The attachment being mutated.
    pub attachment_id: AttachmentId,

    /// Which attribute changed.
    pub property: AttachmentProperty,

    /// Attribute value before the update.
    pub old_value: f32,

    /// Attribute value after clamping.
    pub new_value: f32,

    /// `new_value - old_value` (post-clamp; never zero, no-ops are dropped
    /// before an update is constructed).
    pub delta: f32,

    /// Name of the rule that produced this update.
    pub rule_applied: String,

    /// When the update was computed.
    pub computed_at: DateTime<Utc>,
}

impl CalculatedUpdate {
    /// Build an update from pre- and post-clamp values.
    pub fn new(
        attachment_id: AttachmentId,
        property: AttachmentProperty,
        old_value: f32,
        new_value: f32,
        rule_applied: impl Into<String>,
    ) -> Self {
        Self {
            attachment_id,
            property,
            old_value,
            new_value,
            delta: new_value - old_value,
            rule_applied: rule_applied.into(),
            computed_at: Utc::now(),
        }
    }
}
