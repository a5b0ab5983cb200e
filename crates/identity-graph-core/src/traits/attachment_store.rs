//! Attachment Store trait: the core's view of the Unified Identity Graph.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{AttachmentId, AttachmentProperty, FeedbackContext, InteractionId, UserId};

/// Query/update interface to the property graph holding a user's
/// Attachments.
///
/// The Learning Engine is the only writer in this crate; the Guardrail
/// Gate never mutates the graph. Implementations back onto the deployed
/// graph database; an in-memory stub lives in [`crate::stubs`] for tests.
///
/// # Implementation Notes
///
/// - All methods are async for I/O flexibility
/// - The trait requires `Send + Sync` for concurrent access
/// - Implementations should log failures via `tracing` before returning
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Load the graph context for a judged interaction.
    ///
    /// Returns the interaction's timestamp plus the union of
    /// (i) attachments explicitly linked to the interaction and
    /// (ii) attachments whose user relationship was last touched within a
    /// symmetric window of the interaction's timestamp, each annotated
    /// with its activation weight.
    ///
    /// # Arguments
    /// * `interaction_id` - The response the feedback judges
    /// * `user_id` - The feedback author; interactions recorded under a
    ///   different user do not match
    ///
    /// # Returns
    /// `Some(context)` when the interaction is known (the attachment list
    /// may still be empty), `None` when it is not.
    ///
    /// # Errors
    /// - `StorageError::Backend` - Graph backend failure
    async fn feedback_context(
        &self,
        interaction_id: InteractionId,
        user_id: UserId,
    ) -> Result<Option<FeedbackContext>>;

    /// Write one attribute of one attachment.
    ///
    /// The store persists `new_value` as given; callers clamp through
    /// [`AttachmentProperty::clamp`] before calling.
    ///
    /// # Returns
    /// `true` if the attachment existed and was updated, `false` if not
    /// found.
    ///
    /// # Errors
    /// - `StorageError::Backend` - Graph backend failure
    async fn update_attribute(
        &self,
        user_id: UserId,
        attachment_id: AttachmentId,
        property: AttachmentProperty,
        new_value: f32,
    ) -> Result<bool>;
}
