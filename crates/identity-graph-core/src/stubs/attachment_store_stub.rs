//! In-memory stub implementation of [`AttachmentStore`].
//!
//! # TEST ONLY - NOT FOR PRODUCTION
//!
//! Thread-safe via `DashMap`, no persistence, linear scans. Implements the
//! real context-window semantics (explicit activations plus attachments
//! touched inside the window) so engine tests exercise genuine behavior
//! rather than mocks. Supports injected write failures for
//! partial-failure-isolation tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::{DashMap, DashSet};
use tracing::debug;

use crate::config::constants::learning;
use crate::error::{Result, StorageError};
use crate::traits::AttachmentStore;
use crate::types::{
    ActivatedAttachment, Attachment, AttachmentId, AttachmentProperty, FeedbackContext,
    InteractionId, UserId,
};

/// A recorded interaction: who it belonged to, when it happened, and which
/// attachments it explicitly activated.
#[derive(Debug, Clone)]
struct InteractionRecord {
    user_id: UserId,
    at: DateTime<Utc>,
    activated: Vec<AttachmentId>,
}

/// In-memory Unified Identity Graph.
///
/// # TEST ONLY - NOT FOR PRODUCTION
pub struct InMemoryAttachmentStore {
    attachments: DashMap<AttachmentId, Attachment>,
    interactions: DashMap<InteractionId, InteractionRecord>,
    /// When each user-attachment relationship was last touched.
    touched_at: DashMap<AttachmentId, DateTime<Utc>>,
    window: chrono::Duration,
    implicit_weight: f32,
    fail_updates: AtomicBool,
    failing_attachments: DashSet<AttachmentId>,
}

impl InMemoryAttachmentStore {
    /// Create a store with the reference window and weights.
    pub fn new() -> Self {
        Self {
            attachments: DashMap::new(),
            interactions: DashMap::new(),
            touched_at: DashMap::new(),
            window: chrono::Duration::minutes(learning::CONTEXT_WINDOW_MINUTES),
            implicit_weight: learning::IMPLICIT_ACTIVATION_WEIGHT,
            fail_updates: AtomicBool::new(false),
            failing_attachments: DashSet::new(),
        }
    }

    /// Override the symmetric context window half-width.
    pub fn with_window(mut self, window: chrono::Duration) -> Self {
        self.window = window;
        self
    }

    /// Seed an attachment.
    pub fn insert_attachment(&self, attachment: Attachment) {
        self.attachments.insert(attachment.id, attachment);
    }

    /// Record an interaction and which attachments it explicitly activated.
    pub fn record_interaction(
        &self,
        interaction_id: InteractionId,
        user_id: UserId,
        at: DateTime<Utc>,
        activated: Vec<AttachmentId>,
    ) {
        self.interactions
            .insert(interaction_id, InteractionRecord { user_id, at, activated });
    }

    /// Mark a user-attachment relationship as touched at `at`.
    pub fn touch_relationship(&self, attachment_id: AttachmentId, at: DateTime<Utc>) {
        self.touched_at.insert(attachment_id, at);
    }

    /// Read back an attachment for test assertions.
    pub fn attachment(&self, id: &AttachmentId) -> Option<Attachment> {
        self.attachments.get(id).map(|a| a.value().clone())
    }

    /// Make every subsequent `update_attribute` fail with a backend error.
    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// Make updates fail for one attachment only, leaving the rest of the
    /// store healthy. For partial-failure-isolation tests.
    pub fn fail_attachment(&self, attachment_id: AttachmentId) {
        self.failing_attachments.insert(attachment_id);
    }
}

impl Default for InMemoryAttachmentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AttachmentStore for InMemoryAttachmentStore {
    async fn feedback_context(
        &self,
        interaction_id: InteractionId,
        user_id: UserId,
    ) -> Result<Option<FeedbackContext>> {
        let interaction = match self.interactions.get(&interaction_id) {
            Some(i) if i.user_id == user_id => i.value().clone(),
            _ => return Ok(None),
        };

        let mut out: Vec<ActivatedAttachment> = Vec::new();

        for id in &interaction.activated {
            if let Some(attachment) = self.attachments.get(id) {
                out.push(ActivatedAttachment::new(attachment.value().clone(), 1.0));
            }
        }

        // Union in attachments touched inside the symmetric window, at the
        // lower implicit weight.
        for entry in self.touched_at.iter() {
            let (id, touched) = (entry.key(), *entry.value());
            if out.iter().any(|a| a.attachment.id == *id) {
                continue;
            }
            if (touched - interaction.at).abs() > self.window {
                continue;
            }
            if let Some(attachment) = self.attachments.get(id) {
                if attachment.user_id == user_id {
                    out.push(ActivatedAttachment::new(
                        attachment.value().clone(),
                        self.implicit_weight,
                    ));
                }
            }
        }

        debug!(
            %interaction_id,
            candidates = out.len(),
            "stub context assembled"
        );
        Ok(Some(FeedbackContext {
            interaction_at: interaction.at,
            attachments: out,
        }))
    }

    async fn update_attribute(
        &self,
        user_id: UserId,
        attachment_id: AttachmentId,
        property: AttachmentProperty,
        new_value: f32,
    ) -> Result<bool> {
        if self.fail_updates.load(Ordering::SeqCst)
            || self.failing_attachments.contains(&attachment_id)
        {
            return Err(StorageError::Backend("injected update failure".to_string()).into());
        }
        match self.attachments.get_mut(&attachment_id) {
            Some(mut attachment) if attachment.user_id == user_id => {
                attachment.set(property, new_value);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
