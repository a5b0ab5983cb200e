//! Domain types for the identity graph pipeline.
//!
//! - [`Attachment`] / [`AttachmentKind`] / [`AttachmentProperty`]: graph nodes
//!   and their clamped numeric attributes
//! - [`FeedbackRecord`] / [`FeedbackValue`]: normalized user feedback
//! - [`FeedbackContext`] / [`ActivatedAttachment`]: ephemeral per-feedback
//!   graph context
//! - [`CalculatedUpdate`]: audited attribute deltas
//! - [`GuardrailAlert`] / [`AlertType`] / [`TriggeringData`]: safety alerts
//! - [`AppraisalRecord`] / [`VadEstimate`]: estimator input/output shapes

mod alert;
mod appraisal;
mod attachment;
mod context;
mod feedback;
mod update;

pub use alert::{AlertType, GuardrailAlert, TriggeringData};
pub use appraisal::{
    AcceptanceState, AppraisalRecord, Perspective, StimulusSource, Timeframe, VadEstimate,
};
pub use attachment::{Attachment, AttachmentId, AttachmentKind, AttachmentProperty, UserId};
pub use context::{ActivatedAttachment, FeedbackContext};
pub use feedback::{FeedbackId, FeedbackKind, FeedbackRecord, FeedbackValue, InteractionId};
pub use update::CalculatedUpdate;
