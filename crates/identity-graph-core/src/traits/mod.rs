//! Collaborator traits for the identity graph pipeline.
//!
//! These traits form the contract between the core and its out-of-scope
//! collaborators (graph backend, relational ledger, affect model, template
//! service, intake storage). They prescribe no wire format: implementations
//! may be in-process calls, RPC clients, or embedded SDK calls.
//!
//! # Traits
//!
//! - [`AttachmentStore`]: Unified Identity Graph query/update
//! - [`AuditLedger`]: append-only alert/update record
//! - [`VadEstimator`]: external affect model
//! - [`FallbackProvider`]: pre-approved safe utterances
//! - [`FeedbackSource`]: unprocessed-feedback read side

mod attachment_store;
mod audit_ledger;
mod fallback;
mod feedback_source;
mod vad_estimator;

pub use attachment_store::AttachmentStore;
pub use audit_ledger::AuditLedger;
pub use fallback::{FallbackContext, FallbackProvider};
pub use feedback_source::FeedbackSource;
pub use vad_estimator::VadEstimator;
