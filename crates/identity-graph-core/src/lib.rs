//! Identity Graph Core Library
//!
//! Provides the Adaptive Safety & Identity-Graph Learning pipeline for the
//! Unified Identity Graph (UIG): a synchronous response-risk gate paired
//! with an asynchronous feedback-driven learning loop over a per-user
//! graph of typed Attachment nodes.
//!
//! # Architecture
//!
//! This crate defines:
//! - Domain types (`Attachment`, `FeedbackRecord`, `CalculatedUpdate`,
//!   `GuardrailAlert`, etc.)
//! - Collaborator traits (`AttachmentStore`, `AuditLedger`, `VadEstimator`,
//!   `FallbackProvider`, `FeedbackSource`)
//! - The [`guardrail::GuardrailGate`] request-path safety check
//! - The [`learning::LearningEngine`] batch worker and its declarative
//!   rule table
//! - Configuration structures and error types
//! - In-memory stub implementations for testing
//!
//! # Example
//!
//! ```
//! use identity_graph_core::learning::{default_rules, evaluate_rules};
//! use identity_graph_core::types::{
//!     ActivatedAttachment, Attachment, AttachmentKind, FeedbackRecord,
//! };
//! use uuid::Uuid;
//!
//! let user_id = Uuid::new_v4();
//! let record = FeedbackRecord::resonance(
//!     user_id,
//!     Uuid::new_v4(),
//!     vec!["values_mismatch".to_string()],
//! );
//! let value = Attachment::new(user_id, AttachmentKind::Value, "honesty", 5.0, 2.0, 0.5);
//! let context = vec![ActivatedAttachment::new(value, 1.0)];
//!
//! let updates = evaluate_rules(&record, &context, &default_rules());
//! assert_eq!(updates.len(), 1);
//! assert!((updates[0].new_value - 4.5).abs() < 1e-6);
//! ```

pub mod config;
pub mod error;
pub mod guardrail;
pub mod learning;
pub mod stubs;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use config::{GuardrailConfig, LearningConfig};
pub use error::{IdentityGraphError, Result};
pub use guardrail::{GateDecision, GuardrailGate, ResponseContext};
pub use learning::{BatchReport, CancelFlag, LearningEngine};
