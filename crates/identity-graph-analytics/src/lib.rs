//! Identity Graph Analytics
//!
//! Satellite aggregator over the feedback stream: consent-gated,
//! anonymized, time-bucketed distributions of resonance tags and coherence
//! ratings. Shares the [`identity_graph_core::types::FeedbackRecord`]
//! contract with the Learning Engine but is strictly read-only over the
//! stream: it never marks records processed.
//!
//! # Privacy
//!
//! - No feedback content is examined until the user's explicit
//!   `Aggregation` opt-in has been verified
//! - User ids are salted-SHA-256 hashed before entering any bucket;
//!   raw ids never leave the ingest call

mod aggregator;
mod consent;

pub use aggregator::{AnalyticsAggregator, AnalyticsConfig, BucketStats, IngestSummary};
pub use consent::{ConsentScope, ConsentVerifier, StaticConsentVerifier};
