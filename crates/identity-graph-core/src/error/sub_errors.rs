//! Sub-error types for identity-graph-core.
//!
//! Each error type covers a specific collaborator boundary.

use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// STORAGE ERROR
// ============================================================================

/// Attachment Store (graph backend) errors.
///
/// Covers context queries and attribute mutations against the
/// Unified Identity Graph.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Graph backend operation failed.
    #[error("Graph backend error: {0}")]
    Backend(String),

    /// Attachment not found by ID.
    #[error("Attachment not found: {0}")]
    AttachmentNotFound(Uuid),

    /// Interaction not found by ID.
    ///
    /// # When This Occurs
    ///
    /// - Feedback references an interaction that was never recorded
    /// - The interaction was recorded under a different user
    #[error("Interaction not found: {0}")]
    InteractionNotFound(Uuid),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

// ============================================================================
// LEDGER ERROR
// ============================================================================

/// Audit Ledger (relational backend) errors.
///
/// Alert appends are best-effort (logged, never blocking); update appends
/// must succeed for a batch item to count as fully processed.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Ledger write failed.
    #[error("Ledger write failed: {0}")]
    WriteFailed(String),

    /// Ledger backend is unavailable.
    #[error("Ledger unavailable: {0}")]
    Unavailable(String),
}

// ============================================================================
// ESTIMATOR ERROR
// ============================================================================

/// VAD Estimator errors.
///
/// Any estimator failure inside the gate is treated as the most severe
/// risk class and blocks the candidate response.
#[derive(Debug, Error)]
pub enum EstimatorError {
    /// Estimation failed.
    #[error("VAD estimation failed: {0}")]
    EstimationFailed(String),

    /// Estimator did not answer within the configured deadline.
    #[error("VAD estimation timed out after {timeout_ms}ms")]
    Timeout {
        /// Configured deadline in milliseconds
        timeout_ms: u64,
    },

    /// Estimator is not available.
    #[error("VAD estimator unavailable: {0}")]
    Unavailable(String),
}

// ============================================================================
// CONFIG ERROR
// ============================================================================

/// Configuration errors.
///
/// Fatal at startup; never handled per-request.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric field is outside its allowed range.
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field that failed validation
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// A required collection is empty.
    #[error("Config collection {field} must not be empty")]
    EmptyCollection {
        /// Field that failed validation
        field: &'static str,
    },
}

impl ConfigError {
    /// Convenience constructor for range violations.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}
