//! Top-level unified error type for the identity graph pipeline.

use thiserror::Error;

use super::sub_errors::{ConfigError, EstimatorError, LedgerError, StorageError};

// ============================================================================
// TOP-LEVEL UNIFIED ERROR TYPE
// ============================================================================

/// Top-level unified error type for identity-graph-core.
///
/// All collaborator errors are convertible to this type via `From`
/// implementations, so the gate and engine propagate a single error type
/// with `?`.
///
/// # Recoverability
///
/// Errors are classified as recoverable or non-recoverable:
/// - Recoverable: retrying in a later batch or request may succeed
///   (backend hiccups, timeouts, unavailability)
/// - Non-recoverable: require intervention (config errors, validation
///   failures, internal bugs)
///
/// # Examples
///
/// ```rust
/// use identity_graph_core::error::{EstimatorError, IdentityGraphError};
///
/// let err = IdentityGraphError::Estimator(EstimatorError::Timeout { timeout_ms: 250 });
/// assert!(err.is_recoverable());
/// ```
#[derive(Debug, Error)]
pub enum IdentityGraphError {
    /// Attachment Store error.
    ///
    /// Covers graph context queries and attribute mutations.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Audit Ledger error.
    ///
    /// Covers alert and calculated-update appends.
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// VAD Estimator error.
    ///
    /// Always fail-closed inside the gate.
    #[error("Estimator error: {0}")]
    Estimator(#[from] EstimatorError),

    /// Configuration error.
    ///
    /// Fatal at startup.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation error for input data.
    ///
    /// # When This Occurs
    ///
    /// - Field value out of allowed range
    /// - NaN in a numeric field
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error indicating a bug.
    ///
    /// These indicate invariant violations and should be investigated.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IdentityGraphError {
    /// Check if this error is recoverable via a later retry.
    ///
    /// The Learning Engine relies on this only indirectly: a failed record
    /// is left unprocessed and picked up by the next batch regardless of
    /// classification. The classification matters for operator alerting.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Storage(StorageError::Backend(_))
                | Self::Ledger(LedgerError::WriteFailed(_))
                | Self::Ledger(LedgerError::Unavailable(_))
                | Self::Estimator(EstimatorError::Timeout { .. })
                | Self::Estimator(EstimatorError::Unavailable(_))
        )
    }

    /// Create an internal error from a message.
    #[inline]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create a validation error from a message.
    #[inline]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type alias for identity graph operations.
pub type Result<T> = std::result::Result<T, IdentityGraphError>;
