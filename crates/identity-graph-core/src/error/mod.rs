//! Error types for identity-graph-core.
//!
//! This module defines the central error types used throughout the identity
//! graph pipeline:
//!
//! - [`IdentityGraphError`]: Top-level unified error for all crate errors
//! - Sub-error types: [`StorageError`], [`LedgerError`], [`EstimatorError`],
//!   [`ConfigError`]
//!
//! # Conventions
//!
//! - Library errors use `thiserror`; no panics in library code
//! - Errors are propagated with the `?` operator
//! - Collaborator implementations should log via `tracing` before returning
//!   an error; the gate and engine decide whether a failure is fail-closed,
//!   best-effort, or batch-isolated

mod sub_errors;
mod unified;

pub use sub_errors::{ConfigError, EstimatorError, LedgerError, StorageError};
pub use unified::IdentityGraphError;

pub use unified::Result;
