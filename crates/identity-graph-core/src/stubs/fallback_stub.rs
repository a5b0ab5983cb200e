//! Stub implementation of [`FallbackProvider`].
//!
//! # TEST ONLY - NOT FOR PRODUCTION

use async_trait::async_trait;

use crate::error::{IdentityGraphError, Result};
use crate::traits::{FallbackContext, FallbackProvider};

/// Returns one fixed utterance for every template id, or a fixed failure
/// so tests can reach the gate's in-process default path.
///
/// # TEST ONLY - NOT FOR PRODUCTION
pub struct StaticFallbackProvider {
    text: Option<String>,
}

impl StaticFallbackProvider {
    /// Always answer with `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// Always fail the lookup.
    pub fn failing() -> Self {
        Self { text: None }
    }
}

#[async_trait]
impl FallbackProvider for StaticFallbackProvider {
    async fn get(&self, _template_id: &str, _ctx: &FallbackContext) -> Result<String> {
        match &self.text {
            Some(text) => Ok(text.clone()),
            None => Err(IdentityGraphError::internal("stub configured to fail")),
        }
    }
}
