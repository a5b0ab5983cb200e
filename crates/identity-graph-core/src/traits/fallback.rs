//! Fallback template lookup trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::UserId;
use uuid::Uuid;

/// Context handed to the template lookup so deployments can personalize
/// the fallback utterance.
#[derive(Debug, Clone)]
pub struct FallbackContext {
    /// The user who will see the fallback.
    pub user_id: UserId,
    /// The session the blocked response belonged to.
    pub session_id: Uuid,
    /// The user message that prompted the blocked candidate, when known.
    pub user_message: Option<String>,
}

/// Pre-approved safe utterance lookup.
///
/// The gate keeps a hardcoded in-process default
/// ([`crate::config::constants::guardrail::DEFAULT_FALLBACK_UTTERANCE`])
/// for when this lookup itself fails; it must never be left without a
/// fallback to return.
#[async_trait]
pub trait FallbackProvider: Send + Sync {
    /// Fetch the utterance for a template id.
    ///
    /// # Errors
    /// Any error; the gate logs it and substitutes the in-process default.
    async fn get(&self, template_id: &str, ctx: &FallbackContext) -> Result<String>;
}
