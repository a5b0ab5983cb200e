//! Consent verification for analytics aggregation.

use std::collections::HashSet;

use async_trait::async_trait;

use identity_graph_core::error::Result;
use identity_graph_core::types::UserId;

/// What a user may have consented to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsentScope {
    /// Inclusion of feedback in anonymized aggregate distributions.
    Aggregation,
}

/// Checks explicit user opt-in before any feedback content is touched.
///
/// Implementations back onto the deployed consent records; a static stub
/// lives alongside for tests.
#[async_trait]
pub trait ConsentVerifier: Send + Sync {
    /// Whether the user has explicitly opted into `scope`.
    ///
    /// # Errors
    /// Backend failures; the aggregator treats an error like a missing
    /// consent and skips the user.
    async fn has_consented(&self, user_id: UserId, scope: ConsentScope) -> Result<bool>;
}

/// Static consent list.
///
/// # TEST ONLY - NOT FOR PRODUCTION
#[derive(Default)]
pub struct StaticConsentVerifier {
    allowed: HashSet<UserId>,
}

impl StaticConsentVerifier {
    /// No one has consented.
    pub fn deny_all() -> Self {
        Self::default()
    }

    /// Exactly these users have consented to everything.
    pub fn allowing(users: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            allowed: users.into_iter().collect(),
        }
    }
}

#[async_trait]
impl ConsentVerifier for StaticConsentVerifier {
    async fn has_consented(&self, user_id: UserId, _scope: ConsentScope) -> Result<bool> {
        Ok(self.allowed.contains(&user_id))
    }
}
