//! Bearer credential sources for the Remote Data Client.

use async_trait::async_trait;

/// Supplies the bearer token attached to every API request.
///
/// The client awaits a token before each call and never keeps one, so the
/// identity provider's own refresh is picked up on the very next request.
#[async_trait(?Send)]
pub trait CredentialProvider: Send + Sync {
    async fn bearer_token(&self) -> Option<String>;
}

/// A fixed token, mostly useful for tests and scripts.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

#[async_trait(?Send)]
impl CredentialProvider for StaticToken {
    async fn bearer_token(&self) -> Option<String> {
        Some(self.0.clone()).filter(|t| !t.is_empty())
    }
}
