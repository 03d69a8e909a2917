//! Social-graph collaborator contract.

use async_trait::async_trait;

use crate::domain::errors::SocialGraphError;

/// Answers identity queries about link owners.
///
/// # Implementations
///
/// - [`crate::infrastructure::social_graph::HttpSocialGraphClient`] - HTTP client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialGraphClient: Send + Sync {
    /// Checks that `username` is a known identity.
    ///
    /// # Errors
    ///
    /// Returns [`SocialGraphError::UnknownUser`] if the user does not exist and
    /// [`SocialGraphError::Unavailable`] if the social graph cannot answer.
    async fn validate_user(&self, username: &str) -> Result<(), SocialGraphError>;
}
