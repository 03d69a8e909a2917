//! Typed errors produced by the link-management core and its collaborators.
//!
//! [`LinkError`] is the single error type crossing the [`LinkManager`] boundary.
//! Collaborator errors ([`StoreError`], [`SocialGraphError`]) convert into it so
//! the core can use `?` and the error kind survives every decorator layer.
//!
//! [`LinkManager`]: crate::application::services::LinkManager

use thiserror::Error;

/// Errors returned by link-management operations.
///
/// The first group is caller-correctable and maps to 4xx responses; the second
/// group reports infrastructure failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("user '{owner}' already holds the maximum of {max} links")]
    QuotaExceeded { owner: String, max: u64 },

    #[error("link '{url}' already exists for user '{owner}'")]
    DuplicateLink { owner: String, url: String },

    #[error("link '{url}' not found for user '{owner}'")]
    NotFound { owner: String, url: String },

    #[error("invalid owner '{0}'")]
    InvalidOwner(String),

    #[error("link store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("social graph unavailable: {0}")]
    SocialGraphUnavailable(String),

    #[error("event publish failed: {0}")]
    EventPublishFailed(String),
}

impl LinkError {
    /// Stable snake_case label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::InvalidFilter(_) => "invalid_filter",
            Self::QuotaExceeded { .. } => "quota_exceeded",
            Self::DuplicateLink { .. } => "duplicate_link",
            Self::NotFound { .. } => "not_found",
            Self::InvalidOwner(_) => "invalid_owner",
            Self::StoreUnavailable(_) => "store_unavailable",
            Self::SocialGraphUnavailable(_) => "social_graph_unavailable",
            Self::EventPublishFailed(_) => "event_publish_failed",
        }
    }

    /// Returns true for errors the caller can correct by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::InvalidFilter(_)
                | Self::QuotaExceeded { .. }
                | Self::DuplicateLink { .. }
                | Self::NotFound { .. }
                | Self::InvalidOwner(_)
        )
    }
}

/// Errors reported by a [`crate::domain::repositories::LinkStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The `(owner, url)` pair already exists.
    #[error("duplicate link '{url}' for '{owner}'")]
    Duplicate { owner: String, url: String },

    /// The owner already holds `max` links.
    #[error("'{owner}' already holds {max} links")]
    QuotaExceeded { owner: String, max: u64 },

    #[error("{0}")]
    Unavailable(String),
}

impl From<StoreError> for LinkError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate { owner, url } => LinkError::DuplicateLink { owner, url },
            StoreError::QuotaExceeded { owner, max } => LinkError::QuotaExceeded { owner, max },
            StoreError::Unavailable(msg) => LinkError::StoreUnavailable(msg),
        }
    }
}

/// Errors reported by a [`crate::domain::social_graph::SocialGraphClient`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SocialGraphError {
    #[error("unknown user '{0}'")]
    UnknownUser(String),

    #[error("{0}")]
    Unavailable(String),
}

impl From<SocialGraphError> for LinkError {
    fn from(e: SocialGraphError) -> Self {
        match e {
            SocialGraphError::UnknownUser(user) => LinkError::InvalidOwner(user),
            SocialGraphError::Unavailable(msg) => LinkError::SocialGraphUnavailable(msg),
        }
    }
}
