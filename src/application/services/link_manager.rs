//! The link-management capability set.

use async_trait::async_trait;

use crate::domain::LinkError;
use crate::domain::entities::{Link, LinkFilter, LinkPatch, NewLink};

/// Operations exposed by the link service.
///
/// Implemented by the core [`super::LinkService`] and by every decorator in
/// [`crate::application::middleware`], so layers can be stacked freely.
/// Implementations hold no mutable in-process state and are safe to share
/// across concurrent requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkManager: Send + Sync {
    /// Stores a new link for `new_link.owner`.
    ///
    /// # Errors
    ///
    /// - [`LinkError::QuotaExceeded`] if the owner already holds the maximum
    /// - [`LinkError::DuplicateLink`] if `(owner, url)` already exists
    /// - [`LinkError::InvalidOwner`] / [`LinkError::Validation`] for bad input
    async fn add_link(&self, new_link: NewLink) -> Result<Link, LinkError>;

    /// Applies `patch` to the link keyed by `(owner, url)`.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotFound`] if no such link exists.
    async fn update_link(&self, owner: &str, url: &str, patch: LinkPatch)
    -> Result<Link, LinkError>;

    /// Removes the link keyed by `(owner, url)`.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotFound`] if no such link exists.
    async fn delete_link(&self, owner: &str, url: &str) -> Result<(), LinkError>;

    /// Lists the links of `owner` matching `filter`, in insertion order.
    ///
    /// An empty result is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::InvalidFilter`] if a filter expression is invalid.
    async fn get_links(&self, owner: &str, filter: LinkFilter) -> Result<Vec<Link>, LinkError>;
}
