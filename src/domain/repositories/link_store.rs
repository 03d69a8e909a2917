//! Store contract for link persistence.

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::StoreError;
use async_trait::async_trait;

/// Durable keyed storage for links.
///
/// Links are keyed by `(owner, url)`. Implementations are responsible for their
/// own concurrency control; the core never assumes single-writer access.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkStore`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Persists a new link unless its owner already holds `max_links` links.
    ///
    /// The quota check and the insert must be atomic with respect to other
    /// `create` calls for the same owner.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::QuotaExceeded`] if the owner is at `max_links`.
    /// Returns [`StoreError::Duplicate`] if `(owner, url)` already exists.
    /// Returns [`StoreError::Unavailable`] on backend errors.
    async fn create(&self, new_link: NewLink, max_links: u64) -> Result<Link, StoreError>;

    /// Finds a link by owner and URL.
    async fn find(&self, owner: &str, url: &str) -> Result<Option<Link>, StoreError>;

    /// Lists all links of `owner` in insertion order.
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Link>, StoreError>;

    /// Counts the links held by `owner`.
    async fn count_by_owner(&self, owner: &str) -> Result<u64, StoreError>;

    /// Overwrites the mutable fields of the link keyed by `link.owner` and `link.url`.
    ///
    /// Returns `Ok(None)` if no such link exists.
    async fn update(&self, link: Link) -> Result<Option<Link>, StoreError>;

    /// Removes a link.
    ///
    /// Returns `Ok(true)` if the link existed and was removed.
    async fn delete(&self, owner: &str, url: &str) -> Result<bool, StoreError>;

    /// Checks if the backend is reachable.
    async fn health_check(&self) -> bool;
}
