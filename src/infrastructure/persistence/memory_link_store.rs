//! In-process link store.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::StoreError;
use crate::domain::repositories::LinkStore;

/// Link store kept entirely in memory.
///
/// Each owner's links live in a `Vec` so listing preserves insertion order.
/// A single lock guards the map, which makes the quota check, duplicate check
/// and insert in [`LinkStore::create`] atomic. Used for development (`LINK_STORE=memory`) and tests.
#[derive(Debug, Default)]
pub struct MemoryLinkStore {
    links: RwLock<HashMap<String, Vec<Link>>>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        debug!("Using in-memory link store");
        Self::default()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn create(&self, new_link: NewLink, max_links: u64) -> Result<Link, StoreError> {
        let mut links = self.links.write().unwrap_or_else(PoisonError::into_inner);
        let owned = links.entry(new_link.owner.clone()).or_default();

        if owned.len() as u64 >= max_links {
            return Err(StoreError::QuotaExceeded {
                owner: new_link.owner,
                max: max_links,
            });
        }

        if owned.iter().any(|l| l.url == new_link.url) {
            return Err(StoreError::Duplicate {
                owner: new_link.owner,
                url: new_link.url,
            });
        }

        let link = Link::from_new(new_link, Utc::now());
        owned.push(link.clone());
        Ok(link)
    }

    async fn find(&self, owner: &str, url: &str) -> Result<Option<Link>, StoreError> {
        let links = self.links.read().unwrap_or_else(PoisonError::into_inner);
        Ok(links
            .get(owner)
            .and_then(|owned| owned.iter().find(|l| l.url == url))
            .cloned())
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Link>, StoreError> {
        let links = self.links.read().unwrap_or_else(PoisonError::into_inner);
        Ok(links.get(owner).cloned().unwrap_or_default())
    }

    async fn count_by_owner(&self, owner: &str) -> Result<u64, StoreError> {
        let links = self.links.read().unwrap_or_else(PoisonError::into_inner);
        Ok(links.get(owner).map_or(0, |owned| owned.len() as u64))
    }

    async fn update(&self, link: Link) -> Result<Option<Link>, StoreError> {
        let mut links = self.links.write().unwrap_or_else(PoisonError::into_inner);
        let Some(existing) = links
            .get_mut(&link.owner)
            .and_then(|owned| owned.iter_mut().find(|l| l.url == link.url))
        else {
            return Ok(None);
        };

        existing.title = link.title;
        existing.description = link.description;
        existing.tags = link.tags;
        existing.updated_at = link.updated_at;
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, owner: &str, url: &str) -> Result<bool, StoreError> {
        let mut links = self.links.write().unwrap_or_else(PoisonError::into_inner);
        let Some(owned) = links.get_mut(owner) else {
            return Ok(false);
        };

        let before = owned.len();
        owned.retain(|l| l.url != url);
        let removed = owned.len() < before;

        if owned.is_empty() {
            links.remove(owner);
        }
        Ok(removed)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
