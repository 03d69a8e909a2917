//! Core link-management service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tracing::warn;

use super::link_manager::LinkManager;
use crate::domain::entities::{Link, LinkFilter, LinkPatch, NewLink};
use crate::domain::repositories::LinkStore;
use crate::domain::social_graph::SocialGraphClient;
use crate::domain::{EventSink, LinkError, LinkEvent};

/// Errors raised while constructing a [`LinkService`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("max links per user must be greater than 0")]
    InvalidQuota,
}

/// Service enforcing per-user quotas and link uniqueness.
///
/// Orchestrates the link store, the social graph and the event sink. All
/// checks run before the store is mutated, so a rejected request leaves no
/// partial writes behind. The quota is checked up front and again by the
/// store inside the insert, which is the check concurrent adds cannot race. Events are emitted after the mutation commits and
/// are best-effort: a publish failure is logged and never fails the call.
pub struct LinkService<S: LinkStore + ?Sized, G: SocialGraphClient + ?Sized> {
    store: Arc<S>,
    social_graph: Arc<G>,
    event_sink: EventSink,
    max_links_per_user: u64,
}

impl<S: LinkStore + ?Sized, G: SocialGraphClient + ?Sized> LinkService<S, G> {
    /// Creates a new link service.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::InvalidQuota`] if `max_links_per_user` is zero.
    pub fn new(
        store: Arc<S>,
        social_graph: Arc<G>,
        event_sink: EventSink,
        max_links_per_user: u64,
    ) -> Result<Self, SetupError> {
        if max_links_per_user == 0 {
            return Err(SetupError::InvalidQuota);
        }

        Ok(Self {
            store,
            social_graph,
            event_sink,
            max_links_per_user,
        })
    }

    pub fn max_links_per_user(&self) -> u64 {
        self.max_links_per_user
    }

    /// Confirms the owner is a known identity before any mutation.
    async fn check_owner(&self, owner: &str) -> Result<(), LinkError> {
        if owner.trim().is_empty() {
            return Err(LinkError::InvalidOwner(owner.to_string()));
        }
        self.social_graph.validate_user(owner).await?;
        Ok(())
    }

    async fn notify(&self, event: LinkEvent) {
        if let Err(e) = self.event_sink.emit(&event).await {
            warn!(
                error = %e,
                kind = ?event.kind(),
                owner = event.owner(),
                url = event.url(),
                "Failed to publish link event"
            );
        }
    }
}

fn require_url(url: &str) -> Result<(), LinkError> {
    if url.trim().is_empty() {
        return Err(LinkError::Validation("url must not be empty".to_string()));
    }
    Ok(())
}

#[async_trait]
impl<S, G> LinkManager for LinkService<S, G>
where
    S: LinkStore + ?Sized,
    G: SocialGraphClient + ?Sized,
{
    async fn add_link(&self, new_link: NewLink) -> Result<Link, LinkError> {
        require_url(&new_link.url)?;
        self.check_owner(&new_link.owner).await?;

        let held = self.store.count_by_owner(&new_link.owner).await?;
        if held >= self.max_links_per_user {
            return Err(LinkError::QuotaExceeded {
                owner: new_link.owner,
                max: self.max_links_per_user,
            });
        }

        if self
            .store
            .find(&new_link.owner, &new_link.url)
            .await?
            .is_some()
        {
            return Err(LinkError::DuplicateLink {
                owner: new_link.owner,
                url: new_link.url,
            });
        }

        let link = self
            .store
            .create(new_link, self.max_links_per_user)
            .await?;
        self.notify(LinkEvent::Added(link.clone())).await;

        Ok(link)
    }

    async fn update_link(
        &self,
        owner: &str,
        url: &str,
        patch: LinkPatch,
    ) -> Result<Link, LinkError> {
        require_url(url)?;
        self.check_owner(owner).await?;

        let not_found = || LinkError::NotFound {
            owner: owner.to_string(),
            url: url.to_string(),
        };

        let existing = self.store.find(owner, url).await?.ok_or_else(not_found)?;
        let link = self
            .store
            .update(existing.patched(&patch, Utc::now()))
            .await?
            .ok_or_else(not_found)?;

        self.notify(LinkEvent::Updated(link.clone())).await;

        Ok(link)
    }

    async fn delete_link(&self, owner: &str, url: &str) -> Result<(), LinkError> {
        require_url(url)?;
        self.check_owner(owner).await?;

        if !self.store.delete(owner, url).await? {
            return Err(LinkError::NotFound {
                owner: owner.to_string(),
                url: url.to_string(),
            });
        }

        self.notify(LinkEvent::Deleted {
            owner: owner.to_string(),
            url: url.to_string(),
        })
        .await;

        Ok(())
    }

    async fn get_links(&self, owner: &str, filter: LinkFilter) -> Result<Vec<Link>, LinkError> {
        let matcher = filter.compile()?;

        let links = self.store.list_by_owner(owner).await?;
        Ok(links.into_iter().filter(|l| matcher.matches(l)).collect())
    }
}
