//! Link change notifications.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Link;

/// A change to a user's links, emitted after the store mutation commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    Added(Link),
    Updated(Link),
    Deleted { owner: String, url: String },
}

impl LinkEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Added(_) => EventKind::Added,
            Self::Updated(_) => EventKind::Updated,
            Self::Deleted { .. } => EventKind::Deleted,
        }
    }

    pub fn owner(&self) -> &str {
        match self {
            Self::Added(link) | Self::Updated(link) => &link.owner,
            Self::Deleted { owner, .. } => owner,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Added(link) | Self::Updated(link) => &link.url,
            Self::Deleted { url, .. } => url,
        }
    }

    /// Builds the payload published to the message bus.
    pub fn payload(&self) -> EventPayload {
        let title = match self {
            Self::Added(link) | Self::Updated(link) => Some(link.title.clone()),
            Self::Deleted { .. } => None,
        };

        EventPayload {
            kind: self.kind(),
            owner: self.owner().to_string(),
            url: self.url().to_string(),
            title,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Added,
    Updated,
    Deleted,
}

/// Wire representation of a [`LinkEvent`].
///
/// ```json
/// { "kind": "Added", "owner": "alice", "url": "https://example.com", "title": "Example" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    pub kind: EventKind,
    pub owner: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}
