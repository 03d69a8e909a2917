//! Link entity representing a stored bookmark.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A bookmark owned by a single user.
///
/// The `(owner, url)` pair is unique within the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub owner: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub tags: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Materializes a freshly created link with both timestamps set to `now`.
    pub fn from_new(new_link: NewLink, now: DateTime<Utc>) -> Self {
        Self {
            owner: new_link.owner,
            url: new_link.url,
            title: new_link.title,
            description: new_link.description,
            tags: new_link.tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns a copy of this link with `patch` applied.
    ///
    /// Tags listed in `add_tags` are inserted before `remove_tags` are removed,
    /// so a tag present in both ends up removed.
    pub fn patched(&self, patch: &LinkPatch, now: DateTime<Utc>) -> Self {
        let mut link = self.clone();

        if let Some(title) = &patch.title {
            link.title = title.clone();
        }
        if let Some(description) = &patch.description {
            link.description = description.clone();
        }
        link.tags.extend(patch.add_tags.iter().cloned());
        for tag in &patch.remove_tags {
            link.tags.remove(tag);
        }
        link.updated_at = now;

        link
    }

    /// Returns true if the link carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewLink {
    pub owner: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub tags: BTreeSet<String>,
}

impl NewLink {
    /// Creates a link request with no description or tags.
    pub fn new(owner: impl Into<String>, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            url: url.into(),
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Partial update for an existing link.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub add_tags: BTreeSet<String>,
    pub remove_tags: BTreeSet<String>,
}

impl LinkPatch {
    /// A patch that only replaces the title.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_link_from_new() {
        let now = Utc::now();
        let mut new_link = NewLink::new("alice", "https://example.com", "Example");
        new_link.tags = tags(&["rust"]);

        let link = Link::from_new(new_link, now);

        assert_eq!(link.owner, "alice");
        assert_eq!(link.url, "https://example.com");
        assert_eq!(link.title, "Example");
        assert!(link.description.is_empty());
        assert!(link.has_tag("rust"));
        assert_eq!(link.created_at, now);
        assert_eq!(link.updated_at, now);
    }

    #[test]
    fn test_patch_leaves_absent_fields_unchanged() {
        let created = Utc::now();
        let mut new_link = NewLink::new("alice", "https://example.com", "Old");
        new_link.description = "kept".to_string();
        let link = Link::from_new(new_link, created);

        let later = created + chrono::Duration::seconds(5);
        let updated = link.patched(&LinkPatch::title("New"), later);

        assert_eq!(updated.title, "New");
        assert_eq!(updated.description, "kept");
        assert_eq!(updated.created_at, created);
        assert_eq!(updated.updated_at, later);
    }

    #[test]
    fn test_patch_tags_add_then_remove() {
        let mut new_link = NewLink::new("alice", "https://example.com", "T");
        new_link.tags = tags(&["a", "b"]);
        let link = Link::from_new(new_link, Utc::now());

        let patch = LinkPatch {
            add_tags: tags(&["c", "d"]),
            remove_tags: tags(&["a", "d"]),
            ..Default::default()
        };
        let updated = link.patched(&patch, Utc::now());

        assert_eq!(updated.tags, tags(&["b", "c"]));
    }
}
