//! DTOs for the link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Link, LinkFilter, LinkPatch, NewLink};

/// Request body for `POST /links`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddLinkRequest {
    /// Bookmarked URL (must be a valid absolute URL).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    #[validate(length(min = 1, max = 512, message = "Title must be 1-512 characters"))]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl AddLinkRequest {
    pub fn into_new_link(self, owner: String) -> NewLink {
        NewLink {
            owner,
            url: self.url,
            title: self.title,
            description: self.description.unwrap_or_default(),
            tags: self.tags.into_iter().collect(),
        }
    }
}

/// Request body for `PUT /links`.
///
/// `url` identifies the link; every other field is optional and only the
/// provided ones are changed.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    #[validate(length(min = 1, message = "URL must not be empty"))]
    pub url: String,

    #[validate(length(min = 1, max = 512, message = "Title must be 1-512 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[serde(default)]
    pub add_tags: Vec<String>,

    #[serde(default)]
    pub remove_tags: Vec<String>,
}

impl UpdateLinkRequest {
    /// Splits the request into the target URL and the patch to apply.
    pub fn into_parts(self) -> (String, LinkPatch) {
        let patch = LinkPatch {
            title: self.title,
            description: self.description,
            add_tags: self.add_tags.into_iter().collect(),
            remove_tags: self.remove_tags.into_iter().collect(),
        };
        (self.url, patch)
    }
}

/// Query string for `GET /links`.
#[derive(Debug, Default, Deserialize)]
pub struct GetLinksQuery {
    pub url_regex: Option<String>,
    pub title_regex: Option<String>,
    pub description_regex: Option<String>,
    pub tag: Option<String>,
}

impl From<GetLinksQuery> for LinkFilter {
    fn from(q: GetLinksQuery) -> Self {
        LinkFilter {
            url_regex: q.url_regex,
            title_regex: q.title_regex,
            description_regex: q.description_regex,
            tag: q.tag,
        }
    }
}

/// Query string for `DELETE /links`.
#[derive(Debug, Deserialize, Validate)]
pub struct DeleteLinkQuery {
    #[validate(length(min = 1, message = "URL must not be empty"))]
    pub url: String,
}

/// JSON representation of a stored link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub url: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            url: link.url,
            title: link.title,
            description: link.description,
            tags: link.tags.into_iter().collect(),
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}

/// Response body for `GET /links`.
#[derive(Debug, Serialize)]
pub struct LinksResponse {
    pub links: Vec<LinkResponse>,
}
