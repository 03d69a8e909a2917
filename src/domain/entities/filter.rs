//! Link listing filters.

use regex::Regex;

use super::link::Link;
use crate::domain::errors::LinkError;

/// Optional criteria for listing a user's links.
///
/// All criteria are conjunctive. An empty filter matches every link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkFilter {
    pub url_regex: Option<String>,
    pub title_regex: Option<String>,
    pub description_regex: Option<String>,
    pub tag: Option<String>,
}

impl LinkFilter {
    /// Compiles the filter's regular expressions.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::InvalidFilter`] if any expression fails to compile.
    pub fn compile(&self) -> Result<LinkMatcher, LinkError> {
        Ok(LinkMatcher {
            url: compile_field("url_regex", self.url_regex.as_deref())?,
            title: compile_field("title_regex", self.title_regex.as_deref())?,
            description: compile_field("description_regex", self.description_regex.as_deref())?,
            tag: self.tag.clone().filter(|t| !t.is_empty()),
        })
    }
}

fn compile_field(name: &str, pattern: Option<&str>) -> Result<Option<Regex>, LinkError> {
    match pattern {
        None | Some("") => Ok(None),
        Some(p) => Regex::new(p)
            .map(Some)
            .map_err(|e| LinkError::InvalidFilter(format!("{name}: {e}"))),
    }
}

/// A compiled [`LinkFilter`].
#[derive(Debug, Clone)]
pub struct LinkMatcher {
    url: Option<Regex>,
    title: Option<Regex>,
    description: Option<Regex>,
    tag: Option<String>,
}

impl LinkMatcher {
    pub fn matches(&self, link: &Link) -> bool {
        self.url.as_ref().is_none_or(|re| re.is_match(&link.url))
            && self.title.as_ref().is_none_or(|re| re.is_match(&link.title))
            && self
                .description
                .as_ref()
                .is_none_or(|re| re.is_match(&link.description))
            && self.tag.as_deref().is_none_or(|tag| link.has_tag(tag))
    }
}
