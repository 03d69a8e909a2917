//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures. Creation and partial updates use
//! separate input types:
//! - [`NewLink`] - For creating new links
//! - [`LinkPatch`] - For partial updates
//! - [`LinkFilter`] - For listing a user's links

pub mod filter;
pub mod link;

pub use filter::{LinkFilter, LinkMatcher};
pub use link::{Link, LinkPatch, NewLink};
