//! Business logic services for the application layer.

pub mod link_manager;
pub mod link_service;

pub use link_manager::LinkManager;
pub use link_service::{LinkService, SetupError};

#[cfg(test)]
pub use link_manager::MockLinkManager;
