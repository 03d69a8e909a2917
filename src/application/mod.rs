//! Application layer: the link service and the decorators stacked on it.
//!
//! - [`services::LinkService`] - Quota and ownership rules, store and event orchestration
//! - [`services::LinkManager`] - Capability set shared by the core and every decorator
//! - [`middleware`] - Logging and metrics decorators, composed by [`middleware::compose`]

pub mod middleware;
pub mod services;
