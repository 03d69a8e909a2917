//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod links;
pub mod metrics;

pub use health::health_handler;
pub use links::{add_link_handler, delete_link_handler, get_links_handler, update_link_handler};
pub use metrics::metrics_handler;
