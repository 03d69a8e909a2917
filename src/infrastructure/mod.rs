//! Infrastructure layer for external integrations.
//!
//! This layer implements the contracts defined by the domain and application
//! layers.
//!
//! # Modules
//!
//! - [`events`] - Redis pub/sub event publisher
//! - [`metrics`] - `metrics` facade recorder and Prometheus exporter
//! - [`persistence`] - PostgreSQL and in-memory link stores
//! - [`social_graph`] - HTTP social-graph client

pub mod events;
pub mod metrics;
pub mod persistence;
pub mod social_graph;
