//! Domain layer containing business entities and collaborator contracts.
//!
//! The domain layer has no dependencies on infrastructure or presentation layers.
//!
//! - [`entities`] - Links, patches and listing filters
//! - [`errors`] - Typed error taxonomy shared across layers
//! - [`events`] - Change notifications and their wire payload
//! - [`event_publisher`] - Message-bus publisher contract
//! - [`event_sink`] - Where change notifications go, fixed at startup
//! - [`repositories`] - Link store contract
//! - [`social_graph`] - Identity lookups for link owners

pub mod entities;
pub mod errors;
pub mod event_publisher;
pub mod event_sink;
pub mod events;
pub mod repositories;
pub mod social_graph;

pub use errors::{LinkError, SocialGraphError, StoreError};
pub use event_publisher::{EventPublisher, PublishError};
pub use event_sink::EventSink;
pub use events::{EventKind, EventPayload, LinkEvent};

#[cfg(test)]
pub use event_publisher::MockEventPublisher;
