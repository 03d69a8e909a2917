//! Message-bus publisher trait and error types.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use super::errors::LinkError;
use super::events::EventPayload;

/// Errors that can occur while publishing an event.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("event bus connection error: {0}")]
    Connection(String),

    #[error("failed to encode event: {0}")]
    Encode(String),

    #[error("event bus publish error: {0}")]
    Transport(String),

    #[error("event bus publish timed out after {0:?}")]
    Timeout(Duration),
}

impl From<PublishError> for LinkError {
    fn from(e: PublishError) -> Self {
        LinkError::EventPublishFailed(e.to_string())
    }
}

/// Publishes serialized link events to an external message bus.
///
/// Implementations make a single bounded attempt per call and never retry.
///
/// # Implementations
///
/// - [`crate::infrastructure::events::RedisEventPublisher`] - Redis pub/sub
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes one event payload.
    async fn publish(&self, payload: &EventPayload) -> Result<(), PublishError>;

    /// Checks if the bus is reachable.
    async fn health_check(&self) -> bool;
}
