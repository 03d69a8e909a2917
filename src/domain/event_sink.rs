//! Event sink selected once at startup.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::errors::LinkError;
use super::event_publisher::EventPublisher;
use super::events::LinkEvent;

/// Destination for link change notifications.
///
/// The variant is chosen at startup depending on whether a message-bus
/// endpoint is configured, and stays fixed for the lifetime of the service.
/// [`EventSink::Noop`] never touches the network.
#[derive(Clone, Default)]
pub enum EventSink {
    /// No bus configured; every emission succeeds without doing anything.
    #[default]
    Noop,
    /// Serializes each event and publishes it through the wrapped publisher.
    Publishing(Arc<dyn EventPublisher>),
}

impl EventSink {
    pub fn publishing(publisher: Arc<dyn EventPublisher>) -> Self {
        Self::Publishing(publisher)
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, Self::Noop)
    }

    /// Emits one event.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::EventPublishFailed`] if the publisher fails. Callers
    /// treat this as best-effort and must not undo the committed mutation.
    pub async fn emit(&self, event: &LinkEvent) -> Result<(), LinkError> {
        match self {
            Self::Noop => Ok(()),
            Self::Publishing(publisher) => {
                publisher.publish(&event.payload()).await?;
                debug!(
                    kind = ?event.kind(),
                    owner = event.owner(),
                    url = event.url(),
                    "Event published"
                );
                Ok(())
            }
        }
    }

    pub async fn health_check(&self) -> bool {
        match self {
            Self::Noop => true,
            Self::Publishing(publisher) => publisher.health_check().await,
        }
    }
}

impl fmt::Debug for EventSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Noop => f.write_str("EventSink::Noop"),
            Self::Publishing(_) => f.write_str("EventSink::Publishing"),
        }
    }
}
