//! Redis pub/sub event publisher.

use crate::domain::{EventPayload, EventPublisher, PublishError};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info};

/// Publishes link events as JSON messages on a Redis channel.
///
/// Uses a `ConnectionManager` so reconnection after transient failures is
/// handled by the driver. Each publish is a single attempt bounded by the
/// configured timeout.
pub struct RedisEventPublisher {
    client: ConnectionManager,
    channel: String,
    publish_timeout: Duration,
}

impl RedisEventPublisher {
    /// Connects to the bus and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `bus_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `channel` - Channel every event is published on
    /// - `publish_timeout` - Upper bound for a single publish attempt
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Connection`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(
        bus_url: &str,
        channel: impl Into<String>,
        publish_timeout: Duration,
    ) -> Result<Self, PublishError> {
        info!("Connecting to event bus at {}", bus_url);

        let client = Client::open(bus_url).map_err(|e| {
            PublishError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = timeout(publish_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| PublishError::Connection("Timed out connecting to Redis".to_string()))?
            .map_err(|e| PublishError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| PublishError::Connection(format!("Redis PING failed: {}", e)))?;

        let channel = channel.into();
        info!(channel, "Connected to event bus");

        Ok(Self {
            client: manager,
            channel,
            publish_timeout,
        })
    }
}

#[async_trait]
impl EventPublisher for RedisEventPublisher {
    async fn publish(&self, payload: &EventPayload) -> Result<(), PublishError> {
        let message =
            serde_json::to_string(payload).map_err(|e| PublishError::Encode(e.to_string()))?;
        let mut conn = self.client.clone();

        let receivers = timeout(
            self.publish_timeout,
            conn.publish::<_, _, i64>(&self.channel, message),
        )
        .await
        .map_err(|_| PublishError::Timeout(self.publish_timeout))?
        .map_err(|e| PublishError::Transport(e.to_string()))?;

        debug!(channel = %self.channel, receivers, "PUBLISH");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
