//! Message-bus adapters for [`crate::domain::EventPublisher`].
//!
//! - [`RedisEventPublisher`] - Redis pub/sub

mod redis_publisher;

pub use redis_publisher::RedisEventPublisher;
