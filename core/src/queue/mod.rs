// core/src/queue/mod.rs

//! The queue publisher: hands image URL batches to the compression workers.

pub mod amqp;
pub mod memory;

pub use amqp::AmqpPublisher;
pub use memory::{MemoryPublisher, PublishedMessage};

use crate::error::CatalogResult;
use async_trait::async_trait;

/// Queue consumed by the image compression service.
pub const IMAGE_PROCESSING_QUEUE: &str = "image_processing";

/// Content type stamped on every published message.
pub const JSON_CONTENT_TYPE: &str = "application/json";

#[async_trait]
pub trait ImagePublisher: Send + Sync {
  /// Declares `queue` as durable, non-exclusive and not auto-deleted.
  /// Idempotent; fails if the queue exists with different properties.
  async fn ensure_queue(&self, queue: &str) -> CatalogResult<()>;

  /// Publishes one JSON message to `queue` through the default exchange.
  /// Returns once the broker accepted the publish; consumer receipt is not
  /// tracked.
  async fn publish(&self, queue: &str, payload: &[u8]) -> CatalogResult<()>;
}
