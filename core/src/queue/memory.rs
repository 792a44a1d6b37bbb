// core/src/queue/memory.rs

use super::{ImagePublisher, JSON_CONTENT_TYPE};
use crate::error::{CatalogError, CatalogResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
  pub queue: String,
  pub content_type: String,
  pub payload: Vec<u8>,
}

/// `ImagePublisher` that records what it is asked to do.
///
/// `fail_publishes(true)` makes every later publish fail as a broken channel
/// would. Queue declarations keep succeeding.
#[derive(Debug, Default)]
pub struct MemoryPublisher {
  declared: Mutex<Vec<String>>,
  published: Mutex<Vec<PublishedMessage>>,
  broken: AtomicBool,
}

impl MemoryPublisher {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn fail_publishes(&self, fail: bool) {
    self.broken.store(fail, Ordering::SeqCst);
  }

  /// Queue names in declaration order, repeats included.
  pub fn declared_queues(&self) -> Vec<String> {
    self.declared.lock().clone()
  }

  pub fn published(&self) -> Vec<PublishedMessage> {
    self.published.lock().clone()
  }
}

#[async_trait]
impl ImagePublisher for MemoryPublisher {
  async fn ensure_queue(&self, queue: &str) -> CatalogResult<()> {
    self.declared.lock().push(queue.to_string());
    Ok(())
  }

  async fn publish(&self, queue: &str, payload: &[u8]) -> CatalogResult<()> {
    if self.broken.load(Ordering::SeqCst) {
      warn!(queue, "Memory publisher rejecting publish.");
      return Err(CatalogError::Queue("channel/connection is not open".to_string()));
    }
    self.published.lock().push(PublishedMessage {
      queue: queue.to_string(),
      content_type: JSON_CONTENT_TYPE.to_string(),
      payload: payload.to_vec(),
    });
    Ok(())
  }
}
