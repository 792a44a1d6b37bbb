// tests/common/mod.rs
#![allow(dead_code)]

use catalog_core::{CatalogService, MemoryProductStore, MemoryPublisher, IMAGE_PROCESSING_QUEUE};
use catalog_gateway::config::AppConfig;
use catalog_gateway::state::AppState;
use once_cell::sync::Lazy;
use std::sync::Arc;

pub struct TestBackends {
  pub store: Arc<MemoryProductStore>,
  pub publisher: Arc<MemoryPublisher>,
  pub state: AppState,
}

pub fn test_config() -> AppConfig {
  AppConfig {
    server_host: "127.0.0.1".to_string(),
    server_port: 0,
    database_url: "postgres://unused".to_string(),
    amqp_url: "amqp://unused".to_string(),
    image_queue: IMAGE_PROCESSING_QUEUE.to_string(),
  }
}

pub fn test_backends() -> TestBackends {
  let store = Arc::new(MemoryProductStore::new());
  let publisher = Arc::new(MemoryPublisher::new());
  let catalog = CatalogService::new(store.clone(), publisher.clone(), IMAGE_PROCESSING_QUEUE);
  TestBackends {
    store,
    publisher,
    state: AppState::new(Arc::new(catalog), Arc::new(test_config())),
  }
}

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
