// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use catalog_core::{
  CatalogService, ContextData, Handler, MemoryProductStore, MemoryPublisher, NewProduct, PipelineControl, PipelineError,
  IMAGE_PROCESSING_QUEUE,
};
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::Level;

// --- Pipeline fixtures ---
#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub steps_executed: Vec<String>,
  pub should_stop_at: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Pipeline framework error: {0}")]
  Framework(String),

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<PipelineError> for TestError {
  fn from(pe: PipelineError) -> Self {
    TestError::Framework(format!("{:?}", pe))
  }
}

pub fn create_recording_handler(label: &'static str) -> Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.steps_executed.push(label.to_string());
      if guard.should_stop_at.as_deref() == Some(label) {
        return Ok(PipelineControl::Stop);
      }
      Ok(PipelineControl::Continue)
    })
  })
}

pub fn create_failing_handler(label: &'static str, error_message: &'static str) -> Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      ctx.write().steps_executed.push(label.to_string());
      Err(TestError::Handler(error_message.to_string()))
    })
  })
}

// --- Catalog fixtures ---
pub struct TestCatalog {
  pub store: Arc<MemoryProductStore>,
  pub publisher: Arc<MemoryPublisher>,
  pub service: CatalogService,
}

pub fn test_catalog() -> TestCatalog {
  let store = Arc::new(MemoryProductStore::new());
  let publisher = Arc::new(MemoryPublisher::new());
  let service = CatalogService::new(store.clone(), publisher.clone(), IMAGE_PROCESSING_QUEUE);
  TestCatalog {
    store,
    publisher,
    service,
  }
}

pub fn new_product(user_id: i32, name: &str, price: f64, images: &[&str]) -> NewProduct {
  NewProduct {
    user_id,
    product_name: name.to_string(),
    product_description: Some(format!("{} description", name)),
    product_images: images.iter().map(|s| s.to_string()).collect(),
    product_price: price,
  }
}

// --- Tracing ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
