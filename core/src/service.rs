// core/src/service.rs

use crate::error::{CatalogError, CatalogResult, PipelineError};
use crate::filter::ProductFilter;
use crate::flows::{build_create_product_pipeline, CreateProductCtxData};
use crate::models::{NewProduct, Product};
use crate::pipeline::{ContextData, Pipeline, PipelineResult};
use crate::queue::ImagePublisher;
use crate::storage::ProductStore;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Entry point for every catalog operation.
///
/// Holds the store and the publisher it was built with; there is no global
/// state. Cheap to share behind an `Arc`.
pub struct CatalogService {
  store: Arc<dyn ProductStore>,
  publisher: Arc<dyn ImagePublisher>,
  queue_name: String,
  create_pipeline: Pipeline<CreateProductCtxData, CatalogError>,
}

impl CatalogService {
  pub fn new(store: Arc<dyn ProductStore>, publisher: Arc<dyn ImagePublisher>, queue_name: impl Into<String>) -> Self {
    let queue_name = queue_name.into();
    let create_pipeline = build_create_product_pipeline(store.clone(), publisher.clone(), &queue_name);
    Self {
      store,
      publisher,
      queue_name,
      create_pipeline,
    }
  }

  pub fn queue_name(&self) -> &str {
    &self.queue_name
  }

  /// Declares the image queue. Called once at startup so an unusable broker
  /// is detected before serving traffic.
  #[instrument(name = "CatalogService::prepare", skip(self), fields(queue = %self.queue_name))]
  pub async fn prepare(&self) -> CatalogResult<()> {
    self.publisher.ensure_queue(&self.queue_name).await?;
    info!("Image queue ready.");
    Ok(())
  }

  /// Inserts the product and publishes its image URLs.
  ///
  /// A storage failure means nothing was written. A serialization or queue
  /// failure is reported after the row was committed and does not remove it.
  #[instrument(name = "CatalogService::create_product", skip_all, fields(user_id = request.user_id))]
  pub async fn create_product(&self, request: NewProduct) -> CatalogResult<i32> {
    let ctx_data = ContextData::new(CreateProductCtxData::new(request));

    if self.create_pipeline.run(ctx_data.clone()).await? == PipelineResult::Stopped {
      warn!("Create product pipeline stopped before completion.");
    }

    let product_id = ctx_data.read().product_id;
    product_id.ok_or_else(|| {
      CatalogError::Pipeline(PipelineError::MissingOutput {
        output: "product_id".to_string(),
      })
    })
  }

  pub async fn list_products(&self, filter: &ProductFilter) -> CatalogResult<Vec<Product>> {
    self.store.list_products(filter).await
  }

  pub async fn get_product(&self, id: &str) -> CatalogResult<Product> {
    self.store.get_product_by_id(id).await
  }
}
