// core/src/flows/create_product.rs

//! Product creation: store the row, then hand its images to the compression queue.
//!
//! The steps are not transactional. Once `insert_product` succeeded the row
//! stays committed, whatever happens in `serialize_images` or `enqueue_images`.

use crate::error::CatalogError;
use crate::models::NewProduct;
use crate::pipeline::{ContextData, Pipeline, PipelineControl};
use crate::queue::ImagePublisher;
use crate::storage::ProductStore;
use std::sync::Arc;
use tracing::info;

pub const INSERT_PRODUCT_STEP: &str = "insert_product";
pub const SERIALIZE_IMAGES_STEP: &str = "serialize_images";
pub const ENQUEUE_IMAGES_STEP: &str = "enqueue_images";

#[derive(Debug, Clone)]
pub struct CreateProductCtxData {
  pub request: NewProduct,
  pub product_id: Option<i32>,
  /// JSON array of the submitted image URLs.
  pub image_payload: Option<Vec<u8>>,
  pub images_enqueued: bool,
}

impl CreateProductCtxData {
  pub fn new(request: NewProduct) -> Self {
    Self {
      request,
      product_id: None,
      image_payload: None,
      images_enqueued: false,
    }
  }
}

pub fn build_create_product_pipeline(
  store: Arc<dyn ProductStore>,
  publisher: Arc<dyn ImagePublisher>,
  queue_name: &str,
) -> Pipeline<CreateProductCtxData, CatalogError> {
  let mut p = Pipeline::<CreateProductCtxData, CatalogError>::new(&[
    INSERT_PRODUCT_STEP,
    SERIALIZE_IMAGES_STEP,
    ENQUEUE_IMAGES_STEP,
  ]);

  p.on_root(INSERT_PRODUCT_STEP, move |ctx_data: ContextData<CreateProductCtxData>| {
    let store = store.clone();
    async move {
      let request = { ctx_data.read().request.clone() };
      let product_id = store.insert_product(&request).await?;
      ctx_data.write().product_id = Some(product_id);
      Ok::<_, CatalogError>(PipelineControl::Continue)
    }
  });

  p.after_root(INSERT_PRODUCT_STEP, |ctx_data: ContextData<CreateProductCtxData>| async move {
    let (product_id, user_id) = {
      let guard = ctx_data.read();
      (guard.product_id, guard.request.user_id)
    };
    info!(?product_id, user_id, "Product committed; image hand-off pending.");
    Ok::<_, CatalogError>(PipelineControl::Continue)
  });

  p.on_root(SERIALIZE_IMAGES_STEP, |ctx_data: ContextData<CreateProductCtxData>| async move {
    let payload = {
      let guard = ctx_data.read();
      serde_json::to_vec(&guard.request.product_images)?
    };
    ctx_data.write().image_payload = Some(payload);
    Ok::<_, CatalogError>(PipelineControl::Continue)
  });

  let queue_name = queue_name.to_string();
  p.on_root(ENQUEUE_IMAGES_STEP, move |ctx_data: ContextData<CreateProductCtxData>| {
    let publisher = publisher.clone();
    let queue_name = queue_name.clone();
    async move {
      let payload = { ctx_data.read().image_payload.clone() }
        .ok_or_else(|| CatalogError::Queue("no image payload prepared for publishing".to_string()))?;

      // Declared on every publish so a queue deleted at runtime is recreated.
      publisher.ensure_queue(&queue_name).await?;
      publisher.publish(&queue_name, &payload).await?;

      ctx_data.write().images_enqueued = true;
      info!(queue = %queue_name, "Product images enqueued.");
      Ok::<_, CatalogError>(PipelineControl::Continue)
    }
  });

  p
}
