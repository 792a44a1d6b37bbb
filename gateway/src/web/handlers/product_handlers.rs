// gateway/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use catalog_core::{CatalogError, NewProduct, ProductFilter};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::state::AppState;

#[instrument(
  name = "handler::create_product",
  skip(app_state, payload),
  fields(user_id = payload.user_id, num_images = payload.product_images.len())
)]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<NewProduct>,
) -> Result<HttpResponse, AppError> {
  let product_id = app_state
    .catalog
    .create_product(payload.into_inner())
    .await
    .map_err(creation_failure)?;

  info!(product_id, "Product created.");
  Ok(HttpResponse::Created().json(json!({
      "message": "Product created successfully",
      "productID": product_id
  })))
}

// The row may already be committed when a later step fails; the client only
// learns which stage broke.
fn creation_failure(err: CatalogError) -> AppError {
  let message = match &err {
    CatalogError::Serialization(_) => "Failed to process images",
    e if e.is_queue() => "Failed to enqueue images",
    _ => "Failed to insert product",
  };
  AppError::internal(message, err)
}

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError> {
  let filter = ProductFilter::from_query_pairs(query.into_inner());
  let products = match app_state.catalog.list_products(&filter).await {
    Ok(products) => products,
    Err(CatalogError::Validation(m)) => return Err(AppError::Validation(m)),
    Err(e) => return Err(AppError::internal("Error retrieving products", e)),
  };

  info!("Listed {} products.", products.len());
  if products.is_empty() {
    // Zero matches encode as `null`, not `[]`; existing clients rely on it.
    return Ok(HttpResponse::Ok().json(serde_json::Value::Null));
  }
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_str()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  match app_state.catalog.get_product(path.as_str()).await {
    Ok(product) => Ok(HttpResponse::Ok().json(product)),
    Err(CatalogError::NotFound(m)) => {
      warn!("{}", m);
      Err(AppError::NotFound("Product not found".to_string()))
    }
    Err(e) => Err(AppError::internal("Error retrieving product", e)),
  }
}
