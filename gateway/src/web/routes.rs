// gateway/src/web/routes.rs

use crate::errors::AppError;
use crate::web::handlers::product_handlers;
use actix_web::{error, web, HttpRequest, HttpResponse};

async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Any body that does not decode as a creation request is a client error.
fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  tracing::warn!(error = %err, "Rejecting undecodable request body.");
  AppError::Validation("Invalid request body".to_string()).into()
}

/// Registers the catalog routes on an actix `App`.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(
      web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(json_error_handler),
    )
    .route("/health", web::get().to(health_check_handler))
    .service(
      web::scope("/products")
        .route("", web::post().to(product_handlers::create_product_handler))
        .route("", web::get().to(product_handlers::list_products_handler))
        .route("/{id}", web::get().to(product_handlers::get_product_handler)),
    );
}
