// tests/product_routes_tests.rs
mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use catalog_core::Product;
use catalog_gateway::web::configure_app_routes;
use common::*;
use serde_json::{json, Value};

fn widget_body(user_id: i32, name: &str, price: f64) -> Value {
  json!({
    "user_id": user_id,
    "product_name": name,
    "product_description": format!("{} description", name),
    "product_images": ["https://img/1.png", "https://img/2.png"],
    "product_price": price
  })
}

#[actix_web::test]
async fn test_create_then_get_round_trips_product() {
  setup_tracing();
  let backends = test_backends();
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(backends.state.clone()))
      .configure(configure_app_routes),
  )
  .await;

  let req = test::TestRequest::post()
    .uri("/products")
    .set_json(widget_body(7, "Widget", 19.5))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let created: Value = test::read_body_json(resp).await;
  assert_eq!(created["message"], "Product created successfully");
  let id = created["productID"].as_i64().expect("productID should be an integer");

  let req = test::TestRequest::get().uri(&format!("/products/{}", id)).to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let raw: Value = test::read_body_json(resp).await;
  assert_eq!(raw["compressed_product_images"], json!([]));
  assert!(raw["created_at"].as_str().is_some_and(|s| !s.is_empty()));

  let product: Product = serde_json::from_value(raw).unwrap();
  assert_eq!(product.id as i64, id);
  assert_eq!(product.user_id, 7);
  assert_eq!(product.product_name, "Widget");
  assert_eq!(product.product_description.as_deref(), Some("Widget description"));
  assert_eq!(product.product_images, vec!["https://img/1.png", "https://img/2.png"]);
  assert_eq!(product.product_price, 19.5);

  let published = backends.publisher.published();
  assert_eq!(published.len(), 1);
  assert_eq!(published[0].queue, "image_processing");
  let urls: Vec<String> = serde_json::from_slice(&published[0].payload).unwrap();
  assert_eq!(urls, vec!["https://img/1.png", "https://img/2.png"]);
}

#[actix_web::test]
async fn test_create_accepts_body_without_content_type() {
  setup_tracing();
  let backends = test_backends();
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(backends.state.clone()))
      .configure(configure_app_routes),
  )
  .await;

  let req = test::TestRequest::post()
    .uri("/products")
    .set_payload(r#"{"user_id": 1, "product_name": "Plain", "product_price": 2}"#)
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  assert_eq!(backends.publisher.published()[0].payload, b"[]".to_vec());
}

#[actix_web::test]
async fn test_create_accepts_null_images() {
  setup_tracing();
  let backends = test_backends();
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(backends.state.clone()))
      .configure(configure_app_routes),
  )
  .await;

  let req = test::TestRequest::post()
    .uri("/products")
    .set_json(json!({"user_id": 1, "product_name": "W", "product_images": null, "product_price": 1}))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let created: Value = test::read_body_json(resp).await;
  let id = created["productID"].as_i64().expect("productID should be an integer");

  assert_eq!(backends.publisher.published()[0].payload, b"[]".to_vec());
  let product = backends.state.catalog.get_product(&id.to_string()).await.unwrap();
  assert!(product.product_images.is_empty());
}

#[actix_web::test]
async fn test_create_rejects_undecodable_body() {
  setup_tracing();
  let backends = test_backends();
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(backends.state.clone()))
      .configure(configure_app_routes),
  )
  .await;

  for body in [
    r#"not json"#,
    r#"{"user_id": "seven", "product_name": "W", "product_price": 1}"#,
    r#"{"product_name": "W", "product_price": 1}"#,
  ] {
    let req = test::TestRequest::post()
      .uri("/products")
      .insert_header(("content-type", "application/json"))
      .set_payload(body)
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {}", body);
    let err: Value = test::read_body_json(resp).await;
    assert_eq!(err["error"], "Invalid request body");
  }
  assert!(backends.store.is_empty());
}

#[actix_web::test]
async fn test_publish_failure_returns_500_but_product_persists() {
  setup_tracing();
  let backends = test_backends();
  backends.publisher.fail_publishes(true);
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(backends.state.clone()))
      .configure(configure_app_routes),
  )
  .await;

  let req = test::TestRequest::post()
    .uri("/products")
    .set_json(widget_body(7, "Widget", 1.0))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  let err: Value = test::read_body_json(resp).await;
  assert_eq!(err["error"], "Failed to enqueue images");

  let req = test::TestRequest::get().uri("/products/1").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let product: Product = test::read_body_json(resp).await;
  assert_eq!(product.product_name, "Widget");
}

#[actix_web::test]
async fn test_insert_failure_returns_500_and_publishes_nothing() {
  setup_tracing();
  let backends = test_backends();
  backends.store.fail_inserts(true);
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(backends.state.clone()))
      .configure(configure_app_routes),
  )
  .await;

  let req = test::TestRequest::post()
    .uri("/products")
    .set_json(widget_body(7, "Widget", 1.0))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  let err: Value = test::read_body_json(resp).await;
  assert_eq!(err["error"], "Failed to insert product");
  assert!(backends.publisher.published().is_empty());
}

#[actix_web::test]
async fn test_get_unknown_product_is_404() {
  setup_tracing();
  let backends = test_backends();
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(backends.state.clone()))
      .configure(configure_app_routes),
  )
  .await;

  let req = test::TestRequest::get().uri("/products/999").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  let err: Value = test::read_body_json(resp).await;
  assert_eq!(err["error"], "Product not found");

  // An id the store cannot bind is a store error, not a miss.
  let req = test::TestRequest::get().uri("/products/abc").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  let err: Value = test::read_body_json(resp).await;
  assert_eq!(err["error"], "Error retrieving product");
}

async fn seed(backends: &TestBackends) {
  for (user_id, name, price) in [(7, "Widget", 10.0), (7, "Gadget", 25.0), (8, "Widget", 10.0)] {
    let request = serde_json::from_value(widget_body(user_id, name, price)).unwrap();
    backends.state.catalog.create_product(request).await.unwrap();
  }
}

fn sorted_names(body: &Value) -> Vec<String> {
  let mut names: Vec<String> = body
    .as_array()
    .expect("expected a JSON array")
    .iter()
    .map(|p| p["product_name"].as_str().unwrap_or_default().to_string())
    .collect();
  names.sort();
  names
}

#[actix_web::test]
async fn test_list_requires_user_id() {
  setup_tracing();
  let backends = test_backends();
  seed(&backends).await;
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(backends.state.clone()))
      .configure(configure_app_routes),
  )
  .await;

  for uri in [
    "/products",
    "/products?user_id=",
    "/products?price_min=1&price_max=100&product_name=Wid",
  ] {
    let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "uri: {}", uri);
    let err: Value = test::read_body_json(resp).await;
    assert_eq!(err["error"], "user_id is required");
  }
}

#[actix_web::test]
async fn test_list_returns_user_products() {
  setup_tracing();
  let backends = test_backends();
  seed(&backends).await;
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(backends.state.clone()))
      .configure(configure_app_routes),
  )
  .await;

  let req = test::TestRequest::get().uri("/products?user_id=7").to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(sorted_names(&body), vec!["Gadget", "Widget"]);
  assert!(body.as_array().unwrap().iter().all(|p| p["user_id"] == 7));
}

#[actix_web::test]
async fn test_list_repeated_parameters_use_first_value() {
  setup_tracing();
  let backends = test_backends();
  seed(&backends).await;
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(backends.state.clone()))
      .configure(configure_app_routes),
  )
  .await;

  let req = test::TestRequest::get().uri("/products?user_id=7&user_id=8").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(sorted_names(&body), vec!["Gadget", "Widget"]);
  assert!(body.as_array().unwrap().iter().all(|p| p["user_id"] == 7));

  let req = test::TestRequest::get()
    .uri("/products?user_id=8&product_name=gad&product_name=wid")
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert!(body.is_null());
}

#[actix_web::test]
async fn test_list_single_price_bound_has_no_effect() {
  setup_tracing();
  let backends = test_backends();
  seed(&backends).await;
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(backends.state.clone()))
      .configure(configure_app_routes),
  )
  .await;

  let unfiltered: Value =
    test::call_and_read_body_json(&app, test::TestRequest::get().uri("/products?user_id=7").to_request()).await;
  let min_only: Value = test::call_and_read_body_json(
    &app,
    test::TestRequest::get().uri("/products?user_id=7&price_min=20").to_request(),
  )
  .await;
  let max_only: Value = test::call_and_read_body_json(
    &app,
    test::TestRequest::get().uri("/products?user_id=7&price_max=5").to_request(),
  )
  .await;
  let ranged: Value = test::call_and_read_body_json(
    &app,
    test::TestRequest::get()
      .uri("/products?user_id=7&price_min=20&price_max=30")
      .to_request(),
  )
  .await;

  assert_eq!(sorted_names(&min_only), sorted_names(&unfiltered));
  assert_eq!(sorted_names(&max_only), sorted_names(&unfiltered));
  assert_eq!(sorted_names(&ranged), vec!["Gadget"]);
}

#[actix_web::test]
async fn test_list_name_filter_is_case_insensitive_substring() {
  setup_tracing();
  let backends = test_backends();
  seed(&backends).await;
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(backends.state.clone()))
      .configure(configure_app_routes),
  )
  .await;

  let body: Value = test::call_and_read_body_json(
    &app,
    test::TestRequest::get()
      .uri("/products?user_id=7&product_name=Wid")
      .to_request(),
  )
  .await;
  assert_eq!(sorted_names(&body), vec!["Widget"]);

  let body: Value = test::call_and_read_body_json(
    &app,
    test::TestRequest::get()
      .uri("/products?user_id=7&product_name=wIDG")
      .to_request(),
  )
  .await;
  assert_eq!(sorted_names(&body), vec!["Widget"]);
}

#[actix_web::test]
async fn test_list_without_matches_encodes_null() {
  setup_tracing();
  let backends = test_backends();
  seed(&backends).await;
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(backends.state.clone()))
      .configure(configure_app_routes),
  )
  .await;

  let req = test::TestRequest::get().uri("/products?user_id=99").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body = test::read_body(resp).await;
  assert_eq!(&body[..], b"null");
}

#[actix_web::test]
async fn test_list_with_unbindable_user_id_is_500() {
  setup_tracing();
  let backends = test_backends();
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(backends.state.clone()))
      .configure(configure_app_routes),
  )
  .await;

  let req = test::TestRequest::get().uri("/products?user_id=abc").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  let err: Value = test::read_body_json(resp).await;
  assert_eq!(err["error"], "Error retrieving products");
  assert!(err["detail"].as_str().unwrap().contains("abc"));
}

#[actix_web::test]
async fn test_health_check() {
  let backends = test_backends();
  let app = test::init_service(
    App::new()
      .app_data(web::Data::new(backends.state.clone()))
      .configure(configure_app_routes),
  )
  .await;

  let body: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/health").to_request()).await;
  assert_eq!(body, json!({"status": "ok"}));
}
