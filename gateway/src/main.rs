// gateway/src/main.rs

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use catalog_core::{AmqpPublisher, CatalogService, PgProductStore};
use catalog_gateway::config::AppConfig;
use catalog_gateway::state::AppState;
use catalog_gateway::telemetry::init_tracing;
use catalog_gateway::web::configure_app_routes;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  init_tracing();
  tracing::info!("Starting catalog gateway...");

  let app_config = Arc::new(AppConfig::from_env().context("Failed to load application configuration")?);

  // Both backends must be reachable before serving; there is no degraded mode.
  let store = Arc::new(
    PgProductStore::connect(&app_config.database_url)
      .await
      .context("Failed to connect to the database")?,
  );
  let publisher = Arc::new(
    AmqpPublisher::connect(&app_config.amqp_url)
      .await
      .context("Failed to connect to the message broker")?,
  );

  let catalog = Arc::new(CatalogService::new(
    store.clone(),
    publisher.clone(),
    app_config.image_queue.clone(),
  ));
  catalog
    .prepare()
    .await
    .with_context(|| format!("Failed to declare queue '{}'", app_config.image_queue))?;

  let app_state = AppState::new(catalog, app_config.clone());
  let server_address = app_config.bind_address();
  tracing::info!("Starting server on {}", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(web::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("Failed to bind {}", server_address))?
  .run()
  .await?;

  tracing::info!("Server stopped; closing backend connections.");
  if let Err(e) = publisher.close().await {
    tracing::warn!(error = %e, "Failed to close the broker connection cleanly.");
  }
  store.pool().close().await;
  Ok(())
}
