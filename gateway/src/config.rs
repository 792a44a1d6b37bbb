// gateway/src/config.rs

use crate::errors::{AppError, Result};
use catalog_core::IMAGE_PROCESSING_QUEUE;
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub amqp_url: String,
  pub image_queue: String,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL")?;
    let amqp_url = get_env("AMQP_URL")?;
    let image_queue = get_env("IMAGE_QUEUE").unwrap_or_else(|_| IMAGE_PROCESSING_QUEUE.to_string());

    // Connection strings carry credentials and are not logged.
    tracing::info!(%server_host, server_port, %image_queue, "Application configuration loaded.");

    Ok(Self {
      server_host,
      server_port,
      database_url,
      amqp_url,
      image_queue,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
