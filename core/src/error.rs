// core/src/error.rs
use thiserror::Error;

/// Framework-level failures raised by the step pipeline itself, as opposed to
/// failures returned by the handlers it runs.
#[derive(Debug, Error)]
pub enum PipelineError {
  #[error("Handler missing for step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("Pipeline finished without producing '{output}'")]
  MissingOutput { output: String },
}

#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  // Storage failures that do not originate in the driver, e.g. a parameter
  // the store cannot bind or an in-memory store refusing a write.
  #[error("Storage Error: {0}")]
  Storage(String),

  #[error("Broker Error: {0}")]
  Amqp(#[from] lapin::Error),

  #[error("Queue Error: {0}")]
  Queue(String),

  #[error("Serialization Error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Pipeline Error: {0}")]
  Pipeline(#[from] PipelineError),
}

impl CatalogError {
  /// True for any failure reported by the relational store.
  pub fn is_storage(&self) -> bool {
    matches!(self, CatalogError::Sqlx(_) | CatalogError::Storage(_))
  }

  /// True for any failure reported by the message broker.
  pub fn is_queue(&self) -> bool {
    matches!(self, CatalogError::Amqp(_) | CatalogError::Queue(_))
  }
}

pub type CatalogResult<T, E = CatalogError> = std::result::Result<T, E>;
