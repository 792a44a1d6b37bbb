// core/src/lib.rs

//! catalog-core: the domain layer of the Catalog Gateway.
//!
//!  - `storage`: the `ProductStore` accessor, on PostgreSQL or in memory.
//!  - `queue`: the `ImagePublisher`, on an AMQP broker or in memory.
//!  - `filter`: listing filters and the SQL they render to.
//!  - `pipeline`: a named-step async pipeline used to orchestrate writes.
//!  - `flows`: the product creation pipeline (insert, serialize, enqueue).
//!  - `service`: `CatalogService`, which ties the above together.

pub mod error;
pub mod filter;
pub mod flows;
pub mod models;
pub mod pipeline;
pub mod queue;
pub mod service;
pub mod storage;

pub use crate::error::{CatalogError, CatalogResult, PipelineError};
pub use crate::filter::ProductFilter;
pub use crate::models::{NewProduct, Product};
pub use crate::pipeline::{ContextData, Handler, Pipeline, PipelineControl, PipelineResult};
pub use crate::queue::{AmqpPublisher, ImagePublisher, MemoryPublisher, IMAGE_PROCESSING_QUEUE};
pub use crate::service::CatalogService;
pub use crate::storage::{MemoryProductStore, PgProductStore, ProductStore};
