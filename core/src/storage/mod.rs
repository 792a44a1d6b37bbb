// core/src/storage/mod.rs

//! The storage accessor: row-level product inserts and reads.

pub mod memory;
pub mod postgres;

pub use memory::MemoryProductStore;
pub use postgres::PgProductStore;

use crate::error::CatalogResult;
use crate::filter::ProductFilter;
use crate::models::{NewProduct, Product};
use async_trait::async_trait;

#[async_trait]
pub trait ProductStore: Send + Sync {
  /// Inserts one row and returns the id the store assigned to it.
  async fn insert_product(&self, product: &NewProduct) -> CatalogResult<i32>;

  /// Lists the products matching `filter`, in whatever order the store
  /// returns them. Fails with `CatalogError::Validation` when `user_id` is
  /// missing.
  async fn list_products(&self, filter: &ProductFilter) -> CatalogResult<Vec<Product>>;

  /// Fetches a product by its raw id. Fails with `CatalogError::NotFound`
  /// when no row matches.
  async fn get_product_by_id(&self, id: &str) -> CatalogResult<Product>;
}
