// core/src/storage/memory.rs

use super::ProductStore;
use crate::error::{CatalogError, CatalogResult};
use crate::filter::{bind_param, ProductFilter};
use crate::models::{NewProduct, Product};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct Rows {
  products: Vec<Product>,
  last_id: i32,
}

/// `ProductStore` kept in process memory. Ids are assigned sequentially from 1.
///
/// Inserts can be made to fail with `fail_inserts(true)`.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
  rows: RwLock<Rows>,
  reject_inserts: AtomicBool,
}

impl MemoryProductStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn fail_inserts(&self, fail: bool) {
    self.reject_inserts.store(fail, Ordering::SeqCst);
  }

  pub fn len(&self) -> usize {
    self.rows.read().products.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
  async fn insert_product(&self, product: &NewProduct) -> CatalogResult<i32> {
    if self.reject_inserts.load(Ordering::SeqCst) {
      warn!("Memory store rejecting insert.");
      return Err(CatalogError::Storage("insert rejected by store".to_string()));
    }

    let mut rows = self.rows.write();
    rows.last_id += 1;
    let id = rows.last_id;
    rows.products.push(Product {
      id,
      user_id: product.user_id,
      product_name: product.product_name.clone(),
      product_description: product.product_description.clone(),
      product_images: product.product_images.clone(),
      compressed_product_images: Vec::new(),
      product_price: product.product_price,
      created_at: Utc::now(),
    });
    debug!(product_id = id, "Product stored in memory.");
    Ok(id)
  }

  async fn list_products(&self, filter: &ProductFilter) -> CatalogResult<Vec<Product>> {
    let parsed = filter.parse()?;
    let rows = self.rows.read();
    Ok(rows.products.iter().filter(|p| parsed.matches(p)).cloned().collect())
  }

  async fn get_product_by_id(&self, id: &str) -> CatalogResult<Product> {
    let product_id = bind_param::<i32>(id, "integer")?;
    self
      .rows
      .read()
      .products
      .iter()
      .find(|p| p.id == product_id)
      .cloned()
      .ok_or_else(|| CatalogError::NotFound(format!("Product with ID {} not found.", product_id)))
  }
}
