// core/src/storage/postgres.rs

use super::ProductStore;
use crate::error::{CatalogError, CatalogResult};
use crate::filter::{bind_param, BindValue, ListQuery, ProductFilter, PRODUCT_COLUMNS};
use crate::models::{NewProduct, Product};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info, instrument};

/// `ProductStore` backed by the `products` table in PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgProductStore {
  pool: PgPool,
}

impl PgProductStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  /// Opens a pool against `database_url`. Fails if the database cannot be
  /// reached.
  #[instrument(name = "PgProductStore::connect", skip_all, err(Display))]
  pub async fn connect(database_url: &str) -> CatalogResult<Self> {
    let pool = PgPool::connect(database_url).await?;
    info!("Successfully connected to the database.");
    Ok(Self::new(pool))
  }

  pub fn pool(&self) -> &PgPool {
    &self.pool
  }
}

#[async_trait]
impl ProductStore for PgProductStore {
  #[instrument(
    name = "PgProductStore::insert_product",
    skip_all,
    fields(user_id = product.user_id, num_images = product.product_images.len())
  )]
  async fn insert_product(&self, product: &NewProduct) -> CatalogResult<i32> {
    let product_id: i32 = sqlx::query_scalar(
      "INSERT INTO products (user_id, product_name, product_description, product_images, product_price) \
       VALUES ($1, $2, $3, $4, $5) RETURNING id",
    )
    .bind(product.user_id)
    .bind(&product.product_name)
    .bind(&product.product_description)
    .bind(&product.product_images)
    .bind(product.product_price)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| {
      error!("Error inserting product: {}", e);
      CatalogError::Sqlx(e)
    })?;

    info!(product_id, "Product row inserted.");
    Ok(product_id)
  }

  #[instrument(name = "PgProductStore::list_products", skip(self))]
  async fn list_products(&self, filter: &ProductFilter) -> CatalogResult<Vec<Product>> {
    let ListQuery { sql, binds } = filter.parse()?.to_list_query();

    let mut query = sqlx::query_as::<_, Product>(&sql);
    for value in binds {
      query = match value {
        BindValue::Int(v) => query.bind(v),
        BindValue::Float(v) => query.bind(v),
        BindValue::Text(v) => query.bind(v),
      };
    }

    let products = query.fetch_all(&self.pool).await.map_err(|e| {
      error!("Failed to fetch products from database: {}", e);
      CatalogError::Sqlx(e)
    })?;

    info!("Fetched {} products.", products.len());
    Ok(products)
  }

  #[instrument(name = "PgProductStore::get_product_by_id", skip(self))]
  async fn get_product_by_id(&self, id: &str) -> CatalogResult<Product> {
    let product_id = bind_param::<i32>(id, "integer")?;

    let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
    sqlx::query_as::<_, Product>(&sql)
      .bind(product_id)
      .fetch_optional(&self.pool)
      .await
      .map_err(|e| {
        error!("Database error while fetching product {}: {}", product_id, e);
        CatalogError::Sqlx(e)
      })?
      .ok_or_else(|| CatalogError::NotFound(format!("Product with ID {} not found.", product_id)))
  }
}
