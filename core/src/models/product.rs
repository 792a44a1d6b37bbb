// core/src/models/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// A persisted product row. Field names double as column names and JSON keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
  pub id: i32,
  pub user_id: i32,
  pub product_name: String,
  pub product_description: Option<String>,
  pub product_images: Vec<String>,
  // Filled in later by the image compression consumer; empty until then.
  pub compressed_product_images: Vec<String>,
  pub product_price: f64,
  pub created_at: DateTime<Utc>,
}

/// Body of a product creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
  pub user_id: i32,
  pub product_name: String,
  #[serde(default)]
  pub product_description: Option<String>,
  // An explicit `null` is treated like an absent list.
  #[serde(default, deserialize_with = "null_as_empty")]
  pub product_images: Vec<String>,
  pub product_price: f64,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
