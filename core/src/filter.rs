// core/src/filter.rs

//! Filtering for product listings.
//!
//! List parameters arrive as raw strings. `ProductFilter::parse` enforces the
//! mandatory `user_id` and converts the remaining values the way the store's
//! parameter binding would, producing a `ParsedFilter` that can be rendered
//! into SQL (`ParsedFilter::to_list_query`) or evaluated in memory
//! (`ParsedFilter::matches`).

use crate::error::{CatalogError, CatalogResult};
use crate::models::Product;
use std::str::FromStr;

/// Columns selected for every product read. NULL arrays read back as empty.
pub const PRODUCT_COLUMNS: &str = "id, user_id, product_name, product_description, \
  COALESCE(product_images, '{}') AS product_images, \
  COALESCE(compressed_product_images, '{}') AS compressed_product_images, \
  product_price, created_at";

/// Raw listing parameters, exactly as received in the query string.
/// Empty values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
  pub user_id: Option<String>,
  pub price_min: Option<String>,
  pub price_max: Option<String>,
  pub product_name: Option<String>,
}

impl ProductFilter {
  /// Builds a filter from decoded query pairs. When a key repeats, the first
  /// occurrence wins; unknown keys are ignored.
  pub fn from_query_pairs<I>(pairs: I) -> Self
  where
    I: IntoIterator<Item = (String, String)>,
  {
    let mut filter = Self::default();
    for (key, value) in pairs {
      let slot = match key.as_str() {
        "user_id" => &mut filter.user_id,
        "price_min" => &mut filter.price_min,
        "price_max" => &mut filter.price_max,
        "product_name" => &mut filter.product_name,
        _ => continue,
      };
      if slot.is_none() {
        *slot = Some(value);
      }
    }
    filter
  }

  pub fn for_user(user_id: impl Into<String>) -> Self {
    Self {
      user_id: Some(user_id.into()),
      ..Self::default()
    }
  }

  pub fn with_price_min(mut self, price_min: impl Into<String>) -> Self {
    self.price_min = Some(price_min.into());
    self
  }

  pub fn with_price_max(mut self, price_max: impl Into<String>) -> Self {
    self.price_max = Some(price_max.into());
    self
  }

  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.product_name = Some(name.into());
    self
  }

  /// Validates and binds the raw parameters.
  ///
  /// A missing `user_id` is a validation error. Values that do not parse as
  /// the column type are storage errors, since binding them is the store's
  /// job. The price range is only applied when *both* bounds are present; a
  /// single bound is ignored.
  pub fn parse(&self) -> CatalogResult<ParsedFilter> {
    let raw_user_id =
      non_empty(&self.user_id).ok_or_else(|| CatalogError::Validation("user_id is required".to_string()))?;
    let user_id = bind_param::<i32>(raw_user_id, "integer")?;

    let price_range = match (non_empty(&self.price_min), non_empty(&self.price_max)) {
      (Some(min), Some(max)) => Some((
        bind_param::<f64>(min, "double precision")?,
        bind_param::<f64>(max, "double precision")?,
      )),
      _ => None,
    };

    let name_pattern = non_empty(&self.product_name).map(|name| format!("%{}%", name.to_lowercase()));

    Ok(ParsedFilter {
      user_id,
      price_range,
      name_pattern,
    })
  }
}

/// Listing filter after validation and binding.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFilter {
  pub user_id: i32,
  /// Inclusive `(min, max)`.
  pub price_range: Option<(f64, f64)>,
  /// Lowercased LIKE pattern, already wrapped in `%`.
  pub name_pattern: Option<String>,
}

/// A value bound to a positional SQL placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
  Int(i32),
  Float(f64),
  Text(String),
}

/// A rendered listing statement together with its arguments, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
  pub sql: String,
  pub binds: Vec<BindValue>,
}

impl ParsedFilter {
  /// Renders the filtered `SELECT`. Placeholders are numbered by the position
  /// of their argument, so any combination of filters stays well formed.
  /// No ordering or pagination is applied.
  pub fn to_list_query(&self) -> ListQuery {
    let mut sql = format!("SELECT {} FROM products WHERE user_id = $1", PRODUCT_COLUMNS);
    let mut binds = vec![BindValue::Int(self.user_id)];

    if let Some((min, max)) = self.price_range {
      binds.push(BindValue::Float(min));
      binds.push(BindValue::Float(max));
      sql.push_str(&format!(
        " AND product_price BETWEEN ${} AND ${}",
        binds.len() - 1,
        binds.len()
      ));
    }

    if let Some(pattern) = &self.name_pattern {
      binds.push(BindValue::Text(pattern.clone()));
      sql.push_str(&format!(" AND LOWER(product_name) LIKE ${}", binds.len()));
    }

    ListQuery { sql, binds }
  }

  /// Evaluates the filter against a product the same way the SQL does.
  pub fn matches(&self, product: &Product) -> bool {
    if product.user_id != self.user_id {
      return false;
    }
    if let Some((min, max)) = self.price_range {
      if product.product_price < min || product.product_price > max {
        return false;
      }
    }
    match &self.name_pattern {
      Some(pattern) => like_matches(&product.product_name.to_lowercase(), pattern),
      None => true,
    }
  }
}

/// Parses a raw parameter as the store would when binding it to a column of
/// type `sql_type`.
pub(crate) fn bind_param<T: FromStr>(raw: &str, sql_type: &str) -> CatalogResult<T> {
  raw
    .trim()
    .parse::<T>()
    .map_err(|_| CatalogError::Storage(format!("invalid input syntax for type {}: \"{}\"", sql_type, raw)))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
  value.as_deref().filter(|v| !v.is_empty())
}

enum LikeToken {
  AnySequence,
  AnyChar,
  Literal(char),
}

fn tokenize_like(pattern: &str) -> Vec<LikeToken> {
  let mut tokens = Vec::new();
  let mut chars = pattern.chars();
  while let Some(c) = chars.next() {
    tokens.push(match c {
      '%' => LikeToken::AnySequence,
      '_' => LikeToken::AnyChar,
      // Backslash is the default LIKE escape character.
      '\\' => LikeToken::Literal(chars.next().unwrap_or('\\')),
      other => LikeToken::Literal(other),
    });
  }
  tokens
}

/// SQL `LIKE` semantics (`%`, `_`, backslash escape), case-sensitive.
fn like_matches(text: &str, pattern: &str) -> bool {
  let text: Vec<char> = text.chars().collect();
  let tokens = tokenize_like(pattern);

  let (mut t, mut p) = (0usize, 0usize);
  // Position of the last `%` seen and the text index it is currently absorbing up to.
  let mut backtrack: Option<(usize, usize)> = None;

  while t < text.len() {
    match tokens.get(p) {
      Some(LikeToken::AnySequence) => {
        backtrack = Some((p, t));
        p += 1;
        continue;
      }
      Some(LikeToken::AnyChar) => {
        t += 1;
        p += 1;
        continue;
      }
      Some(LikeToken::Literal(c)) if *c == text[t] => {
        t += 1;
        p += 1;
        continue;
      }
      _ => {}
    }

    match backtrack {
      Some((star_p, star_t)) => {
        p = star_p + 1;
        t = star_t + 1;
        backtrack = Some((star_p, star_t + 1));
      }
      None => return false,
    }
  }

  tokens[p..].iter().all(|tok| matches!(tok, LikeToken::AnySequence))
}
