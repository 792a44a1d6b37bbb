// core/src/models/mod.rs

//! Data structures representing the `products` table and the creation request.

pub mod product;

pub use product::{NewProduct, Product};
