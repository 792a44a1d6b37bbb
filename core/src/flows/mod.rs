// core/src/flows/mod.rs

//! Multi-step catalog workflows built on the step pipeline.

pub mod create_product;

pub use create_product::{build_create_product_pipeline, CreateProductCtxData};
