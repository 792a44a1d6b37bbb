// gateway/src/lib.rs

//! HTTP front of the Catalog Gateway: actix-web routes over `catalog_core`.

pub mod config;
pub mod errors;
pub mod state;
pub mod telemetry;
pub mod web;
