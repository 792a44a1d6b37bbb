// gateway/src/web/handlers/mod.rs

pub mod product_handlers;
