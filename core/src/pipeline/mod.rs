// core/src/pipeline/mod.rs

//! A small asynchronous pipeline of named steps.
//!
//! A `Pipeline<TData, Err>` runs its steps in declaration order. Each step can
//! carry `before`, `on` and `after` handlers; every handler receives a clone of
//! the shared `ContextData<TData>` and returns a `PipelineControl` telling the
//! pipeline whether to keep going.

pub mod context_data;
pub mod control;
pub mod definition;
pub mod execution;
pub mod hooks;

pub use context_data::ContextData;
pub use control::{PipelineControl, PipelineResult};
pub use definition::{Handler, Pipeline};
