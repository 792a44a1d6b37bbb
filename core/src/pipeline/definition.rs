// core/src/pipeline/definition.rs

//! The `Pipeline<TData, Err>` struct and its construction.

use super::context_data::ContextData;
use super::control::PipelineControl;
use crate::error::PipelineError;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

/// A type-erased step handler.
///
/// Handlers take ownership of a clone of the context handle. They must drop any
/// lock guard before awaiting.
pub type Handler<TData, Err> = Box<
  dyn Fn(ContextData<TData>) -> Pin<Box<dyn Future<Output = Result<PipelineControl, Err>> + Send>>
    + Send
    + Sync,
>;

/// An ordered list of named steps and the handlers registered for them.
///
/// `Err` must be constructible from `PipelineError` so that framework failures
/// (a step left without handlers) surface through the same error type as
/// handler failures.
pub struct Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  pub(crate) steps: Vec<String>,
  pub(crate) before: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) on: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) after: HashMap<String, Vec<Handler<TData, Err>>>,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Creates a pipeline with the given steps, in execution order.
  ///
  /// Panics on a duplicated step name.
  pub fn new(step_names: &[&str]) -> Self {
    let mut steps: Vec<String> = Vec::with_capacity(step_names.len());
    for name in step_names {
      if steps.iter().any(|s| s == name) {
        panic!("Pipeline setup error: Step '{}' declared twice.", name);
      }
      steps.push((*name).to_string());
    }

    Self {
      steps,
      before: HashMap::new(),
      on: HashMap::new(),
      after: HashMap::new(),
    }
  }

  pub fn step_names(&self) -> impl Iterator<Item = &str> {
    self.steps.iter().map(String::as_str)
  }

  /// Panics if `step_name` was not declared. Registering a handler on an
  /// unknown step is a setup bug (usually a typo), not a runtime condition.
  pub(crate) fn ensure_step_exists(&self, step_name: &str) {
    if !self.steps.iter().any(|s| s == step_name) {
      panic!(
        "Pipeline setup error: Step '{}' not found in pipeline definition.",
        step_name
      );
    }
  }
}
