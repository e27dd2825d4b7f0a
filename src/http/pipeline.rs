//! Ordered middleware pipeline.
//!
//! Each stage either processes the request (writes a response) or lets the
//! next stage try. Errors stop the pipeline and are returned to the host.

use std::fmt;
use std::sync::Arc;

use crate::dispatch::error::DispatchResult;
use crate::http::context::HttpContext;

/// Outcome of a pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiddlewareResult {
    /// The stage handled the request; later stages are skipped.
    Processed,
    /// The stage did not handle the request; try the next one.
    Continue,
}

/// A synchronous pipeline stage.
pub trait Middleware: Send + Sync {
    /// Stage name for logging.
    fn name(&self) -> &str;

    fn execute(&self, ctx: &mut HttpContext) -> DispatchResult<MiddlewareResult>;
}

/// Stages run in the order they were added.
#[derive(Clone, Default)]
pub struct Pipeline {
    stages: Vec<Arc<dyn Middleware>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage.
    pub fn with(mut self, stage: impl Middleware + 'static) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Run stages until one returns `Processed` or fails.
    ///
    /// Returns `Continue` if every stage continued.
    pub fn run(&self, ctx: &mut HttpContext) -> DispatchResult<MiddlewareResult> {
        for stage in &self.stages {
            match stage.execute(ctx)? {
                MiddlewareResult::Processed => {
                    tracing::trace!(stage = stage.name(), "Request processed");
                    return Ok(MiddlewareResult::Processed);
                }
                MiddlewareResult::Continue => continue,
            }
        }
        Ok(MiddlewareResult::Continue)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.stages.iter().map(|s| s.name()))
            .finish()
    }
}
