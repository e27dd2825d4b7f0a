//! Route-to-action dispatch for a single request.

use crate::dispatch::error::{DispatchError, DispatchResult};
use crate::dispatch::handler::HandlerRegistry;
use crate::dispatch::result::ActionResult;
use crate::http::context::{HttpContext, RequestContext};
use crate::http::pipeline::{Middleware, MiddlewareResult};
use crate::routing::matcher::RouteEntry;
use crate::routing::router::RouteTable;
use crate::routing::values::{RouteValues, ACTION_KEY, CONTROLLER_KEY};

/// Composition root: route table + handler registry.
///
/// Both are fixed once the dispatcher is built, so a dispatcher can be
/// shared across request tasks behind an `Arc`.
#[derive(Debug)]
pub struct Dispatcher {
    routes: RouteTable,
    handlers: HandlerRegistry,
}

impl Dispatcher {
    pub fn new(routes: RouteTable, handlers: HandlerRegistry) -> Self {
        Self { routes, handlers }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    /// Route the request in `ctx` and, on a match, run the action and write
    /// its response into `ctx`.
    ///
    /// Returns `Continue` when no route matches. Resolution and binding
    /// failures are returned as errors, never turned into `Continue`.
    pub fn execute(&self, ctx: &mut HttpContext) -> DispatchResult<MiddlewareResult> {
        let Some((entry, values)) = self.routes.resolve_entry(ctx.request().path()) else {
            tracing::trace!(path = %ctx.request().path(), "No route matched");
            return Ok(MiddlewareResult::Continue);
        };

        let result = self.dispatch(entry, &values, ctx.request().clone())?;
        result.execute(ctx);
        Ok(MiddlewareResult::Processed)
    }

    /// Resolve handler and action for already matched route values, then invoke.
    pub fn dispatch(
        &self,
        entry: &RouteEntry,
        values: &RouteValues,
        request: RequestContext,
    ) -> DispatchResult<ActionResult> {
        let controller = required(entry, values, CONTROLLER_KEY)?;
        let action = required(entry, values, ACTION_KEY)?;

        tracing::debug!(
            request_id = request.request_id().unwrap_or("unknown"),
            route = %entry.name(),
            controller = %controller,
            action = %action,
            "Route matched"
        );

        let mut handler = self.handlers.resolve(controller, request)?;
        let descriptor = handler.resolve_action(action)?;

        tracing::trace!(action = %descriptor, values = %values, "Invoking action");
        handler.invoke(&descriptor, values)
    }
}

fn required<'a>(
    entry: &RouteEntry,
    values: &'a RouteValues,
    key: &'static str,
) -> DispatchResult<&'a str> {
    values.get(key).ok_or_else(|| DispatchError::MissingRouteValue {
        route: entry.name().to_string(),
        key,
    })
}

impl Middleware for Dispatcher {
    fn name(&self) -> &str {
        "routing"
    }

    fn execute(&self, ctx: &mut HttpContext) -> DispatchResult<MiddlewareResult> {
        Dispatcher::execute(self, ctx)
    }
}
