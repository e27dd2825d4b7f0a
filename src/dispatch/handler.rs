//! Handler registration and resolution.
//!
//! # Responsibilities
//! - Keep a table of handler types keyed by their conventional type name
//! - Turn a controller token into a fresh handler instance for one request
//! - Inject the request context into that instance
//!
//! # Design Decisions
//! - Explicit registration at startup instead of runtime type discovery
//! - Constant-time lookup by exact type name (`Capitalize(token) + "Handler"`)
//! - Each handler's action table is built once and shared by its instances
//! - Instances are per request and never reused

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::dispatch::action::{ActionDescriptor, ActionTable};
use crate::dispatch::error::{DispatchError, DispatchResult};
use crate::dispatch::naming::{capitalize, handler_type_name, HANDLER_SUFFIX};
use crate::dispatch::result::ActionResult;
use crate::http::context::RequestContext;
use crate::routing::values::RouteValues;

/// A group of related request-handling actions.
///
/// A new value is created with `Default` for every dispatched request.
///
/// ```
/// use route_dispatch::dispatch::{ActionTable, Handler};
/// use route_dispatch::http::RequestContext;
///
/// #[derive(Default)]
/// struct HomeHandler {
///     request: RequestContext,
/// }
///
/// impl HomeHandler {
///     fn index(&mut self) -> String {
///         format!("Hello from {}", self.request.path())
///     }
/// }
///
/// impl Handler for HomeHandler {
///     const NAME: &'static str = "HomeHandler";
///
///     fn set_context(&mut self, context: RequestContext) {
///         self.request = context;
///     }
///
///     fn actions(actions: &mut ActionTable<Self>) {
///         actions.action("Index", &[], Self::index);
///     }
/// }
/// ```
pub trait Handler: Default + Send + 'static {
    /// Type name the handler is discovered by, e.g. `HomeHandler`.
    const NAME: &'static str;

    /// Attach the current request before any action runs.
    fn set_context(&mut self, context: RequestContext);

    /// Register this handler's actions.
    fn actions(actions: &mut ActionTable<Self>);
}

/// Errors produced when registering a handler type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The name cannot be produced by the naming convention.
    #[error("handler name `{0}` must be a capitalized name ending in `Handler`")]
    InvalidName(&'static str),

    #[error("handler `{0}` is already registered")]
    Duplicate(&'static str),
}

/// Object-safe view of a handler instance paired with its action table.
trait ErasedHandler: Send {
    fn resolve_action(&self, token: &str) -> DispatchResult<ActionDescriptor>;

    fn invoke(
        &mut self,
        descriptor: &ActionDescriptor,
        values: &RouteValues,
    ) -> DispatchResult<ActionResult>;
}

struct BoundHandler<H> {
    handler: H,
    actions: Arc<ActionTable<H>>,
}

impl<H: Handler> ErasedHandler for BoundHandler<H> {
    fn resolve_action(&self, token: &str) -> DispatchResult<ActionDescriptor> {
        self.actions.resolve_action(H::NAME, token)
    }

    fn invoke(
        &mut self,
        descriptor: &ActionDescriptor,
        values: &RouteValues,
    ) -> DispatchResult<ActionResult> {
        self.actions.invoke(&mut self.handler, descriptor, values)
    }
}

/// A handler created for the current request, with its context injected.
pub struct HandlerInstance {
    name: &'static str,
    inner: Box<dyn ErasedHandler>,
}

impl HandlerInstance {
    /// Registered type name, e.g. `HomeHandler`.
    pub fn type_name(&self) -> &'static str {
        self.name
    }

    /// Find the action for `token` on this handler.
    pub fn resolve_action(&self, token: &str) -> DispatchResult<ActionDescriptor> {
        self.inner.resolve_action(token)
    }

    /// Bind `values` to the action's parameters and run it.
    pub fn invoke(
        &mut self,
        descriptor: &ActionDescriptor,
        values: &RouteValues,
    ) -> DispatchResult<ActionResult> {
        if descriptor.handler() != self.name {
            return Err(DispatchError::ActionNotFound {
                handler: self.name.to_string(),
                action: descriptor.name().to_string(),
            });
        }
        self.inner.invoke(descriptor, values)
    }
}

impl fmt::Debug for HandlerInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerInstance").field("name", &self.name).finish()
    }
}

type Factory = Box<dyn Fn(RequestContext) -> Box<dyn ErasedHandler> + Send + Sync>;

struct Registration {
    factory: Factory,
    actions: Vec<String>,
}

/// Table of known handler types.
///
/// Populated during startup, then only read.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<&'static str, Registration>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register handler type `H` under `H::NAME`.
    pub fn register<H: Handler>(&mut self) -> Result<&mut Self, RegistryError> {
        let name = H::NAME;
        let prefix = name
            .strip_suffix(HANDLER_SUFFIX)
            .filter(|p| !p.is_empty() && capitalize(p) == *p)
            .ok_or(RegistryError::InvalidName(name))?;

        if self.handlers.contains_key(name) {
            return Err(RegistryError::Duplicate(name));
        }

        let mut table = ActionTable::new();
        H::actions(&mut table);
        let action_names = table.names().map(str::to_string).collect::<Vec<_>>();
        let table = Arc::new(table);

        let factory: Factory = Box::new(move |context| {
            let mut handler = H::default();
            handler.set_context(context);
            Box::new(BoundHandler {
                handler,
                actions: Arc::clone(&table),
            })
        });

        tracing::debug!(
            handler = name,
            controller = prefix,
            actions = ?action_names,
            "Handler registered"
        );

        self.handlers.insert(
            name,
            Registration {
                factory,
                actions: action_names,
            },
        );
        Ok(self)
    }

    /// Create the handler for `controller`, with `context` attached.
    pub fn resolve(
        &self,
        controller: &str,
        context: RequestContext,
    ) -> DispatchResult<HandlerInstance> {
        let type_name = handler_type_name(controller);
        let (&name, registration) = self
            .handlers
            .get_key_value(type_name.as_str())
            .ok_or(DispatchError::HandlerNotFound(type_name))?;

        Ok(HandlerInstance {
            name,
            inner: (registration.factory)(context),
        })
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.handlers.contains_key(type_name)
    }

    /// Registered handler names with their action names, sorted by handler.
    pub fn describe(&self) -> Vec<(&'static str, &[String])> {
        let mut handlers: Vec<_> = self
            .handlers
            .iter()
            .map(|(&name, r)| (name, r.actions.as_slice()))
            .collect();
        handlers.sort_by_key(|(name, _)| *name);
        handlers
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.describe()).finish()
    }
}
