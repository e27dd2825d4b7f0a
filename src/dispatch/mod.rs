//! Handler and action dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! RouteValues { controller, action, .. }
//!     → handler.rs (Capitalize(controller) + "Handler" → new instance + context)
//!     → action.rs (Capitalize(action) → descriptor; bind typed parameters; invoke)
//!     → result.rs (return value → ActionResult → response)
//!
//! dispatcher.rs ties the above to the route table for one request.
//! ```
//!
//! # Design Decisions
//! - Registration tables replace runtime type discovery and reflection
//! - Naming convention preserved exactly (naming.rs)
//! - Every failure propagates; nothing degrades into "route not matched"

pub mod action;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod naming;
pub mod result;

pub use action::{ActionDescriptor, ActionFn, ActionTable, FromRouteValue};
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, DispatchResult};
pub use handler::{Handler, HandlerInstance, HandlerRegistry, RegistryError};
pub use result::{ActionResult, IntoActionResult};
