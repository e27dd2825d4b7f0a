//! Convention-based URL routing and handler/action dispatch.
//!
//! Route patterns such as `/{controller}/{action}` map request paths to
//! route values; `controller` picks a registered handler type
//! (`home` → `HomeHandler`) and `action` picks one of its actions
//! (`about` → `About`). Remaining route values are bound to the action's
//! typed parameters by name.

pub mod config;
pub mod dispatch;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::schema::ServerConfig;
pub use dispatch::{ActionResult, ActionTable, DispatchError, Dispatcher, Handler, HandlerRegistry};
pub use http::{AppServer, HttpContext, MiddlewareResult, RequestContext};
pub use routing::{RouteTable, RouteValues};
