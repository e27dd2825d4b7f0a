//! HTTP hosting subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layers, body buffering)
//!     → request.rs (request ID assigned)
//!     → context.rs (HttpContext built from the buffered request)
//!     → pipeline.rs (stages in order; the dispatcher is one of them)
//!     → response from the context, 404 if nothing processed it
//! ```

pub mod context;
pub mod pipeline;
pub mod request;
pub mod server;

pub use context::{HttpContext, RequestContext};
pub use pipeline::{Middleware, MiddlewareResult, Pipeline};
pub use request::{MakeRequestUuidV4, REQUEST_ID_HEADER};
pub use server::{AppServer, AppState};
