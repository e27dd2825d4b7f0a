//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route registration (at startup):
//!     RouteConfig[] / map_route calls
//!     → matcher.rs (parse pattern into segments)
//!     → router.rs (append in registration order)
//!     → Frozen behind the dispatcher
//!
//! Incoming request path
//!     → router.rs (scan entries in order)
//!     → matcher.rs (segment match + defaults)
//!     → Return: RouteValues or no match
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same path always matches same route
//! - First match wins (registration order)

pub mod matcher;
pub mod router;
pub mod values;

pub use matcher::{PatternError, RouteEntry, RoutePattern, Segment};
pub use router::RouteTable;
pub use values::{RouteValues, ACTION_KEY, CONTROLLER_KEY};
