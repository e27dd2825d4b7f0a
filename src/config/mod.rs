//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → routes compiled into the RouteTable at startup
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; the route table is never rebuilt while serving
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::ServerConfig;
pub use schema::ListenerConfig;
pub use schema::{LogFormat, ObservabilityConfig, TimeoutConfig};
pub use schema::{RouteConfig, RouteDefault};
pub use validation::{validate_config, ValidationError};
