//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::routing::values::{RouteValues, ACTION_KEY, CONTROLLER_KEY};

/// Root configuration for the server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address, body limit).
    pub listener: ListenerConfig,

    /// Route definitions, tried in the order listed.
    pub routes: Vec<RouteConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            routes: vec![RouteConfig::conventional()],
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum request body size buffered for handlers, in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_body_bytes: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// A named URL pattern with default route values.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier for logging.
    pub name: String,

    /// URL template, e.g. `/{controller}/{action}`.
    pub pattern: String,

    /// Values used when the path does not supply them.
    #[serde(default)]
    pub defaults: BTreeMap<String, RouteDefault>,
}

impl RouteConfig {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            defaults: BTreeMap::new(),
        }
    }

    /// The conventional `/{controller}/{action}` route, defaulting to `home/index`.
    pub fn conventional() -> Self {
        Self::new("default", "/{controller}/{action}")
            .with_default(CONTROLLER_KEY, "home")
            .with_default(ACTION_KEY, "index")
    }

    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<RouteDefault>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    /// Defaults rendered as textual route values.
    pub fn default_values(&self) -> RouteValues {
        self.defaults
            .iter()
            .map(|(k, v)| (k.as_str(), v.to_string()))
            .collect()
    }
}

/// A default route value as written in TOML.
///
/// Route values are textual, so every scalar is stored as its string form.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RouteDefault {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for RouteDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteDefault::Text(s) => f.write_str(s),
            RouteDefault::Integer(i) => write!(f, "{}", i),
            RouteDefault::Float(x) => write!(f, "{}", x),
            RouteDefault::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for RouteDefault {
    fn from(value: &str) -> Self {
        RouteDefault::Text(value.to_string())
    }
}

impl From<String> for RouteDefault {
    fn from(value: String) -> Self {
        RouteDefault::Text(value)
    }
}

impl From<i64> for RouteDefault {
    fn from(value: i64) -> Self {
        RouteDefault::Integer(value)
    }
}

impl From<bool> for RouteDefault {
    fn from(value: bool) -> Self {
        RouteDefault::Bool(value)
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, for development.
    #[default]
    Pretty,
    /// One JSON object per event, for log aggregation.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_conventional_route() {
        let config = ServerConfig::default();
        assert_eq!(config.routes.len(), 1);
        let route = &config.routes[0];
        assert_eq!(route.name, "default");
        assert_eq!(route.pattern, "/{controller}/{action}");

        let values = route.default_values();
        assert_eq!(values.controller(), Some("home"));
        assert_eq!(values.action(), Some("index"));
    }

    #[test]
    fn test_parse_toml_routes() {
        let config: ServerConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:3000"

            [observability]
            log_format = "json"

            [[routes]]
            name = "product"
            pattern = "/product/{id}"
            defaults = { controller = "products", action = "show", page = 1, preview = false }
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
        assert_eq!(config.listener.max_body_bytes, 2 * 1024 * 1024);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.timeouts.request_secs, 30);

        let values = config.routes[0].default_values();
        assert_eq!(values.get("controller"), Some("products"));
        assert_eq!(values.get("page"), Some("1"));
        assert_eq!(values.get("preview"), Some("false"));
    }

    #[test]
    fn test_missing_routes_use_default() {
        let config: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(config.routes, vec![RouteConfig::conventional()]);
    }
}
