//! Route table lookup.
//!
//! # Responsibilities
//! - Store route entries in registration order
//! - Find the first entry matching a request path
//! - Return matched values or explicit no-match
//!
//! # Design Decisions
//! - Built during startup, read-only once handed to the dispatcher
//! - O(n) scan over entries (acceptable for typical route counts)
//! - First match wins; nothing after it is tried

use crate::config::RouteConfig;
use crate::routing::matcher::{PatternError, RouteEntry};
use crate::routing::values::RouteValues;

/// Ordered collection of route entries.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a route table from configured routes, preserving their order.
    pub fn from_config(routes: &[RouteConfig]) -> Result<Self, PatternError> {
        let mut table = Self::new();
        for route in routes {
            table.map_route(&route.name, &route.pattern, route.default_values())?;
        }
        Ok(table)
    }

    /// Append a route. Routes are tried in the order they are mapped.
    ///
    /// ```
    /// use route_dispatch::routing::{RouteTable, RouteValues};
    ///
    /// let mut routes = RouteTable::new();
    /// routes
    ///     .map_route("about", "/about", [("controller", "home"), ("action", "about")].into_iter().collect())?
    ///     .map_route("default", "/{controller}/{action}", RouteValues::new())?;
    /// assert_eq!(routes.len(), 2);
    /// # Ok::<(), route_dispatch::routing::PatternError>(())
    /// ```
    pub fn map_route(
        &mut self,
        name: &str,
        pattern: &str,
        defaults: RouteValues,
    ) -> Result<&mut Self, PatternError> {
        let entry = RouteEntry::new(name, pattern, defaults)?;
        tracing::debug!(route = %entry.name(), pattern = %entry.pattern(), "Route mapped");
        self.entries.push(entry);
        Ok(self)
    }

    /// Resolve `path` to the values of the first matching route.
    pub fn resolve(&self, path: &str) -> Option<RouteValues> {
        self.resolve_entry(path).map(|(_, values)| values)
    }

    /// Like [`resolve`](Self::resolve), also returning the matched entry.
    pub fn resolve_entry(&self, path: &str) -> Option<(&RouteEntry, RouteValues)> {
        self.entries
            .iter()
            .find_map(|entry| entry.match_path(path).map(|values| (entry, values)))
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> RouteValues {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_first_match_wins() {
        let mut table = RouteTable::new();
        table
            .map_route("about", "/home/about", values(&[("controller", "info"), ("action", "about")]))
            .unwrap()
            .map_route("default", "/{controller}/{action}", values(&[("action", "index")]))
            .unwrap();

        let (entry, matched) = table.resolve_entry("/home/about").unwrap();
        assert_eq!(entry.name(), "about");
        assert_eq!(matched.controller(), Some("info"));

        let (entry, matched) = table.resolve_entry("/home/contact").unwrap();
        assert_eq!(entry.name(), "default");
        assert_eq!(matched.controller(), Some("home"));
        assert_eq!(matched.action(), Some("contact"));
    }

    #[test]
    fn test_registration_order_decides_overlaps() {
        let mut table = RouteTable::new();
        table
            .map_route("generic", "/{controller}/{action}", RouteValues::new())
            .unwrap()
            .map_route("specific", "/home/about", values(&[("controller", "info"), ("action", "about")]))
            .unwrap();

        let (entry, _) = table.resolve_entry("/home/about").unwrap();
        assert_eq!(entry.name(), "generic");
    }

    #[test]
    fn test_no_match() {
        let mut table = RouteTable::new();
        table
            .map_route("default", "/{controller}/{action}", values(&[("action", "index")]))
            .unwrap();
        assert!(table.resolve("/unknown/path/too/long").is_none());
        assert!(RouteTable::new().resolve("/").is_none());
    }

    #[test]
    fn test_invalid_pattern_is_not_added() {
        let mut table = RouteTable::new();
        assert!(table.map_route("bad", "no-slash", RouteValues::new()).is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn test_from_config_preserves_order() {
        let routes = vec![
            RouteConfig::new("first", "/a/{action}").with_default("controller", "alpha"),
            RouteConfig::new("second", "/{controller}/{action}"),
        ];
        let table = RouteTable::from_config(&routes).unwrap();
        let names: Vec<_> = table.entries().iter().map(RouteEntry::name).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(table.resolve("/a/run").unwrap().controller(), Some("alpha"));
    }
}
