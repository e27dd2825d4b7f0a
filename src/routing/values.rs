//! Route values extracted from a matched request path.

use std::collections::BTreeMap;
use std::fmt;

/// Key holding the controller token used to pick a handler.
pub const CONTROLLER_KEY: &str = "controller";

/// Key holding the action token used to pick a handler method.
pub const ACTION_KEY: &str = "action";

/// Mapping of route parameter names to their raw textual values.
///
/// Produced per request by matching a path against a route pattern and
/// merged with the route's defaults. Keys are ordered so that logging and
/// debug output are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteValues {
    values: BTreeMap<String, String>,
}

impl RouteValues {
    /// Create an empty set of route values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Insert a value, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Insert a value only if the key is not already bound.
    ///
    /// Returns `true` if the value was inserted.
    pub fn insert_if_absent(&mut self, key: &str, value: &str) -> bool {
        if self.values.contains_key(key) {
            return false;
        }
        self.values.insert(key.to_string(), value.to_string());
        true
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The `controller` value, if bound.
    pub fn controller(&self) -> Option<&str> {
        self.get(CONTROLLER_KEY)
    }

    /// The `action` value, if bound.
    pub fn action(&self) -> Option<&str> {
        self.get(ACTION_KEY)
    }
}

impl<K, V> FromIterator<(K, V)> for RouteValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl fmt::Display for RouteValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", k, v)?;
        }
        write!(f, "}}")
    }
}
