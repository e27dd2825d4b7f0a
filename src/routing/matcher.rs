//! Route pattern parsing and path matching.
//!
//! # Responsibilities
//! - Parse URL templates like `/{controller}/{action}` into segments
//! - Match a request path against a parsed pattern
//! - Merge route defaults into the extracted values
//!
//! # Design Decisions
//! - Literal segments are compared exactly (case-sensitive)
//! - Path values always win over defaults; defaults only fill gaps
//! - A path may omit trailing placeholders only when they have defaults
//! - More path segments than pattern segments is never a match
//! - No regex; matching is a single pass over the segments

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use crate::routing::values::RouteValues;

/// Errors produced when parsing a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Patterns are absolute paths.
    #[error("pattern `{0}` must start with `/`")]
    MissingLeadingSlash(String),

    /// `{}` with nothing inside.
    #[error("pattern `{0}` contains an empty placeholder name")]
    EmptyPlaceholder(String),

    /// Two consecutive separators.
    #[error("pattern `{0}` contains an empty segment")]
    EmptySegment(String),

    /// Stray `{` or `}`, or a segment mixing literal text and a placeholder.
    #[error("pattern `{pattern}` has a malformed segment `{segment}`")]
    MalformedSegment { pattern: String, segment: String },

    #[error("pattern `{pattern}` binds placeholder `{name}` more than once")]
    DuplicatePlaceholder { pattern: String, name: String },
}

/// A single `/`-separated piece of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text the path segment must equal exactly.
    Literal(String),
    /// A named value bound from the path segment.
    Placeholder(String),
}

/// A parsed route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a pattern such as `/blog/{year}/{slug}`.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let body = pattern
            .strip_prefix('/')
            .ok_or_else(|| PatternError::MissingLeadingSlash(pattern.to_string()))?;
        let body = body.strip_suffix('/').unwrap_or(body);

        let mut segments = Vec::new();
        let mut seen = HashSet::new();

        if !body.is_empty() {
            for raw in body.split('/') {
                let segment = parse_segment(pattern, raw)?;
                if let Segment::Placeholder(name) = &segment {
                    if !seen.insert(name.clone()) {
                        return Err(PatternError::DuplicatePlaceholder {
                            pattern: pattern.to_string(),
                            name: name.clone(),
                        });
                    }
                }
                segments.push(segment);
            }
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    /// The pattern text as registered.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of all placeholders, in pattern order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_segment(pattern: &str, raw: &str) -> Result<Segment, PatternError> {
    if raw.is_empty() {
        return Err(PatternError::EmptySegment(pattern.to_string()));
    }

    let malformed = || PatternError::MalformedSegment {
        pattern: pattern.to_string(),
        segment: raw.to_string(),
    };

    if let Some(inner) = raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        if inner.is_empty() {
            return Err(PatternError::EmptyPlaceholder(pattern.to_string()));
        }
        if inner.contains(['{', '}']) {
            return Err(malformed());
        }
        return Ok(Segment::Placeholder(inner.to_string()));
    }

    if raw.contains(['{', '}']) {
        return Err(malformed());
    }
    Ok(Segment::Literal(raw.to_string()))
}

/// Split a request path into segments, ignoring one leading and one trailing `/`.
fn split_path(path: &str) -> Vec<&str> {
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = path.strip_suffix('/').unwrap_or(path);
    if path.is_empty() {
        Vec::new()
    } else {
        path.split('/').collect()
    }
}

/// A named route: pattern plus default values.
///
/// Immutable once constructed.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    name: String,
    pattern: RoutePattern,
    defaults: RouteValues,
}

impl RouteEntry {
    /// Create a route entry, parsing its pattern.
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        defaults: RouteValues,
    ) -> Result<Self, PatternError> {
        Ok(Self {
            name: name.into(),
            pattern: RoutePattern::parse(pattern)?,
            defaults,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn defaults(&self) -> &RouteValues {
        &self.defaults
    }

    /// Test `path` against this route.
    ///
    /// Returns the bound placeholder values merged with the defaults, or
    /// `None` if the path does not structurally match.
    pub fn match_path(&self, path: &str) -> Option<RouteValues> {
        let parts = split_path(path);
        let segments = self.pattern.segments();

        if parts.len() > segments.len() {
            return None;
        }

        let mut values = RouteValues::new();
        for (i, segment) in segments.iter().enumerate() {
            match (segment, parts.get(i)) {
                (Segment::Literal(text), Some(part)) => {
                    if text != part {
                        return None;
                    }
                }
                (Segment::Placeholder(name), Some(part)) => {
                    if part.is_empty() {
                        return None;
                    }
                    values.insert(name.as_str(), *part);
                }
                (Segment::Placeholder(name), None) => {
                    if !self.defaults.contains_key(name) {
                        return None;
                    }
                }
                (Segment::Literal(_), None) => return None,
            }
        }

        for (key, value) in self.defaults.iter() {
            values.insert_if_absent(key, value);
        }

        Some(values)
    }
}
