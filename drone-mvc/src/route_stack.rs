//! Named path-pattern routes.
//!
//! A route stack is a second, independent route space next to the module
//! route table: routes are addressed by name and matched against a request
//! path. The router owns one and only forwards `add_pattern_route` to it.

use crate::RouteStackError;
use crate::logging::trace;
use std::collections::HashMap;

/// Result of matching a path against a route stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteStackMatch {
    /// Name the route was registered under
    pub name: String,
    /// Captured path parameters
    pub params: HashMap<String, String>,
}

/// A path-pattern route delegate
pub trait RouteStack: Send {
    /// Add a named route. Rejected if the name is taken or the pattern is
    /// malformed or conflicts with an existing one.
    fn add_route(&mut self, name: &str, pattern: &str) -> Result<(), RouteStackError>;

    /// Match a request path
    fn match_path(&self, path: &str) -> Option<RouteStackMatch>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Segment-tree route stack on top of `matchit`.
///
/// Patterns use `{name}` for a segment and `{*name}` for a catch-all:
///
/// ```
/// use drone_mvc::route_stack::{RouteStack, SegmentRouteStack};
///
/// let mut stack = SegmentRouteStack::new();
/// stack.add_route("post", "/posts/{id}").unwrap();
///
/// let matched = stack.match_path("/posts/42").unwrap();
/// assert_eq!(matched.name, "post");
/// assert_eq!(matched.params["id"], "42");
/// ```
#[derive(Default)]
pub struct SegmentRouteStack {
    tree: matchit::Router<String>,
    patterns: HashMap<String, String>,
}

impl SegmentRouteStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pattern registered under `name`
    pub fn pattern(&self, name: &str) -> Option<&str> {
        self.patterns.get(name).map(String::as_str)
    }
}

impl RouteStack for SegmentRouteStack {
    fn add_route(&mut self, name: &str, pattern: &str) -> Result<(), RouteStackError> {
        if self.patterns.contains_key(name) {
            return Err(RouteStackError::DuplicateName(name.to_string()));
        }

        self.tree
            .insert(pattern, name.to_string())
            .map_err(|e| RouteStackError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;

        trace!(name, pattern, "Pattern route added");
        self.patterns.insert(name.to_string(), pattern.to_string());
        Ok(())
    }

    fn match_path(&self, path: &str) -> Option<RouteStackMatch> {
        let matched = self.tree.at(path).ok()?;
        Some(RouteStackMatch {
            name: matched.value.clone(),
            params: matched
                .params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        })
    }

    fn len(&self) -> usize {
        self.patterns.len()
    }
}

impl std::fmt::Debug for SegmentRouteStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentRouteStack")
            .field("patterns", &self.patterns)
            .finish()
    }
}
