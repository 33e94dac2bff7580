// Route table: module keys mapped to their default controller and view

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reserved route key holding the fallback identifiers.
pub const DEFAULTS_KEY: &str = "defaults";

/// Descriptor stored under a route key.
///
/// Module entries use `controller` and `view`; the `defaults` entry uses
/// `module`. Anything else in the entry is kept as opaque module config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(flatten)]
    pub config: serde_json::Map<String, serde_json::Value>,
}

impl RouteDescriptor {
    /// Descriptor for a module: its default controller and view
    pub fn new(controller: impl Into<String>, view: impl Into<String>) -> Self {
        Self {
            controller: Some(controller.into()),
            view: Some(view.into()),
            ..Self::default()
        }
    }

    /// Attach an opaque config value to the descriptor
    pub fn with_config(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.config.insert(key.into(), value);
        self
    }
}

/// A single route table entry (key → descriptor)
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub key: String,
    pub descriptor: RouteDescriptor,
}

impl Route {
    pub fn new(key: impl Into<String>, descriptor: RouteDescriptor) -> Self {
        Self {
            key: key.into(),
            descriptor,
        }
    }

    /// The reserved `defaults` entry naming the fallback module
    pub fn defaults(module: impl Into<String>) -> Self {
        Self::new(
            DEFAULTS_KEY,
            RouteDescriptor {
                module: Some(module.into()),
                ..RouteDescriptor::default()
            },
        )
    }

    /// A module entry with its default controller and view
    pub fn module(
        name: impl Into<String>,
        controller: impl Into<String>,
        view: impl Into<String>,
    ) -> Self {
        Self::new(name, RouteDescriptor::new(controller, view))
    }
}

/// Route table with single-insertion keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteTable {
    entries: HashMap<String, RouteDescriptor>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. A key that is already present is rejected and the
    /// table is left untouched.
    pub fn insert(&mut self, route: Route) -> Result<()> {
        if self.entries.contains_key(&route.key) {
            return Err(Error::DuplicateRouteKey(route.key));
        }
        self.entries.insert(route.key, route.descriptor);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&RouteDescriptor> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The `defaults` entry, if configured
    pub fn defaults(&self) -> Option<&RouteDescriptor> {
        self.entries.get(DEFAULTS_KEY)
    }

    /// Fallback module name from the `defaults` entry
    pub fn default_module(&self) -> Option<&str> {
        self.defaults().and_then(|d| d.module.as_deref())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RouteDescriptor)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
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

    #[test]
    fn test_insert_and_lookup() {
        let mut table = RouteTable::new();
        table.insert(Route::defaults("blog")).unwrap();
        table.insert(Route::module("blog", "Index", "show")).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.default_module(), Some("blog"));
        let blog = table.get("blog").unwrap();
        assert_eq!(blog.controller.as_deref(), Some("Index"));
        assert_eq!(blog.view.as_deref(), Some("show"));
    }

    #[test]
    fn test_duplicate_key_leaves_table_unchanged() {
        let mut table = RouteTable::new();
        table.insert(Route::module("blog", "Index", "show")).unwrap();

        let err = table.insert(Route::module("blog", "Other", "list")).unwrap_err();
        assert!(matches!(err, Error::DuplicateRouteKey(ref key) if key == "blog"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("blog").unwrap().controller.as_deref(), Some("Index"));
    }

    #[test]
    fn test_defaults_entry_is_a_plain_key() {
        let mut table = RouteTable::new();
        table.insert(Route::defaults("blog")).unwrap();
        assert!(table.contains_key(DEFAULTS_KEY));
        assert_eq!(table.get(DEFAULTS_KEY), table.defaults());
        assert!(table.defaults().unwrap().controller.is_none());
    }

    #[test]
    fn test_descriptor_keeps_opaque_config() {
        let json = serde_json::json!({
            "controller": "Index",
            "view": "show",
            "theme": {"layout": "wide"}
        });
        let descriptor: RouteDescriptor = serde_json::from_value(json).unwrap();

        assert_eq!(descriptor.controller.as_deref(), Some("Index"));
        assert_eq!(descriptor.config["theme"]["layout"], "wide");
        assert!(descriptor.module.is_none());
    }
}
