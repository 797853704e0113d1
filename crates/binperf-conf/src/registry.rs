//! Name-keyed registry of typed configuration builders
//!
//! Each entry maps a logical name (`"cv"`, `"kmeans"`) to a builder taking an
//! explicit parameter struct, and a `__type__` tag (`"CvConf"`) to a JSON
//! loader. Registries are plain values: build one at startup and pass it by
//! reference.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::error::{ConfError, ConfResult};

/// Key of the type tag in serialized configurations
pub const TYPE_KEY: &str = "__type__";

/// Builders for one configuration kind
pub struct ConfEntry<P, T> {
    /// Tag written under `__type__` in JSON
    pub type_tag: &'static str,
    /// Build from explicit parameters
    pub from_params: fn(&P) -> ConfResult<T>,
    /// Build from a serialized document
    pub from_json: fn(&Value) -> ConfResult<T>,
}

impl<P, T> Clone for ConfEntry<P, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, T> Copy for ConfEntry<P, T> {}

impl<P, T> fmt::Debug for ConfEntry<P, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfEntry")
            .field("type_tag", &self.type_tag)
            .finish()
    }
}

/// Registry mapping names to configuration builders
pub struct ConfRegistry<P, T> {
    entries: HashMap<String, ConfEntry<P, T>>,
}

impl<P, T> ConfRegistry<P, T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register builders under `name`, replacing any previous entry
    pub fn register(&mut self, name: impl Into<String>, entry: ConfEntry<P, T>) {
        let name = name.into();
        debug!(name = %name, type_tag = entry.type_tag, "Registered configuration");
        self.entries.insert(name, entry);
    }

    /// Check if a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Build the configuration registered under `name`
    pub fn from_param(&self, name: &str, params: &P) -> ConfResult<T> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| ConfError::Unknown(name.to_string()))?;
        (entry.from_params)(params)
    }

    /// Build a configuration from a document carrying a `__type__` tag
    pub fn from_json(&self, value: &Value) -> ConfResult<T> {
        let tag = value
            .get(TYPE_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| ConfError::Json(format!("missing '{TYPE_KEY}' string field")))?;
        let entry = self
            .entries
            .values()
            .find(|entry| entry.type_tag == tag)
            .ok_or_else(|| ConfError::Unknown(tag.to_string()))?;
        (entry.from_json)(value)
    }
}

impl<P, T> Default for ConfRegistry<P, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, T> fmt::Debug for ConfRegistry<P, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfRegistry")
            .field("names", &self.names())
            .finish()
    }
}
