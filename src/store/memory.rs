//! In-process theme store.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::ThemeStore;
use crate::error::ConfigResult;
use crate::models::{ConfigScope, Value};

/// Theme store holding already-parsed documents.
///
/// # Examples
///
/// ```
/// use trime_config::store::{MemoryThemeStore, ThemeStore};
///
/// let store = MemoryThemeStore::new()
///     .with_config_yaml("trime", "config_version: '3.0'\nstyle:\n  key_height: 40\n")
///     .unwrap();
/// assert!(store.load_map("trime", "style").unwrap().is_some());
/// ```
#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    configs: HashMap<String, ConfigScope>,
    schemas: HashMap<String, ConfigScope>,
    active_schema: RwLock<Option<String>>,
}

impl MemoryThemeStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a config document.
    #[must_use]
    pub fn with_config(mut self, config_id: &str, document: ConfigScope) -> Self {
        self.configs.insert(config_id.to_string(), document);
        self
    }

    /// Adds a schema document. The first schema added becomes the active one.
    #[must_use]
    pub fn with_schema(mut self, schema_id: &str, document: ConfigScope) -> Self {
        self.schemas.insert(schema_id.to_string(), document);
        let active = self.active_schema.get_mut();
        if active.is_none() {
            *active = Some(schema_id.to_string());
        }
        self
    }

    /// Parses and adds a config document.
    pub fn with_config_yaml(self, config_id: &str, yaml: &str) -> ConfigResult<Self> {
        Ok(self.with_config(config_id, ConfigScope::from_yaml_str(yaml)?))
    }

    /// Parses and adds a schema document.
    pub fn with_schema_yaml(self, schema_id: &str, yaml: &str) -> ConfigResult<Self> {
        Ok(self.with_schema(schema_id, ConfigScope::from_yaml_str(yaml)?))
    }

    /// Changes the active schema.
    pub fn select_schema(&self, schema_id: &str) {
        *self.active_schema.write() = Some(schema_id.to_string());
    }
}

impl ThemeStore for MemoryThemeStore {
    fn config_value(&self, config_id: &str, path: &str) -> ConfigResult<Option<Value>> {
        Ok(self
            .configs
            .get(config_id)
            .and_then(|doc| doc.lookup(path))
            .cloned())
    }

    fn schema_value(&self, schema_id: &str, path: &str) -> ConfigResult<Option<Value>> {
        Ok(self
            .schemas
            .get(schema_id)
            .and_then(|doc| doc.lookup(path))
            .cloned())
    }

    fn active_schema_id(&self) -> ConfigResult<Option<String>> {
        Ok(self.active_schema.read().clone())
    }
}
