//! Sources of compiled theme and schema configuration.
//!
//! The Rime engine owns YAML compilation; this layer only reads the result.
//! [`ThemeStore`] is the seam between the resolution engine and wherever the
//! documents live: [`MemoryThemeStore`] for embedding and tests,
//! [`YamlThemeStore`] for a Rime data directory on disk.

pub mod memory;
pub mod resources;
pub mod yaml;

pub use memory::MemoryThemeStore;
pub use resources::{
    opencc_dictionaries, theme_files, theme_name, OpenccDictionary, ResourceDirs, ThemeEntry,
};
pub use yaml::YamlThemeStore;

use crate::error::ConfigResult;
use crate::models::{ConfigScope, Value};

/// Read access to theme (`<id>.yaml`) and schema (`<id>.schema.yaml`) documents.
///
/// `path` arguments are `/`-separated. A missing document or key is `Ok(None)`;
/// errors are reserved for documents that exist but cannot be read.
pub trait ThemeStore: Send + Sync {
    /// Looks up `path` in the config document `config_id`.
    fn config_value(&self, config_id: &str, path: &str) -> ConfigResult<Option<Value>>;

    /// Looks up `path` in the schema document `schema_id`.
    fn schema_value(&self, schema_id: &str, path: &str) -> ConfigResult<Option<Value>>;

    /// Id of the schema the engine currently has selected.
    fn active_schema_id(&self) -> ConfigResult<Option<String>>;

    /// Drops anything cached so the next read sees the current documents.
    fn invalidate(&self) {}

    /// Mapping at `path` in a config document.
    fn load_map(&self, config_id: &str, path: &str) -> ConfigResult<Option<ConfigScope>> {
        match self.config_value(config_id, path)? {
            None => Ok(None),
            Some(Value::Mapping(scope)) => Ok(Some(scope)),
            Some(other) => Err(other.mismatch(&format!("{config_id}:{path}"), "mapping")),
        }
    }

    /// Sequence at `path` in a config document.
    fn load_list(&self, config_id: &str, path: &str) -> ConfigResult<Option<Vec<Value>>> {
        match self.config_value(config_id, path)? {
            None => Ok(None),
            Some(Value::Sequence(items)) => Ok(Some(items)),
            Some(other) => Err(other.mismatch(&format!("{config_id}:{path}"), "sequence")),
        }
    }

    /// Scalar at `path` in a config document, as text.
    fn load_string(&self, config_id: &str, path: &str) -> ConfigResult<Option<String>> {
        self.config_value(config_id, path)?
            .map(|value| value.try_text(&format!("{config_id}:{path}")))
            .transpose()
    }

    /// Mapping at `path` in a schema document.
    fn schema_map(&self, schema_id: &str, path: &str) -> ConfigResult<Option<ConfigScope>> {
        match self.schema_value(schema_id, path)? {
            None => Ok(None),
            Some(Value::Mapping(scope)) => Ok(Some(scope)),
            Some(other) => Err(other.mismatch(&format!("{schema_id}:{path}"), "mapping")),
        }
    }

    /// Scalar at `path` in a schema document, as text.
    fn schema_string(&self, schema_id: &str, path: &str) -> ConfigResult<Option<String>> {
        self.schema_value(schema_id, path)?
            .map(|value| value.try_text(&format!("{schema_id}:{path}")))
            .transpose()
    }
}
