//! Theme store reading a Rime data directory.
//!
//! Documents are looked up in the user directory before the shared one, and
//! in each directory the compiled copy under `build/` wins over the source
//! file. Parsed documents are cached until [`ThemeStore::invalidate`].

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use super::ThemeStore;
use crate::error::ConfigResult;
use crate::models::{ConfigScope, Value};

/// Theme store backed by `*.yaml` files.
#[derive(Debug)]
pub struct YamlThemeStore {
    shared_dir: PathBuf,
    user_dir: PathBuf,
    cache: Mutex<HashMap<PathBuf, Arc<ConfigScope>>>,
}

impl YamlThemeStore {
    /// Creates a store over the given shared and user data directories.
    #[must_use]
    pub fn new(shared_dir: impl Into<PathBuf>, user_dir: impl Into<PathBuf>) -> Self {
        Self {
            shared_dir: shared_dir.into(),
            user_dir: user_dir.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Shared data directory.
    #[must_use]
    pub fn shared_dir(&self) -> &Path {
        &self.shared_dir
    }

    /// User data directory.
    #[must_use]
    pub fn user_dir(&self) -> &Path {
        &self.user_dir
    }

    fn search_dirs(&self) -> [PathBuf; 4] {
        [
            self.user_dir.join("build"),
            self.user_dir.clone(),
            self.shared_dir.join("build"),
            self.shared_dir.clone(),
        ]
    }

    /// Finds the first existing file among `names`, trying each name in every directory.
    fn locate(&self, names: &[String]) -> Option<PathBuf> {
        let dirs = self.search_dirs();
        names
            .iter()
            .flat_map(|name| dirs.iter().map(move |dir| dir.join(name)))
            .find(|path| path.is_file())
    }

    fn document(&self, path: &Path) -> ConfigResult<Arc<ConfigScope>> {
        if let Some(doc) = self.cache.lock().get(path) {
            return Ok(Arc::clone(doc));
        }
        tracing::debug!("loading {}", path.display());
        let text = fs::read_to_string(path)?;
        let doc = match ConfigScope::from_yaml_str(&text) {
            Ok(doc) => Arc::new(doc),
            Err(err) => {
                tracing::error!("cannot parse {}: {}", path.display(), err);
                return Err(err);
            }
        };
        self.cache
            .lock()
            .insert(path.to_path_buf(), Arc::clone(&doc));
        Ok(doc)
    }

    fn config_document(&self, config_id: &str) -> ConfigResult<Option<Arc<ConfigScope>>> {
        let names = [format!("{config_id}.yaml"), format!("{config_id}.trime.yaml")];
        self.locate(&names)
            .map(|path| self.document(&path))
            .transpose()
    }

    fn schema_document(&self, schema_id: &str) -> ConfigResult<Option<Arc<ConfigScope>>> {
        self.locate(&[format!("{schema_id}.schema.yaml")])
            .map(|path| self.document(&path))
            .transpose()
    }
}

impl ThemeStore for YamlThemeStore {
    fn config_value(&self, config_id: &str, path: &str) -> ConfigResult<Option<Value>> {
        Ok(self
            .config_document(config_id)?
            .and_then(|doc| doc.lookup(path).cloned()))
    }

    fn schema_value(&self, schema_id: &str, path: &str) -> ConfigResult<Option<Value>> {
        Ok(self
            .schema_document(schema_id)?
            .and_then(|doc| doc.lookup(path).cloned()))
    }

    fn active_schema_id(&self) -> ConfigResult<Option<String>> {
        if let Some(id) = self.load_string("user", "var/previously_selected_schema")? {
            return Ok(Some(id));
        }
        let first = self
            .load_list("default", "schema_list")?
            .and_then(|list| list.into_iter().next())
            .and_then(|entry| entry.as_scope()?.get("schema")?.to_text());
        Ok(first)
    }

    fn invalidate(&self) {
        self.cache.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_user_dir_shadows_shared_dir() {
        let shared = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        write(shared.path(), "trime.yaml", "style:\n  key_height: 40\n");
        write(user.path(), "trime.yaml", "style:\n  key_height: 48\n");

        let store = YamlThemeStore::new(shared.path(), user.path());
        assert_eq!(
            store.config_value("trime", "style/key_height").unwrap(),
            Some(Value::from(48_i64))
        );
    }

    #[test]
    fn test_build_dir_wins_over_source() {
        let shared = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        write(user.path(), "trime.yaml", "style:\n  key_height: 40\n");
        write(&user.path().join("build"), "trime.yaml", "style:\n  key_height: 44\n");

        let store = YamlThemeStore::new(shared.path(), user.path());
        assert_eq!(
            store.config_value("trime", "style/key_height").unwrap(),
            Some(Value::from(44_i64))
        );
    }

    #[test]
    fn test_trime_suffix_and_schema_files() {
        let shared = TempDir::new().unwrap();
        write(shared.path(), "tongwenfeng.trime.yaml", "config_version: '1.0'\n");
        write(
            shared.path(),
            "luna_pinyin.schema.yaml",
            "schema:\n  schema_id: luna_pinyin\n",
        );

        let store = YamlThemeStore::new(shared.path(), shared.path().join("user"));
        assert_eq!(
            store.load_string("tongwenfeng", "config_version").unwrap().as_deref(),
            Some("1.0")
        );
        assert_eq!(
            store
                .schema_string("luna_pinyin", "schema/schema_id")
                .unwrap()
                .as_deref(),
            Some("luna_pinyin")
        );
        assert!(store.config_value("missing", "style").unwrap().is_none());
    }

    #[test]
    fn test_active_schema_sources() {
        let shared = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        write(
            shared.path(),
            "default.yaml",
            "schema_list:\n  - schema: cangjie5\n  - schema: luna_pinyin\n",
        );

        let store = YamlThemeStore::new(shared.path(), user.path());
        assert_eq!(store.active_schema_id().unwrap().as_deref(), Some("cangjie5"));

        write(
            user.path(),
            "user.yaml",
            "var:\n  previously_selected_schema: luna_pinyin\n",
        );
        store.invalidate();
        assert_eq!(
            store.active_schema_id().unwrap().as_deref(),
            Some("luna_pinyin")
        );
    }

    #[test]
    fn test_cache_until_invalidated() {
        let shared = TempDir::new().unwrap();
        write(shared.path(), "trime.yaml", "config_version: '1.0'\n");
        let store = YamlThemeStore::new(shared.path(), shared.path());
        assert!(store.load_string("trime", "config_version").unwrap().is_some());

        write(shared.path(), "trime.yaml", "style: {}\n");
        assert!(store.load_string("trime", "config_version").unwrap().is_some());

        store.invalidate();
        assert!(store.load_string("trime", "config_version").unwrap().is_none());
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let shared = TempDir::new().unwrap();
        write(shared.path(), "trime.yaml", "style: [unclosed\n");
        let store = YamlThemeStore::new(shared.path(), shared.path());
        assert!(store.config_value("trime", "style").is_err());
    }
}
