//! Persisted user preferences.
//!
//! Preferences are a flat key/value table (theme and color scheme selection,
//! data directories, keyboard behavior toggles). They are stored as TOML with
//! platform-specific directory resolution.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::CONFIG_DIR_ENV;

/// A persisted key/value preference table.
///
/// Getters never fail: a missing key or a value of the wrong type yields the
/// caller's default. Setters persist immediately.
pub trait PreferenceStore: Send + Sync {
    /// Returns the raw stored value.
    fn get(&self, key: &str) -> Option<toml::Value>;

    /// Stores `value` under `key` and persists it.
    fn set(&mut self, key: &str, value: toml::Value) -> Result<()>;

    /// Reads a string preference.
    fn string(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Some(toml::Value::String(s)) => s,
            Some(toml::Value::Integer(n)) => n.to_string(),
            Some(toml::Value::Float(x)) => x.to_string(),
            Some(toml::Value::Boolean(b)) => b.to_string(),
            Some(other) => {
                tracing::warn!("preference {} is a {}, using default", key, other.type_str());
                default.to_string()
            }
            None => default.to_string(),
        }
    }

    /// Reads a boolean preference.
    fn boolean(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(toml::Value::Boolean(b)) => b,
            Some(toml::Value::String(s)) if s.eq_ignore_ascii_case("true") => true,
            Some(toml::Value::String(s)) if s.eq_ignore_ascii_case("false") => false,
            Some(other) => {
                tracing::warn!("preference {} is not a boolean: {}", key, other);
                default
            }
            None => default,
        }
    }

    /// Reads an integer preference.
    fn integer(&self, key: &str, default: i64) -> i64 {
        match self.get(key) {
            Some(toml::Value::Integer(n)) => n,
            Some(toml::Value::String(s)) => s.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("preference {} is not an integer: {}", key, s);
                default
            }),
            Some(other) => {
                tracing::warn!("preference {} is not an integer: {}", key, other);
                default
            }
            None => default,
        }
    }

    /// Stores a string preference.
    fn set_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.set(key, toml::Value::String(value.to_string()))
    }
}

/// In-memory preferences, for embedding and tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryPreferences {
    values: toml::Table,
}

impl MemoryPreferences {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder that presets `key`.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<toml::Value>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<toml::Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: toml::Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Preferences backed by a TOML file.
///
/// # File Location
///
/// - Linux: `~/.config/trime/preferences.toml`
/// - macOS: `~/Library/Application Support/trime/preferences.toml`
/// - Windows: `%APPDATA%\trime\preferences.toml`
///
/// The directory can be overridden with `TRIME_CONFIG_DIR`.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceFile {
    path: PathBuf,
    values: toml::Table,
}

impl PreferenceFile {
    /// Gets the preference directory, honoring `TRIME_CONFIG_DIR`.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("trime");

        Ok(config_dir)
    }

    /// Gets the full path to the preference file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("preferences.toml"))
    }

    /// Loads preferences from the default location.
    ///
    /// If the file doesn't exist, returns an empty table bound to that path.
    pub fn load() -> Result<Self> {
        Self::open(Self::config_file_path()?)
    }

    /// Loads preferences from `path`, starting empty if it doesn't exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                values: toml::Table::new(),
            });
        }

        let content = fs::read_to_string(&path).context(format!(
            "Failed to read preference file: {}",
            path.display()
        ))?;

        let values: toml::Table = toml::from_str(&content).context(format!(
            "Failed to parse preference file: {}",
            path.display()
        ))?;

        Ok(Self { path, values })
    }

    /// Path this table is persisted to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current values.
    #[must_use]
    pub const fn values(&self) -> &toml::Table {
        &self.values
    }

    /// Saves preferences using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).context(format!(
                "Failed to create config directory: {}",
                dir.display()
            ))?;
        }

        let content =
            toml::to_string_pretty(&self.values).context("Failed to serialize preferences")?;

        let temp_path = self.path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp preference file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &self.path).context(format!(
            "Failed to rename temp preference file to: {}",
            self.path.display()
        ))?;

        Ok(())
    }
}

impl PreferenceStore for PreferenceFile {
    fn get(&self, key: &str) -> Option<toml::Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: toml::Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::pref_keys;
    use tempfile::TempDir;

    #[test]
    fn test_missing_keys_use_defaults() {
        let prefs = MemoryPreferences::new();
        assert_eq!(prefs.string(pref_keys::SELECTED_THEME, "trime"), "trime");
        assert!(prefs.boolean(pref_keys::SHOW_WINDOW, true));
        assert_eq!(prefs.integer(pref_keys::LONGPRESS_TIMEOUT, 20), 20);
    }

    #[test]
    fn test_wrong_types_fall_back() {
        let prefs = MemoryPreferences::new()
            .with(pref_keys::SHOW_WINDOW, 3)
            .with(pref_keys::REPEAT_INTERVAL, "fast")
            .with(pref_keys::SOFT_CURSOR, "TRUE")
            .with(pref_keys::LONGPRESS_TIMEOUT, "35");

        assert!(!prefs.boolean(pref_keys::SHOW_WINDOW, false));
        assert_eq!(prefs.integer(pref_keys::REPEAT_INTERVAL, 4), 4);
        assert!(prefs.boolean(pref_keys::SOFT_CURSOR, false));
        assert_eq!(prefs.integer(pref_keys::LONGPRESS_TIMEOUT, 20), 35);
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let prefs = PreferenceFile::open(temp_dir.path().join("preferences.toml")).unwrap();
        assert!(prefs.values().is_empty());
        assert!(!prefs.path().exists());
    }

    #[test]
    fn test_set_persists_and_reloads() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("preferences.toml");

        let mut prefs = PreferenceFile::open(&path).unwrap();
        prefs
            .set_string(pref_keys::SELECTED_COLOR_SCHEME, "classic")
            .unwrap();
        prefs
            .set(pref_keys::SHOW_PREVIEW, toml::Value::Boolean(true))
            .unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("toml.tmp").exists());

        let reloaded = PreferenceFile::open(&path).unwrap();
        assert_eq!(
            reloaded.string(pref_keys::SELECTED_COLOR_SCHEME, "default"),
            "classic"
        );
        assert!(reloaded.boolean(pref_keys::SHOW_PREVIEW, false));
    }

    #[test]
    fn test_open_rejects_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preferences.toml");
        fs::write(&path, "pref_selected_theme = ").unwrap();

        let err = PreferenceFile::open(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse preference file"));
    }
}
