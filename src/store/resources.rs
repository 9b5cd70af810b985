//! Rime data directories and the resource files that live in them.
//!
//! Themes, background images, fonts and OpenCC dictionaries are plain files
//! under the shared or user data directory.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::pref_keys;
use crate::prefs::PreferenceStore;

/// The pair of Rime data directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceDirs {
    shared: PathBuf,
    user: PathBuf,
}

impl ResourceDirs {
    /// Creates a pair from explicit directories.
    #[must_use]
    pub fn new(shared: impl Into<PathBuf>, user: impl Into<PathBuf>) -> Self {
        Self {
            shared: shared.into(),
            user: user.into(),
        }
    }

    /// Default data directory: `<platform data dir>/rime`.
    pub fn default_data_dir() -> Result<PathBuf> {
        Ok(dirs::data_dir()
            .context("Failed to determine data directory")?
            .join("rime"))
    }

    /// Reads `shared_data_dir` / `user_data_dir`, both defaulting to
    /// [`ResourceDirs::default_data_dir`].
    pub fn from_preferences(prefs: &dyn PreferenceStore) -> Result<Self> {
        let default = Self::default_data_dir()?;
        let default = default.to_string_lossy();
        Ok(Self::new(
            prefs.string(pref_keys::SHARED_DATA_DIR, &default),
            prefs.string(pref_keys::USER_DATA_DIR, &default),
        ))
    }

    /// Shared data directory.
    #[must_use]
    pub fn shared(&self) -> &Path {
        &self.shared
    }

    /// User data directory.
    #[must_use]
    pub fn user(&self) -> &Path {
        &self.user
    }

    /// Resource subdirectory: `shared/sub` if it exists, else `user/sub`.
    ///
    /// # Examples
    ///
    /// ```
    /// use trime_config::store::ResourceDirs;
    ///
    /// let dirs = ResourceDirs::new("/nonexistent/shared", "/nonexistent/user");
    /// assert!(dirs.resolve("fonts").starts_with("/nonexistent/user"));
    /// ```
    #[must_use]
    pub fn resolve(&self, sub: &str) -> PathBuf {
        let shared = self.shared.join(sub);
        if shared.exists() {
            shared
        } else {
            self.user.join(sub)
        }
    }
}

/// A theme file found in a data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeEntry {
    /// Full path of the file
    pub file: PathBuf,
    /// Config id the engine knows the theme by (file name without `.yaml`)
    pub id: String,
    /// Display name
    pub name: String,
}

/// Display name for a theme file name: strips `.trime.yaml`, then `.yaml`.
#[must_use]
pub fn theme_name(file_name: &str) -> String {
    file_name.replace(".trime.yaml", "").replace(".yaml", "")
}

/// Lists the `*trime.yaml` files in `dir`, sorted by file name.
///
/// A missing directory yields an empty list.
pub fn theme_files(dir: &Path) -> Result<Vec<ThemeEntry>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir)
        .context(format!("Failed to read theme directory: {}", dir.display()))?;

    let mut themes = Vec::new();
    for entry in entries {
        let entry = entry.context("Failed to read directory entry")?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !file_name.ends_with("trime.yaml") || !entry.path().is_file() {
            continue;
        }
        themes.push(ThemeEntry {
            file: entry.path(),
            id: file_name.trim_end_matches(".yaml").to_string(),
            name: theme_name(&file_name),
        });
    }

    themes.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(themes)
}

/// An OpenCC text dictionary and the compiled file the engine builds from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenccDictionary {
    /// `*.txt` source
    pub source: PathBuf,
    /// `*.ocd` target
    pub target: PathBuf,
}

/// Lists the OpenCC dictionaries under the `opencc` resource directory.
pub fn opencc_dictionaries(resources: &ResourceDirs) -> Result<Vec<OpenccDictionary>> {
    let dir = resources.resolve("opencc");
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut dictionaries: Vec<OpenccDictionary> = fs::read_dir(&dir)
        .context(format!("Failed to read OpenCC directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .map(|source| OpenccDictionary {
            target: source.with_extension("ocd"),
            source,
        })
        .collect();

    dictionaries.sort_by(|a, b| a.source.cmp(&b.source));
    Ok(dictionaries)
}
