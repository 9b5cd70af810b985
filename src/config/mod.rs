//! The configuration resolution engine.
//!
//! [`Config`] holds the loaded theme and schema state and answers the lookups
//! UI components make: style values, colors and drawables, keyboard layouts.
//! One instance is shared per process behind an `Arc`; theme and schema
//! switches replace the whole state under a write lock.

pub mod accessors;
pub mod color;
pub mod keyboard;
pub mod resolver;
pub mod settings;

pub use color::ColorResolver;
pub use keyboard::KeyboardResolver;
pub use resolver::StyleLayers;
pub use settings::{InlineMode, UiSettings, WindowPosition};

use std::sync::Arc;

use parking_lot::{MappedRwLockReadGuard, Mutex, RwLock, RwLockReadGuard};
use serde::Serialize;

use crate::constants::{pref_keys, DEFAULT_SYMBOLS, DEFAULT_SYMBOL_START, DEFAULT_THEME};
use crate::error::{ConfigError, ConfigResult};
use crate::models::{ConfigScope, Value};
use crate::prefs::PreferenceStore;
use crate::store::{ResourceDirs, ThemeStore};

/// Screen density used to turn `sp` dimensions into pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayMetrics {
    /// Pixels per `sp`
    pub scaled_density: f32,
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self {
            scaled_density: 1.0,
        }
    }
}

impl DisplayMetrics {
    /// Creates metrics with the given scaled density.
    #[must_use]
    pub const fn new(scaled_density: f32) -> Self {
        Self { scaled_density }
    }

    /// Converts `sp` to pixels, truncating toward zero.
    #[must_use]
    pub fn sp_to_px(self, sp: f32) -> i32 {
        (sp * self.scaled_density) as i32
    }
}

/// The theme's Android key table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AndroidKeys {
    /// Key names in keycode order
    pub names: Vec<String>,
    /// Characters mapped onto the symbol keycodes
    pub symbols: String,
    /// Keycode of the first symbol key
    pub symbol_start: usize,
}

impl Default for AndroidKeys {
    fn default() -> Self {
        Self {
            names: Vec::new(),
            symbols: DEFAULT_SYMBOLS.to_string(),
            symbol_start: DEFAULT_SYMBOL_START,
        }
    }
}

impl AndroidKeys {
    /// Builds the table from `android_keys/name` and `android_keys/symbols`.
    ///
    /// The symbol start is the position of `A` in the names, or
    /// [`DEFAULT_SYMBOL_START`] without one. Empty symbols fall back to
    /// [`DEFAULT_SYMBOLS`].
    #[must_use]
    pub fn new(names: Vec<String>, symbols: Option<String>) -> Self {
        let symbol_start = names
            .iter()
            .position(|name| name == "A")
            .unwrap_or(DEFAULT_SYMBOL_START);
        let symbols = symbols
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SYMBOLS.to_string());
        Self {
            names,
            symbols,
            symbol_start,
        }
    }

    /// Keycode for `name`, if the theme lists it.
    #[must_use]
    pub fn keycode(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

/// Everything derived from the active schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct SchemaState {
    pub(crate) schema_id: String,
    pub(crate) style: ConfigScope,
    pub(crate) alphabet: Option<String>,
}

impl SchemaState {
    fn load(store: &dyn ThemeStore, schema_id: String) -> ConfigResult<Self> {
        tracing::debug!("loading schema {}", schema_id);
        let style = store.schema_map(&schema_id, "style")?.unwrap_or_default();
        let alphabet = store.schema_string(&schema_id, "speller/alphabet")?;
        Ok(Self {
            schema_id,
            style,
            alphabet,
        })
    }
}

/// Everything derived from the active theme and schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ThemeState {
    pub(crate) theme: String,
    pub(crate) schema_id: String,
    pub(crate) alphabet: Option<String>,
    pub(crate) layers: StyleLayers,
    pub(crate) fallback_colors: ConfigScope,
    pub(crate) color_schemes: Option<ConfigScope>,
    pub(crate) keyboards: Option<ConfigScope>,
    pub(crate) android_keys: AndroidKeys,
    pub(crate) preset_keys: ConfigScope,
}

impl ThemeState {
    /// Loads `requested`, falling back to the default theme when it has no
    /// `config_version`.
    fn load(store: &dyn ThemeStore, requested: &str) -> ConfigResult<Self> {
        let version = store.load_string(requested, "config_version")?;
        let theme = if version.as_deref().is_some_and(|v| !v.is_empty()) {
            requested.to_string()
        } else {
            tracing::warn!(
                "theme {} has no config_version, using {}",
                requested,
                DEFAULT_THEME
            );
            DEFAULT_THEME.to_string()
        };
        tracing::debug!("loading theme {}", theme);

        let names = store
            .load_list(&theme, "android_keys/name")?
            .unwrap_or_default()
            .iter()
            .filter_map(Value::to_text)
            .collect();
        let symbols = store.load_string(&theme, "android_keys/symbols")?;
        let android_keys = AndroidKeys::new(names, symbols);

        let mut state = Self {
            layers: StyleLayers::new(
                ConfigScope::new(),
                store.load_map(&theme, "style")?.unwrap_or_default(),
            ),
            fallback_colors: store.load_map(&theme, "fallback_colors")?.unwrap_or_default(),
            color_schemes: store.load_map(&theme, "preset_color_schemes")?,
            keyboards: store.load_map(&theme, "preset_keyboards")?,
            preset_keys: store.load_map(&theme, "preset_keys")?.unwrap_or_default(),
            android_keys,
            theme,
            ..Self::default()
        };

        let schema_id = store.active_schema_id()?.unwrap_or_else(|| {
            tracing::warn!("no active schema");
            String::new()
        });
        state.apply_schema(SchemaState::load(store, schema_id)?);
        Ok(state)
    }

    fn apply_schema(&mut self, schema: SchemaState) {
        self.schema_id = schema.schema_id;
        self.alphabet = schema.alphabet;
        self.layers.style = schema.style;
    }

    pub(crate) fn color_schemes(&self) -> ConfigResult<&ConfigScope> {
        self.color_schemes
            .as_ref()
            .ok_or(ConfigError::NotInitialized("preset_color_schemes"))
    }

    pub(crate) fn keyboards(&self) -> ConfigResult<&ConfigScope> {
        self.keyboards
            .as_ref()
            .ok_or(ConfigError::NotInitialized("preset_keyboards"))
    }
}

/// The configuration resolution engine.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use trime_config::config::Config;
/// use trime_config::prefs::MemoryPreferences;
/// use trime_config::store::{MemoryThemeStore, ResourceDirs};
///
/// let store = MemoryThemeStore::new()
///     .with_config_yaml("trime", "config_version: '3.0'\nstyle:\n  key_height: 40\n")
///     .unwrap();
/// let config = Config::create(
///     Arc::new(store),
///     Box::new(MemoryPreferences::new()),
///     ResourceDirs::new("/tmp/shared", "/tmp/user"),
/// )
/// .unwrap();
/// assert_eq!(config.get_int("key_height"), 40);
/// ```
pub struct Config {
    store: Arc<dyn ThemeStore>,
    prefs: Mutex<Box<dyn PreferenceStore>>,
    resources: ResourceDirs,
    metrics: DisplayMetrics,
    state: RwLock<Option<ThemeState>>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("resources", &self.resources)
            .field("metrics", &self.metrics)
            .field("theme", &self.theme())
            .field("schema_id", &self.schema_id())
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Creates the engine and loads the theme named by `pref_selected_theme`.
    pub fn create(
        store: Arc<dyn ThemeStore>,
        prefs: Box<dyn PreferenceStore>,
        resources: ResourceDirs,
    ) -> ConfigResult<Self> {
        let theme = prefs.string(pref_keys::SELECTED_THEME, DEFAULT_THEME);
        let state = ThemeState::load(store.as_ref(), &theme)?;
        Ok(Self {
            store,
            prefs: Mutex::new(prefs),
            resources,
            metrics: DisplayMetrics::default(),
            state: RwLock::new(Some(state)),
        })
    }

    /// Sets the density used by the pixel accessors.
    #[must_use]
    pub fn with_display_metrics(mut self, metrics: DisplayMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Persists `name` as the selected theme and reloads everything.
    ///
    /// The new theme is applied before the preference is written; a failed
    /// write is reported as [`ConfigError::Preference`] with the theme
    /// already active.
    pub fn switch_theme(&self, name: &str) -> ConfigResult<()> {
        self.store.invalidate();
        let state = ThemeState::load(self.store.as_ref(), name)?;
        *self.state.write() = Some(state);
        self.persist(pref_keys::SELECTED_THEME, name)
    }

    /// Returns whether the store has a theme `name` with a `config_version`.
    pub fn has_theme(&self, name: &str) -> ConfigResult<bool> {
        let version = self.store.load_string(name, "config_version")?;
        Ok(version.is_some_and(|v| !v.is_empty()))
    }

    /// Re-reads the active schema from the store and replaces the schema style.
    pub fn reset(&self) -> ConfigResult<()> {
        self.store.invalidate();
        let schema_id = self.store.active_schema_id()?.unwrap_or_default();
        self.switch_schema(&schema_id)
    }

    /// Replaces the schema-derived state with `schema_id`'s.
    pub fn switch_schema(&self, schema_id: &str) -> ConfigResult<()> {
        let schema = SchemaState::load(self.store.as_ref(), schema_id.to_string())?;
        let mut guard = self.state.write();
        let state = guard.as_mut().ok_or(ConfigError::NotInitialized("theme"))?;
        state.apply_schema(schema);
        Ok(())
    }

    /// Drops all loaded state. Later lookups report [`ConfigError::NotInitialized`].
    pub fn close(&self) {
        *self.state.write() = None;
    }

    /// Returns whether a theme is loaded.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.read().is_some()
    }

    /// Id of the loaded theme.
    #[must_use]
    pub fn theme(&self) -> Option<String> {
        self.state.read().as_ref().map(|s| s.theme.clone())
    }

    /// Id of the active schema.
    #[must_use]
    pub fn schema_id(&self) -> Option<String> {
        self.state.read().as_ref().map(|s| s.schema_id.clone())
    }

    /// The theme's Android key table.
    pub fn android_keys(&self) -> ConfigResult<AndroidKeys> {
        Ok(self.state()?.android_keys.clone())
    }

    /// The theme's `preset_keys` map.
    pub fn preset_keys(&self) -> ConfigResult<ConfigScope> {
        Ok(self.state()?.preset_keys.clone())
    }

    /// Data directories resources are read from.
    #[must_use]
    pub const fn resources(&self) -> &ResourceDirs {
        &self.resources
    }

    /// Density used by the pixel accessors.
    #[must_use]
    pub const fn display_metrics(&self) -> DisplayMetrics {
        self.metrics
    }

    pub(crate) fn state(&self) -> ConfigResult<MappedRwLockReadGuard<'_, ThemeState>> {
        RwLockReadGuard::try_map(self.state.read(), Option::as_ref)
            .map_err(|_| ConfigError::NotInitialized("theme"))
    }

    pub(crate) fn with_prefs<T>(&self, f: impl FnOnce(&dyn PreferenceStore) -> T) -> T {
        let prefs = self.prefs.lock();
        f(prefs.as_ref())
    }

    pub(crate) fn persist(&self, key: &str, value: &str) -> ConfigResult<()> {
        self.prefs
            .lock()
            .set_string(key, value)
            .map_err(|source| ConfigError::Preference {
                key: key.to_string(),
                source,
            })
    }
}
