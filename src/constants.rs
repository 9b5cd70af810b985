//! Application-wide constants.
//!
//! Names of the built-in fallbacks the resolution rules rely on, and the
//! preference keys shared with the Android front-end.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Trime Config";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "trime-config";

/// Environment variable that overrides the preference directory.
pub const CONFIG_DIR_ENV: &str = "TRIME_CONFIG_DIR";

/// Theme used when no theme is selected or the selected one has no `config_version`.
pub const DEFAULT_THEME: &str = "trime";

/// Color scheme that must exist in every theme.
pub const DEFAULT_COLOR_SCHEME: &str = "default";

/// Preset keyboard used when a resolved name is not a preset.
pub const DEFAULT_KEYBOARD: &str = "default";

/// Logical keyboard name that asks for schema-based matching.
pub const SCHEMA_KEYBOARD: &str = ".default";

/// Base name for keyboards synthesized from the speller alphabet.
pub const ALPHABET_KEYBOARD: &str = "qwerty";

/// Symbols used when a theme does not define `android_keys/symbols`.
pub const DEFAULT_SYMBOLS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ!\"$%&:<>?^_{|}~";

/// Index of the first symbol key when `android_keys/name` has no `A` entry.
pub const DEFAULT_SYMBOL_START: usize = 284;

/// Upper bound on alias hops when following `fallback_colors` or nested color references.
pub const MAX_FALLBACK_HOPS: usize = 32;

/// Preference keys, named as the Android front-end stores them.
pub mod pref_keys {
    /// Selected theme id
    pub const SELECTED_THEME: &str = "pref_selected_theme";
    /// Selected color scheme name
    pub const SELECTED_COLOR_SCHEME: &str = "pref_selected_color_scheme";
    /// Shared (read-mostly) Rime data directory
    pub const SHARED_DATA_DIR: &str = "shared_data_dir";
    /// User Rime data directory
    pub const USER_DATA_DIR: &str = "user_data_dir";
    /// Inline preedit mode
    pub const INLINE_PREEDIT: &str = "inline_preedit";
    /// Long press timeout slider position
    pub const LONGPRESS_TIMEOUT: &str = "longpress_timeout";
    /// Key repeat interval slider position
    pub const REPEAT_INTERVAL: &str = "repeat_interval";
    /// Show schema switches in the candidate bar
    pub const SHOW_SWITCHES: &str = "show_switches";
    /// Show key press preview popups
    pub const SHOW_PREVIEW: &str = "show_preview";
    /// Show the floating composition window
    pub const SHOW_WINDOW: &str = "show_window";
    /// Use the soft cursor in the composition
    pub const SOFT_CURSOR: &str = "soft_cursor";
    /// Show the status bar notification icon
    pub const NOTIFICATION_ICON: &str = "pref_notification_icon";
    /// Tear down the engine when the keyboard closes
    pub const DESTROY_ON_QUIT: &str = "pref_destroy_on_quit";
}
