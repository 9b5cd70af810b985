//! Behaviour settings derived from user preferences and the style.

use serde::Serialize;

use super::Config;
use crate::constants::pref_keys;

/// Where preedit text is shown while composing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineMode {
    /// Only in the floating window
    None,
    /// Preview of the first candidate in the editor
    Preview,
    /// Raw composition in the editor
    Composition,
    /// Typed input in the editor
    Input,
}

impl InlineMode {
    /// Parses the `inline_preedit` preference value.
    #[must_use]
    pub fn from_preference(value: &str) -> Self {
        match value {
            "preview" | "preedit" | "true" => Self::Preview,
            "composition" => Self::Composition,
            "input" => Self::Input,
            _ => Self::None,
        }
    }
}

/// Placement of the floating composition window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPosition {
    /// Left of the cursor
    Left,
    /// Left of and above the cursor
    LeftUp,
    /// Right of the cursor
    Right,
    /// Right of and above the cursor
    RightUp,
    /// Draggable
    Drag,
    /// Fixed above the keyboard
    #[default]
    Fixed,
    /// Bottom left corner
    BottomLeft,
    /// Bottom right corner
    BottomRight,
    /// Top left corner
    TopLeft,
    /// Top right corner
    TopRight,
}

impl WindowPosition {
    /// Parses a `layout/position` value, case-insensitively. Unknown values
    /// are [`WindowPosition::Fixed`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "left" => Self::Left,
            "left_up" => Self::LeftUp,
            "right" => Self::Right,
            "right_up" => Self::RightUp,
            "drag" => Self::Drag,
            "bottom_left" => Self::BottomLeft,
            "bottom_right" => Self::BottomRight,
            "top_left" => Self::TopLeft,
            "top_right" => Self::TopRight,
            _ => Self::Fixed,
        }
    }
}

/// Snapshot of every derived setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UiSettings {
    /// See [`Config::inline_preedit`]
    pub inline_preedit: InlineMode,
    /// See [`Config::window_position`]
    pub window_position: WindowPosition,
    /// Long press delay in milliseconds
    pub long_press_timeout: i64,
    /// Key repeat interval in milliseconds
    pub repeat_interval: i64,
    /// Show schema switches in the candidate bar
    pub show_switches: bool,
    /// Show key press previews
    pub show_preview: bool,
    /// Show the floating window
    pub show_window: bool,
    /// Draw a soft cursor in the composition
    pub soft_cursor: bool,
    /// Show the status bar icon
    pub show_status_icon: bool,
    /// Tear the engine down when the keyboard closes
    pub destroy_on_quit: bool,
}

impl Config {
    fn pref_bool(&self, key: &str, default: bool) -> bool {
        self.with_prefs(|prefs| prefs.boolean(key, default))
    }

    fn pref_int(&self, key: &str, default: i64) -> i64 {
        self.with_prefs(|prefs| prefs.integer(key, default))
    }

    /// Inline preedit mode (`inline_preedit`, default `preview`).
    #[must_use]
    pub fn inline_preedit(&self) -> InlineMode {
        let value = self.with_prefs(|prefs| prefs.string(pref_keys::INLINE_PREEDIT, "preview"));
        InlineMode::from_preference(&value)
    }

    /// Window position from the style's `layout/position`.
    ///
    /// `right` turns into `left` while previews are shown inline.
    #[must_use]
    pub fn window_position(&self) -> WindowPosition {
        let position = WindowPosition::parse(&self.get_string("layout/position"));
        if position == WindowPosition::Right && self.inline_preedit() == InlineMode::Preview {
            WindowPosition::Left
        } else {
            position
        }
    }

    /// Long press delay in milliseconds.
    #[must_use]
    pub fn long_press_timeout(&self) -> i64 {
        self.pref_int(pref_keys::LONGPRESS_TIMEOUT, 20).min(60) * 10 + 100
    }

    /// Key repeat interval in milliseconds.
    #[must_use]
    pub fn repeat_interval(&self) -> i64 {
        self.pref_int(pref_keys::REPEAT_INTERVAL, 4).min(9) * 10 + 10
    }

    /// Show schema switches in the candidate bar.
    #[must_use]
    pub fn show_switches(&self) -> bool {
        self.pref_bool(pref_keys::SHOW_SWITCHES, true)
    }

    /// Show key press previews.
    #[must_use]
    pub fn show_preview(&self) -> bool {
        self.pref_bool(pref_keys::SHOW_PREVIEW, false)
    }

    /// Show the floating window.
    #[must_use]
    pub fn show_window(&self) -> bool {
        self.pref_bool(pref_keys::SHOW_WINDOW, true)
    }

    /// Draw a soft cursor in the composition.
    #[must_use]
    pub fn soft_cursor(&self) -> bool {
        self.pref_bool(pref_keys::SOFT_CURSOR, true)
    }

    /// Show the status bar icon.
    #[must_use]
    pub fn show_status_icon(&self) -> bool {
        self.pref_bool(pref_keys::NOTIFICATION_ICON, false)
    }

    /// Tear the engine down when the keyboard closes.
    #[must_use]
    pub fn destroy_on_quit(&self) -> bool {
        self.pref_bool(pref_keys::DESTROY_ON_QUIT, false)
    }

    /// All derived settings at once.
    #[must_use]
    pub fn ui_settings(&self) -> UiSettings {
        UiSettings {
            inline_preedit: self.inline_preedit(),
            window_position: self.window_position(),
            long_press_timeout: self.long_press_timeout(),
            repeat_interval: self.repeat_interval(),
            show_switches: self.show_switches(),
            show_preview: self.show_preview(),
            show_window: self.show_window(),
            soft_cursor: self.soft_cursor(),
            show_status_icon: self.show_status_icon(),
            destroy_on_quit: self.destroy_on_quit(),
        }
    }
}
