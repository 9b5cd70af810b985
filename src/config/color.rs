//! Color and drawable resolution against the active color scheme.
//!
//! A scheme maps symbolic keys (`text_color`, `key_back_color`) to literal
//! colors, to other keys of the same scheme, or to image file names. Keys the
//! scheme lacks are retried through the theme's `fallback_colors` aliases.

use serde::Serialize;

use super::{Config, ThemeState};
use crate::constants::{pref_keys, DEFAULT_COLOR_SCHEME, MAX_FALLBACK_HOPS};
use crate::error::{ConfigError, ConfigResult};
use crate::models::{Color, ConfigScope, Drawable, Scalar, Value};

/// Whether a scheme or style value is written as a color rather than as a
/// key or file name.
fn is_literal(text: &str) -> bool {
    text.starts_with('0') || text.starts_with('#') || Color::parse_strict(text).is_some()
}

/// Lookups in one color scheme, with `fallback_colors` aliasing.
#[derive(Debug, Clone, Copy)]
pub struct ColorResolver<'a> {
    scheme: &'a ConfigScope,
    fallback: &'a ConfigScope,
    default_scheme: Option<&'a ConfigScope>,
}

impl<'a> ColorResolver<'a> {
    /// Creates a resolver over `scheme`.
    ///
    /// `default_scheme` is consulted by [`ColorResolver::color`] when the
    /// active scheme has nothing for a key.
    #[must_use]
    pub const fn new(
        scheme: &'a ConfigScope,
        fallback: &'a ConfigScope,
        default_scheme: Option<&'a ConfigScope>,
    ) -> Self {
        Self {
            scheme,
            fallback,
            default_scheme,
        }
    }

    /// Finds the raw value for `key` in the active scheme, following aliases.
    ///
    /// # Errors
    ///
    /// [`ConfigError::FallbackCycle`] if the alias chain revisits a key and
    /// [`ConfigError::ChainTooLong`] past [`MAX_FALLBACK_HOPS`] hops.
    pub fn lookup(&self, key: &str) -> ConfigResult<Option<&'a Value>> {
        let mut visited = vec![key];
        let mut current = key;
        loop {
            if let Some(value) = self.scheme.get(current) {
                return Ok(Some(value));
            }
            let Some(next) = self.fallback.get(current).and_then(Value::as_str) else {
                return Ok(None);
            };
            if visited.contains(&next) {
                return Err(ConfigError::FallbackCycle {
                    key: key.to_string(),
                    repeated: next.to_string(),
                });
            }
            if visited.len() > MAX_FALLBACK_HOPS {
                return Err(ConfigError::ChainTooLong {
                    key: key.to_string(),
                    limit: MAX_FALLBACK_HOPS,
                });
            }
            visited.push(next);
            current = next;
        }
    }

    /// Like [`ColorResolver::lookup`], then `default_scheme[key]`.
    pub fn lookup_or_default(&self, key: &str) -> ConfigResult<Option<&'a Value>> {
        match self.lookup(key)? {
            Some(value) => Ok(Some(value)),
            None => Ok(self.default_scheme.and_then(|scheme| scheme.get(key))),
        }
    }

    /// Interprets a scheme value as a color.
    ///
    /// Integers and literal strings are parsed; any other string names
    /// another key of the active scheme and is followed. A name that resolves
    /// nowhere gets one last try as a numeral before failing.
    pub fn color_value(&self, key: &str, value: &'a Value) -> ConfigResult<Color> {
        let mut visited = vec![key];
        let mut value = value;
        loop {
            let text = match value {
                Value::Scalar(Scalar::Int(n)) => return Color::parse(&n.to_string()),
                Value::Scalar(Scalar::String(s)) => s.as_str(),
                Value::Scalar(other) => return Err(ConfigError::parse(other.to_text(), "color")),
                other => return Err(other.mismatch(key, "color")),
            };
            if is_literal(text) {
                return Color::parse(text);
            }
            if visited.contains(&text) {
                return Err(ConfigError::FallbackCycle {
                    key: key.to_string(),
                    repeated: text.to_string(),
                });
            }
            if visited.len() > MAX_FALLBACK_HOPS {
                return Err(ConfigError::ChainTooLong {
                    key: key.to_string(),
                    limit: MAX_FALLBACK_HOPS,
                });
            }
            visited.push(text);
            match self.lookup(text)? {
                Some(next) => value = next,
                None => return Color::parse(text),
            }
        }
    }

    /// Color for `key` in the active scheme only.
    pub fn current_color(&self, key: &str) -> ConfigResult<Option<Color>> {
        self.lookup(key)?
            .map(|value| self.color_value(key, value))
            .transpose()
    }

    /// Color for `key`, falling back to the default scheme.
    pub fn color(&self, key: &str) -> ConfigResult<Option<Color>> {
        self.lookup_or_default(key)?
            .map(|value| self.color_value(key, value))
            .transpose()
    }
}

/// A color scheme as listed for selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorSchemeEntry {
    /// Key in `preset_color_schemes`
    pub key: String,
    /// The scheme's `name`, or its key when it has none
    pub name: String,
}

/// Logs a failed lookup and degrades it to `None`.
fn lenient<T>(key: &str, result: ConfigResult<Option<T>>) -> Option<T> {
    result.unwrap_or_else(|err| {
        tracing::warn!("cannot resolve {}: {}", key, err);
        None
    })
}

impl Config {
    /// Name of the active color scheme, repairing the selection if needed.
    ///
    /// A selection that names no scheme is replaced by the style's
    /// `color_scheme`, or by `default` when that is missing too, and the
    /// replacement is persisted.
    fn active_scheme_name(&self, state: &ThemeState) -> ConfigResult<String> {
        let schemes = state.color_schemes()?;
        let is_scheme = |name: &str| schemes.get(name).and_then(Value::as_scope).is_some();

        let selected = self.with_prefs(|prefs| {
            prefs.string(pref_keys::SELECTED_COLOR_SCHEME, DEFAULT_COLOR_SCHEME)
        });
        if is_scheme(&selected) {
            return Ok(selected);
        }

        let healed = match state.layers.resolve("color_scheme").and_then(Value::to_text) {
            Some(configured) if is_scheme(&configured) => configured,
            _ if is_scheme(DEFAULT_COLOR_SCHEME) => DEFAULT_COLOR_SCHEME.to_string(),
            _ => return Err(ConfigError::MissingDefault("preset_color_schemes")),
        };
        tracing::warn!(
            "color scheme {} does not exist, switching to {}",
            selected,
            healed
        );
        if let Err(err) = self.persist(pref_keys::SELECTED_COLOR_SCHEME, &healed) {
            tracing::warn!("{}", err);
        }
        Ok(healed)
    }

    fn color_resolver<'a>(&self, state: &'a ThemeState) -> ConfigResult<ColorResolver<'a>> {
        let name = self.active_scheme_name(state)?;
        let schemes = state.color_schemes()?;
        let scheme = schemes
            .get(&name)
            .and_then(Value::as_scope)
            .ok_or(ConfigError::MissingDefault("preset_color_schemes"))?;
        let default_scheme = schemes.get(DEFAULT_COLOR_SCHEME).and_then(Value::as_scope);
        Ok(ColorResolver::new(
            scheme,
            &state.fallback_colors,
            default_scheme,
        ))
    }

    /// Name of the active color scheme.
    ///
    /// Without a loaded theme this is the stored selection as is.
    #[must_use]
    pub fn color_scheme(&self) -> String {
        let healed = self
            .state()
            .and_then(|state| self.active_scheme_name(&state));
        healed.unwrap_or_else(|_| {
            self.with_prefs(|prefs| {
                prefs.string(pref_keys::SELECTED_COLOR_SCHEME, DEFAULT_COLOR_SCHEME)
            })
        })
    }

    /// Persists `name` as the selected color scheme.
    pub fn set_color_scheme(&self, name: &str) -> ConfigResult<()> {
        self.persist(pref_keys::SELECTED_COLOR_SCHEME, name)
    }

    /// The theme's color schemes in document order.
    pub fn color_schemes(&self) -> ConfigResult<Vec<ColorSchemeEntry>> {
        let state = self.state()?;
        let schemes = state.color_schemes()?;
        Ok(schemes
            .iter()
            .filter_map(|(key, value)| {
                let scheme = value.as_scope()?;
                Some(ColorSchemeEntry {
                    key: key.to_string(),
                    name: scheme
                        .get("name")
                        .and_then(Value::to_text)
                        .unwrap_or_else(|| key.to_string()),
                })
            })
            .collect())
    }

    /// Color for `key`, falling back to the default scheme.
    pub fn try_color(&self, key: &str) -> ConfigResult<Option<Color>> {
        let state = self.state()?;
        let colors = self.color_resolver(&state)?;
        colors.color(key)
    }

    /// Lenient [`Config::try_color`].
    #[must_use]
    pub fn color(&self, key: &str) -> Option<Color> {
        lenient(key, self.try_color(key))
    }

    /// Color for `key` in the active scheme only.
    pub fn try_current_color(&self, key: &str) -> ConfigResult<Option<Color>> {
        let state = self.state()?;
        let colors = self.color_resolver(&state)?;
        colors.current_color(key)
    }

    /// Lenient [`Config::try_current_color`].
    #[must_use]
    pub fn current_color(&self, key: &str) -> Option<Color> {
        lenient(key, self.try_current_color(key))
    }

    /// Drawable for `key`, falling back to the default scheme.
    pub fn try_color_drawable(&self, key: &str) -> ConfigResult<Option<Drawable>> {
        let state = self.state()?;
        let colors = self.color_resolver(&state)?;
        let value = colors.lookup_or_default(key)?;
        Ok(value.and_then(|value| self.drawable_object(value, Some(&colors))))
    }

    /// Lenient [`Config::try_color_drawable`].
    #[must_use]
    pub fn color_drawable(&self, key: &str) -> Option<Drawable> {
        lenient(key, self.try_color_drawable(key))
    }

    /// Drawable for `key` in the active scheme only.
    pub fn try_current_color_drawable(&self, key: &str) -> ConfigResult<Option<Drawable>> {
        let state = self.state()?;
        let colors = self.color_resolver(&state)?;
        let value = colors.lookup(key)?;
        Ok(value.and_then(|value| self.drawable_object(value, Some(&colors))))
    }

    /// Lenient [`Config::try_current_color_drawable`].
    #[must_use]
    pub fn current_color_drawable(&self, key: &str) -> Option<Drawable> {
        lenient(key, self.try_current_color_drawable(key))
    }

    /// Drawable for the style value at `path`: a literal color or a file under
    /// `backgrounds/`.
    #[must_use]
    pub fn drawable(&self, path: &str) -> Option<Drawable> {
        let state = self.state().ok()?;
        let value = state.layers.resolve(path)?;
        self.drawable_object(value, None)
    }

    /// Color for `key` in a key spec or other scope.
    ///
    /// Numbers and text starting with `0` are parsed as colors. Other text
    /// names a key of the active scheme; a name the scheme lacks is tried as
    /// a `#` literal or color name last.
    #[must_use]
    pub fn color_of(&self, scope: &ConfigScope, key: &str) -> Option<Color> {
        let value = scope.get(key)?;
        let result = match value {
            Value::Scalar(Scalar::Int(n)) => Color::parse(&n.to_string()).map(Some),
            Value::Scalar(Scalar::String(s)) if s.starts_with('0') => Color::parse(s).map(Some),
            Value::Scalar(Scalar::String(s)) => self.state().and_then(|state| {
                let colors = self.color_resolver(&state)?;
                Ok(colors.current_color(s)?.or_else(|| Color::parse_strict(s)))
            }),
            other => Err(other.mismatch(key, "color")),
        };
        lenient(key, result)
    }

    /// Drawable for `key` in a key spec or other scope.
    ///
    /// Text starting with `0` is a literal color. Other text is first looked
    /// up as a drawable of the active scheme, then taken as the raw value.
    #[must_use]
    pub fn color_drawable_of(&self, scope: &ConfigScope, key: &str) -> Option<Drawable> {
        let value = scope.get(key)?;
        if let Some(text) = value.as_str().filter(|s| !s.starts_with('0')) {
            if let Some(drawable) = self.current_color_drawable(text) {
                return Some(drawable);
            }
        }
        self.drawable_object(value, None)
    }

    /// Turns a raw value into a drawable.
    ///
    /// Literal colors become solid fills. Other text is a file name under the
    /// `backgrounds` resource directory, or, given a resolver, a reference to
    /// another scheme color.
    fn drawable_object(
        &self,
        value: &Value,
        colors: Option<&ColorResolver<'_>>,
    ) -> Option<Drawable> {
        let text = match value {
            Value::Scalar(Scalar::Int(n)) => {
                let numeral = n.to_string();
                return lenient(&numeral, Color::parse(&numeral).map(Some)).map(Drawable::Solid);
            }
            Value::Scalar(Scalar::String(s)) => s.as_str(),
            _ => return None,
        };
        if is_literal(text) {
            return lenient(text, Color::parse(text).map(Some)).map(Drawable::Solid);
        }
        let file = self.resources.resolve("backgrounds").join(text);
        if file.exists() {
            return Some(Drawable::Bitmap(file));
        }
        let colors = colors?;
        match colors.lookup(text) {
            Ok(Some(_)) => lenient(text, colors.current_color(text)).map(Drawable::Solid),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::{config, config_with, store};
    use crate::prefs::MemoryPreferences;
    use crate::store::{MemoryThemeStore, ResourceDirs};
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn classic() -> Config {
        config_with(MemoryPreferences::new().with(pref_keys::SELECTED_COLOR_SCHEME, "classic"))
    }

    fn config_for(theme: &str) -> Config {
        let store = MemoryThemeStore::new().with_config_yaml("trime", theme).unwrap();
        Config::create(
            Arc::new(store),
            Box::new(MemoryPreferences::new().with(pref_keys::SELECTED_COLOR_SCHEME, "nonexistent")),
            ResourceDirs::new("/nonexistent", "/nonexistent"),
        )
        .unwrap()
    }

    #[test]
    fn test_fallback_alias_chain() {
        let config = config();
        assert_eq!(
            config.current_color("back_color").map(Color::argb),
            Some(0xFF80_8080)
        );
        assert_eq!(
            config.current_color("candidate_text_color").map(Color::argb),
            Some(0xFF00_0000)
        );
    }

    #[test]
    fn test_direct_hit_beats_alias() {
        assert_eq!(
            classic().current_color("back_color").map(Color::argb),
            Some(0x8011_2233)
        );
    }

    #[test]
    fn test_default_scheme_fallback_only_for_color() {
        let config = classic();
        assert_eq!(config.current_color("border_color"), None);
        assert_eq!(
            config.color("border_color").map(Color::argb),
            Some(0xFF80_8080)
        );
        assert_eq!(config.color("no_such_key"), None);
    }

    #[test]
    fn test_symbolic_references_inside_scheme() {
        assert_eq!(
            config().current_color("key_text_color").map(Color::argb),
            Some(0xFF00_0000)
        );

        let config = classic();
        assert!(matches!(
            config.try_current_color("missing_ref"),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            config.try_current_color("self_ref"),
            Err(ConfigError::FallbackCycle { .. })
        ));
        assert_eq!(config.current_color("self_ref"), None);
    }

    #[test]
    fn test_alias_cycle_is_reported() {
        let err = config().try_current_color("loop_a").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::FallbackCycle { ref key, ref repeated } if key == "loop_a" && repeated == "loop_a"
        ));
        assert_eq!(config().current_color("loop_a"), None);
    }

    #[test]
    fn test_long_alias_chain_is_bounded() {
        let mut fallback = ConfigScope::new();
        for i in 0..40 {
            fallback.insert(format!("c{i}"), format!("c{}", i + 1));
        }
        let scheme = ConfigScope::new().with("c40", "#FFFFFF");
        let resolver = ColorResolver::new(&scheme, &fallback, None);
        assert!(matches!(
            resolver.lookup("c0"),
            Err(ConfigError::ChainTooLong { limit: MAX_FALLBACK_HOPS, .. })
        ));
        assert!(resolver.lookup("c20").unwrap().is_some());
    }

    #[test]
    fn test_self_heal_uses_configured_scheme() {
        let config = config_with(
            MemoryPreferences::new().with(pref_keys::SELECTED_COLOR_SCHEME, "nonexistent"),
        );
        assert_eq!(config.color_scheme(), "classic");
        assert_eq!(
            config.with_prefs(|p| p.string(pref_keys::SELECTED_COLOR_SCHEME, "")),
            "classic"
        );
        assert_eq!(
            config.current_color("text_color").map(Color::argb),
            Some(0xFFFF_0000)
        );
    }

    #[test]
    fn test_self_heal_falls_back_to_default() {
        let config = config_for(
            "config_version: '1'\nstyle:\n  color_scheme: gone\npreset_color_schemes:\n  default:\n    text_color: '#123456'\n",
        );
        assert_eq!(config.color_scheme(), "default");
        assert_eq!(
            config.color("text_color").map(Color::argb),
            Some(0xFF12_3456)
        );
    }

    #[test]
    fn test_missing_default_scheme() {
        let config = config_for(
            "config_version: '1'\npreset_color_schemes:\n  night:\n    text_color: '#123456'\n",
        );
        assert!(matches!(
            config.try_color("text_color"),
            Err(ConfigError::MissingDefault("preset_color_schemes"))
        ));
        assert_eq!(config.color("text_color"), None);
        assert_eq!(config.color_scheme(), "nonexistent");
    }

    #[test]
    fn test_theme_without_schemes() {
        let config = config_for("config_version: '1'\n");
        assert!(matches!(
            config.try_color("text_color"),
            Err(ConfigError::NotInitialized("preset_color_schemes"))
        ));
    }

    #[test]
    fn test_color_schemes_listing() {
        let schemes = config().color_schemes().unwrap();
        assert_eq!(
            schemes,
            vec![
                ColorSchemeEntry {
                    key: "default".to_string(),
                    name: "Default".to_string()
                },
                ColorSchemeEntry {
                    key: "classic".to_string(),
                    name: "Classic".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_set_color_scheme() {
        let config = config();
        config.set_color_scheme("classic").unwrap();
        assert_eq!(config.color_scheme(), "classic");
    }

    #[test]
    fn test_color_drawables() {
        let config = classic();
        assert_eq!(
            config.color_drawable("back_color"),
            Some(Drawable::Solid(Color::from_argb(0x8011_2233)))
        );
        assert_eq!(config.current_color_drawable("border_color"), None);
        assert_eq!(
            config.color_drawable("border_color"),
            Some(Drawable::Solid(Color::from_argb(0xFF80_8080)))
        );
        // no backgrounds directory, so the file name resolves to nothing
        assert_eq!(config.current_color_drawable("candidate_back_color"), None);
    }

    #[test]
    fn test_bitmap_drawables() {
        let temp_dir = TempDir::new().unwrap();
        let backgrounds = temp_dir.path().join("backgrounds");
        fs::create_dir(&backgrounds).unwrap();
        fs::write(backgrounds.join("bg.png"), b"png").unwrap();

        let config = Config::create(
            Arc::new(store()),
            Box::new(MemoryPreferences::new().with(pref_keys::SELECTED_COLOR_SCHEME, "classic")),
            ResourceDirs::new(temp_dir.path(), temp_dir.path()),
        )
        .unwrap();

        assert_eq!(
            config.current_color_drawable("candidate_back_color"),
            Some(Drawable::Bitmap(backgrounds.join("bg.png")))
        );

        let key = ConfigScope::new()
            .with("back", "bg.png")
            .with("fore", "text_color")
            .with("hilited", "0xFF00FF00");
        assert_eq!(
            config.color_drawable_of(&key, "back"),
            Some(Drawable::Bitmap(backgrounds.join("bg.png")))
        );
        assert_eq!(
            config.color_drawable_of(&key, "fore"),
            Some(Drawable::Solid(Color::from_argb(0xFFFF_0000)))
        );
        assert_eq!(
            config.color_drawable_of(&key, "hilited"),
            Some(Drawable::Solid(Color::from_argb(0xFF00_FF00)))
        );
        assert_eq!(config.color_drawable_of(&key, "missing"), None);
    }

    #[test]
    fn test_color_of_scope_values() {
        let config = config();
        let key = ConfigScope::new()
            .with("text", "key_text_color")
            .with("literal", "0xFF00FF00")
            .with("number", 255_i64)
            .with("unknown", "no_such_color");
        assert_eq!(
            config.color_of(&key, "text").map(Color::argb),
            Some(0xFF00_0000)
        );
        assert_eq!(
            config.color_of(&key, "literal").map(Color::argb),
            Some(0xFF00_FF00)
        );
        assert_eq!(
            config.color_of(&key, "number").map(Color::argb),
            Some(0x0000_00FF),
            "decimal numbers are not made opaque"
        );
        assert_eq!(config.color_of(&key, "unknown"), None);
        assert_eq!(config.color_of(&key, "absent"), None);
    }

    #[test]
    fn test_drawable_from_style() {
        let config = config_for(
            "config_version: '1'\nstyle:\n  background: '0xFF112233'\n  picture: nope.png\n",
        );
        assert_eq!(
            config.drawable("background"),
            Some(Drawable::Solid(Color::from_argb(0xFF11_2233)))
        );
        assert_eq!(config.drawable("picture"), None);
        assert_eq!(config.drawable("absent"), None);
    }

    #[test]
    fn test_bare_numerals_keep_their_digits() {
        let config = config_for(
            "config_version: '1'\npreset_color_schemes:\n  default:\n    back_color: 0x00000000\n    shadow_color: 0x00FF0000\n    text_color: 255\n    quoted: '0x00000000'\n    padded: 00000000\n",
        );
        assert_eq!(config.color("back_color"), config.color("quoted"));
        assert_eq!(config.color("back_color").map(Color::argb), Some(0));
        assert_eq!(
            config.color("shadow_color").map(Color::argb),
            Some(0x00FF_0000)
        );
        assert_eq!(
            config.color("text_color"),
            Color::parse("255").ok(),
            "decimal numerals decode like text"
        );
        assert_eq!(
            config.color("padded").map(Color::argb),
            Some(0xFF00_0000)
        );
        assert_eq!(
            config.current_color_drawable("shadow_color"),
            Some(Drawable::Solid(Color::from_argb(0x00FF_0000)))
        );
    }

    #[test]
    fn test_scope_names_resolve_before_color_names() {
        let config = config_for(
            "config_version: '1'\npreset_color_schemes:\n  default:\n    gray: '#FF123456'\n",
        );
        let key = ConfigScope::new()
            .with("shade", "gray")
            .with("accent", "red")
            .with("literal", "#80FFFFFF");
        assert_eq!(
            config.color_of(&key, "shade").map(Color::argb),
            Some(0xFF12_3456),
            "a scheme key shadows the color name"
        );
        assert_eq!(
            config.color_drawable_of(&key, "shade"),
            Some(Drawable::Solid(Color::from_argb(0xFF12_3456)))
        );
        assert_eq!(
            config.color_of(&key, "accent").map(Color::argb),
            Some(0xFFFF_0000)
        );
        assert_eq!(
            config.color_of(&key, "literal").map(Color::argb),
            Some(0x80FF_FFFF)
        );
    }
}
