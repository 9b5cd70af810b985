//! Layered style lookup.

use crate::models::{ConfigScope, Value};

/// The schema `style` layered over the theme `style`.
///
/// Paths are one key (`key_height`) or two keys joined by `/`
/// (`layout/position`). Anything deeper resolves to `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleLayers {
    /// Schema-specific style, checked first
    pub style: ConfigScope,
    /// Theme default style
    pub default_style: ConfigScope,
}

impl StyleLayers {
    /// Creates the layers from the schema style and the theme style.
    #[must_use]
    pub const fn new(style: ConfigScope, default_style: ConfigScope) -> Self {
        Self {
            style,
            default_style,
        }
    }

    /// Resolves `path`, schema style first.
    ///
    /// # Examples
    ///
    /// ```
    /// use trime_config::config::StyleLayers;
    /// use trime_config::models::{ConfigScope, Value};
    ///
    /// let layers = StyleLayers::new(
    ///     ConfigScope::new().with("key_height", 48_i64),
    ///     ConfigScope::new().with("key_height", 40_i64).with("key_width", 10_i64),
    /// );
    /// assert_eq!(layers.resolve("key_height"), Some(&Value::from(48_i64)));
    /// assert_eq!(layers.resolve("key_width"), Some(&Value::from(10_i64)));
    /// assert_eq!(layers.resolve("a/b/c"), None);
    /// ```
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        let segments: Vec<&str> = path.split('/').collect();
        match segments.as_slice() {
            [key] => self.style.get(key).or_else(|| self.default_style.get(key)),
            [ns, key] => nested(&self.style, ns, key).or_else(|| nested(&self.default_style, ns, key)),
            _ => None,
        }
    }

    /// Returns whether `path` resolves to anything.
    #[must_use]
    pub fn has_key(&self, path: &str) -> bool {
        self.resolve(path).is_some()
    }
}

fn nested<'a>(scope: &'a ConfigScope, ns: &str, key: &str) -> Option<&'a Value> {
    scope.get(ns)?.as_scope()?.get(key)
}
