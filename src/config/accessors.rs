//! Typed access to style values.
//!
//! Every accessor comes in two flavours: `try_get_*` reports conversion
//! failures, `get_*` logs them and returns the type's default. A missing key
//! is never a failure and yields the default in both.

use std::path::PathBuf;

use super::{Config, DisplayMetrics};
use crate::error::{ConfigError, ConfigResult};
use crate::models::color::decode_long;
use crate::models::{ConfigScope, Scalar, Value};

/// Integer conversion: integers as is, text decoded as a (possibly hex or
/// octal) numeral; both truncated to 32 bits.
pub(crate) fn value_to_int(path: &str, value: &Value) -> ConfigResult<i32> {
    match value {
        Value::Scalar(Scalar::Int(n)) => Ok(*n as i32),
        Value::Scalar(Scalar::String(s)) => decode_long(s)
            .map(|n| n as i32)
            .ok_or_else(|| ConfigError::parse(s.as_str(), "int")),
        Value::Scalar(other) => Err(ConfigError::parse(other.to_text(), "int")),
        other => Err(other.mismatch(path, "int")),
    }
}

/// Floating point conversion. Text may carry a `f`/`d` type suffix.
pub(crate) fn value_to_double(path: &str, value: &Value) -> ConfigResult<f64> {
    match value {
        Value::Scalar(Scalar::Int(n)) => Ok(*n as f64),
        Value::Scalar(Scalar::Float(x)) => Ok(*x),
        Value::Scalar(Scalar::String(s)) => {
            let trimmed = s.trim();
            let digits = trimmed
                .strip_suffix(['f', 'F', 'd', 'D'])
                .unwrap_or(trimmed);
            digits
                .parse()
                .map_err(|_| ConfigError::parse(s.as_str(), "float"))
        }
        Value::Scalar(other) => Err(ConfigError::parse(other.to_text(), "float")),
        other => Err(other.mismatch(path, "float")),
    }
}

pub(crate) fn value_to_float(path: &str, value: &Value) -> ConfigResult<f32> {
    value_to_double(path, value).map(|x| x as f32)
}

/// `true` only for a case-insensitive `"true"`.
pub(crate) fn value_to_bool(path: &str, value: &Value) -> ConfigResult<bool> {
    match value {
        Value::Scalar(Scalar::Bool(b)) => Ok(*b),
        Value::Scalar(scalar) => Ok(scalar.to_text().eq_ignore_ascii_case("true")),
        other => Err(other.mismatch(path, "boolean")),
    }
}

pub(crate) fn value_to_string(path: &str, value: &Value) -> ConfigResult<String> {
    value.try_text(path)
}

fn or_default<T>(path: &str, result: ConfigResult<T>, default: T) -> T {
    result.unwrap_or_else(|err| {
        tracing::warn!("cannot read {}: {}", path, err);
        default
    })
}

impl Config {
    /// Resolves `path` against the schema style, then the theme style.
    ///
    /// `None` means "use the built-in default", including when no theme is
    /// loaded.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<Value> {
        self.state().ok()?.layers.resolve(path).cloned()
    }

    /// Returns whether `path` resolves to anything.
    #[must_use]
    pub fn has_key(&self, path: &str) -> bool {
        self.state()
            .map(|state| state.layers.has_key(path))
            .unwrap_or(false)
    }

    fn convert<T>(
        &self,
        path: &str,
        default: T,
        convert: impl FnOnce(&str, &Value) -> ConfigResult<T>,
    ) -> ConfigResult<T> {
        let state = self.state()?;
        match state.layers.resolve(path) {
            Some(value) => convert(path, value),
            None => Ok(default),
        }
    }

    /// Integer at `path`; `0` when absent.
    pub fn try_get_int(&self, path: &str) -> ConfigResult<i32> {
        self.convert(path, 0, value_to_int)
    }

    /// Float at `path`; `0.0` when absent.
    pub fn try_get_float(&self, path: &str) -> ConfigResult<f32> {
        self.convert(path, 0.0, value_to_float)
    }

    /// Double at `path`; `0.0` when absent.
    pub fn try_get_double(&self, path: &str) -> ConfigResult<f64> {
        self.convert(path, 0.0, value_to_double)
    }

    /// Boolean at `path`; `true` when absent.
    pub fn try_get_boolean(&self, path: &str) -> ConfigResult<bool> {
        self.convert(path, true, value_to_bool)
    }

    /// Text at `path`; empty when absent.
    pub fn try_get_string(&self, path: &str) -> ConfigResult<String> {
        self.convert(path, String::new(), value_to_string)
    }

    /// Dimension at `path` in `sp`, converted to pixels; `0` when absent.
    pub fn try_get_pixel(&self, path: &str) -> ConfigResult<i32> {
        let sp = self.try_get_float(path)?;
        Ok(self.metrics.sp_to_px(sp))
    }

    /// Lenient [`Config::try_get_int`].
    #[must_use]
    pub fn get_int(&self, path: &str) -> i32 {
        or_default(path, self.try_get_int(path), 0)
    }

    /// Lenient [`Config::try_get_float`].
    #[must_use]
    pub fn get_float(&self, path: &str) -> f32 {
        or_default(path, self.try_get_float(path), 0.0)
    }

    /// Lenient [`Config::try_get_double`].
    #[must_use]
    pub fn get_double(&self, path: &str) -> f64 {
        or_default(path, self.try_get_double(path), 0.0)
    }

    /// Lenient [`Config::try_get_boolean`].
    #[must_use]
    pub fn get_boolean(&self, path: &str) -> bool {
        or_default(path, self.try_get_boolean(path), true)
    }

    /// Lenient [`Config::try_get_string`].
    #[must_use]
    pub fn get_string(&self, path: &str) -> String {
        or_default(path, self.try_get_string(path), String::new())
    }

    /// Lenient [`Config::try_get_pixel`].
    #[must_use]
    pub fn get_pixel(&self, path: &str) -> i32 {
        or_default(path, self.try_get_pixel(path), 0)
    }

    /// Font file named by the style value at `key`, if it exists under the
    /// `fonts` resource directory. `None` means the platform default font.
    #[must_use]
    pub fn font(&self, key: &str) -> Option<PathBuf> {
        let name = self.get_string(key);
        if name.is_empty() {
            return None;
        }
        let file = self.resources.resolve("fonts").join(name);
        file.exists().then_some(file)
    }
}

/// Accessors for values inside a single scope, such as a key spec.
///
/// Absent keys yield `None` or the given default; unparsable values are
/// logged and treated the same way.
impl ConfigScope {
    fn convert<T>(
        &self,
        key: &str,
        convert: impl FnOnce(&str, &Value) -> ConfigResult<T>,
    ) -> Option<T> {
        let value = self.get(key)?;
        convert(key, value)
            .map_err(|err| tracing::warn!("cannot read {}: {}", key, err))
            .ok()
    }

    /// Integer under `key`.
    #[must_use]
    pub fn int(&self, key: &str) -> Option<i32> {
        self.convert(key, value_to_int)
    }

    /// Integer under `key`, or `default`.
    #[must_use]
    pub fn int_or(&self, key: &str, default: i32) -> i32 {
        self.int(key).unwrap_or(default)
    }

    /// Float under `key`.
    #[must_use]
    pub fn float(&self, key: &str) -> Option<f32> {
        self.convert(key, value_to_float)
    }

    /// Double under `key`, or `default`.
    #[must_use]
    pub fn double_or(&self, key: &str, default: f64) -> f64 {
        self.convert(key, value_to_double).unwrap_or(default)
    }

    /// Text under `key`, or `default`.
    #[must_use]
    pub fn string_or(&self, key: &str, default: &str) -> String {
        self.convert(key, value_to_string)
            .unwrap_or_else(|| default.to_string())
    }

    /// Boolean under `key`, or `default`.
    #[must_use]
    pub fn boolean_or(&self, key: &str, default: bool) -> bool {
        self.convert(key, value_to_bool).unwrap_or(default)
    }

    /// Boolean under `key`; `true` when absent.
    #[must_use]
    pub fn boolean(&self, key: &str) -> bool {
        self.boolean_or(key, true)
    }

    /// Dimension under `key` in `sp`, converted to pixels.
    #[must_use]
    pub fn pixel(&self, key: &str, metrics: DisplayMetrics) -> Option<i32> {
        self.float(key).map(|sp| metrics.sp_to_px(sp))
    }
}
