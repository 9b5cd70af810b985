//! Keyboard layout name resolution.
//!
//! Themes list keyboards by logical name. `.default` stands for "whatever
//! suits the active schema" and is matched against `preset_keyboards` by
//! schema id, by the schema id's prefix, and finally by the schema's speller
//! alphabet.

use super::Config;
use crate::constants::{ALPHABET_KEYBOARD, DEFAULT_KEYBOARD, SCHEMA_KEYBOARD};
use crate::error::{ConfigError, ConfigResult};
use crate::models::{ConfigScope, Value};

/// Resolves logical keyboard names against `preset_keyboards`.
#[derive(Debug, Clone, Copy)]
pub struct KeyboardResolver<'a> {
    presets: &'a ConfigScope,
    schema_id: &'a str,
    alphabet: Option<&'a str>,
}

impl<'a> KeyboardResolver<'a> {
    /// Creates a resolver for the given schema.
    #[must_use]
    pub const fn new(
        presets: &'a ConfigScope,
        schema_id: &'a str,
        alphabet: Option<&'a str>,
    ) -> Self {
        Self {
            presets,
            schema_id,
            alphabet,
        }
    }

    /// Resolves `name` to a preset keyboard key.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingDefault`] when `name` matches nothing and there
    /// is no `default` preset to fall back to.
    pub fn resolve(&self, name: &str) -> ConfigResult<String> {
        let mut name = if name == SCHEMA_KEYBOARD {
            self.schema_keyboard()
        } else {
            name.to_string()
        };

        if !self.presets.contains_key(&name) {
            if !self.presets.contains_key(DEFAULT_KEYBOARD) {
                return Err(ConfigError::MissingDefault("preset_keyboards"));
            }
            name = DEFAULT_KEYBOARD.to_string();
        }

        let import = self
            .presets
            .get(&name)
            .and_then(Value::as_scope)
            .and_then(|spec| spec.get("import_preset"))
            .and_then(Value::to_text);
        match import {
            Some(target) if self.presets.contains_key(&target) => Ok(target),
            Some(target) => {
                tracing::warn!("keyboard {} imports unknown preset {}", name, target);
                Ok(name)
            }
            None => Ok(name),
        }
    }

    /// Picks the keyboard for the active schema.
    fn schema_keyboard(&self) -> String {
        if self.presets.contains_key(self.schema_id) {
            return self.schema_id.to_string();
        }
        if let Some((prefix, _)) = self.schema_id.split_once('_') {
            if self.presets.contains_key(prefix) {
                return prefix.to_string();
            }
        }
        let Some(alphabet) = self.alphabet else {
            return ALPHABET_KEYBOARD.to_string();
        };
        if self.presets.contains_key(alphabet) {
            return alphabet.to_string();
        }
        let mut name = ALPHABET_KEYBOARD.to_string();
        if alphabet.contains([',', ';']) {
            name.push('_');
        }
        if alphabet.contains(['0', '1']) {
            name.push('0');
        }
        name
    }

    /// Resolves each name, keeping the first occurrence of each result.
    pub fn resolve_all<'n>(
        &self,
        names: impl IntoIterator<Item = &'n str>,
    ) -> ConfigResult<Vec<String>> {
        let mut keyboards: Vec<String> = Vec::new();
        for name in names {
            let resolved = self.resolve(name)?;
            if !keyboards.contains(&resolved) {
                keyboards.push(resolved);
            }
        }
        Ok(keyboards)
    }
}

impl Config {
    /// Resolves a logical keyboard name to a preset keyboard key.
    pub fn keyboard_name(&self, name: &str) -> ConfigResult<String> {
        let state = self.state()?;
        let resolver = KeyboardResolver::new(
            state.keyboards()?,
            &state.schema_id,
            state.alphabet.as_deref(),
        );
        resolver.resolve(name)
    }

    /// Resolves the style's `keyboards` list; `[".default"]` when it has none.
    pub fn keyboard_names(&self) -> ConfigResult<Vec<String>> {
        let names = {
            let state = self.state()?;
            match state.layers.resolve("keyboards") {
                Some(value) => value
                    .try_sequence("keyboards")?
                    .iter()
                    .filter_map(Value::to_text)
                    .collect(),
                None => vec![SCHEMA_KEYBOARD.to_string()],
            }
        };
        self.keyboard_names_from(names.iter().map(String::as_str))
    }

    /// Resolves `names`, de-duplicated in first-seen order.
    pub fn keyboard_names_from<'n>(
        &self,
        names: impl IntoIterator<Item = &'n str>,
    ) -> ConfigResult<Vec<String>> {
        let state = self.state()?;
        let resolver = KeyboardResolver::new(
            state.keyboards()?,
            &state.schema_id,
            state.alphabet.as_deref(),
        );
        resolver.resolve_all(names)
    }

    /// The preset keyboard spec for `name`, or the `default` one.
    pub fn keyboard(&self, name: &str) -> ConfigResult<ConfigScope> {
        let state = self.state()?;
        let presets = state.keyboards()?;
        let key = if presets.contains_key(name) {
            name
        } else {
            DEFAULT_KEYBOARD
        };
        let spec = presets
            .get(key)
            .ok_or(ConfigError::MissingDefault("preset_keyboards"))?;
        let spec = spec.try_scope(&format!("preset_keyboards/{key}"))?;
        Ok(spec.clone())
    }
}
