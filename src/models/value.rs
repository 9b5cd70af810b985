//! Nested configuration values as produced by the Rime engine.
//!
//! Themes and schemas are trees of mappings, sequences and scalars. A
//! [`ConfigScope`] is one mapping level of that tree; it keeps the key order
//! of the source document so listings (color schemes, keyboards) come out in
//! the order the theme author wrote them.
//!
//! Rime hands every scalar over as text. YAML numbers lose that text, so
//! hex and zero-padded numerals (`0x00FF0000`, `0777`) are kept as strings
//! and converted on access like any other text.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// A leaf value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    /// `true` / `false`
    Bool(bool),
    /// Plain decimal integer
    Int(i64),
    /// Floating point literal
    Float(f64),
    /// Any other text
    String(String),
}

impl Scalar {
    /// Name of the scalar kind, for error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
        }
    }

    /// Returns the text form of the scalar.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            // Debug keeps the trailing `.0` on whole numbers
            Self::Float(x) => write!(f, "{x:?}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

/// A node in the configuration tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Leaf value
    Scalar(Scalar),
    /// Nested mapping
    Mapping(ConfigScope),
    /// Ordered list
    Sequence(Vec<Value>),
}

impl Value {
    /// Name of the value kind, for error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(s) => s.kind(),
            Self::Mapping(_) => "mapping",
            Self::Sequence(_) => "sequence",
        }
    }

    /// Returns the scalar, if this is one.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the nested mapping, if this is one.
    #[must_use]
    pub const fn as_scope(&self) -> Option<&ConfigScope> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the list items, if this is a sequence.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the string payload of a string scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Text form of a scalar; `None` for mappings and sequences.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        self.as_scalar().map(Scalar::to_text)
    }

    /// Like [`Value::as_scope`], failing with a typed error on mismatch.
    pub fn try_scope(&self, path: &str) -> ConfigResult<&ConfigScope> {
        self.as_scope()
            .ok_or_else(|| self.mismatch(path, "mapping"))
    }

    /// Like [`Value::as_sequence`], failing with a typed error on mismatch.
    pub fn try_sequence(&self, path: &str) -> ConfigResult<&[Value]> {
        self.as_sequence()
            .ok_or_else(|| self.mismatch(path, "sequence"))
    }

    /// Like [`Value::to_text`], failing with a typed error on mismatch.
    pub fn try_text(&self, path: &str) -> ConfigResult<String> {
        self.to_text().ok_or_else(|| self.mismatch(path, "scalar"))
    }

    pub(crate) fn mismatch(&self, path: &str, expected: &'static str) -> ConfigError {
        ConfigError::TypeMismatch {
            path: path.to_string(),
            expected,
            found: self.kind(),
        }
    }

    /// Converts a parsed YAML node. Nulls have no counterpart and yield `None`.
    #[must_use]
    pub fn from_yaml(node: serde_yml::Value) -> Option<Self> {
        match node {
            serde_yml::Value::Null => None,
            serde_yml::Value::Bool(b) => Some(Self::Scalar(Scalar::Bool(b))),
            serde_yml::Value::Number(n) => {
                let scalar = if let Some(i) = n.as_i64() {
                    Scalar::Int(i)
                } else if let Some(u) = n.as_u64() {
                    i64::try_from(u).map_or(Scalar::Float(u as f64), Scalar::Int)
                } else {
                    Scalar::Float(n.as_f64().unwrap_or(f64::NAN))
                };
                Some(Self::Scalar(scalar))
            }
            serde_yml::Value::String(s) => Some(Self::Scalar(Scalar::String(s))),
            serde_yml::Value::Sequence(items) => Some(Self::Sequence(
                items.into_iter().filter_map(Self::from_yaml).collect(),
            )),
            serde_yml::Value::Mapping(mapping) => {
                let mut scope = ConfigScope::new();
                for (key, value) in mapping {
                    let Some(key) = yaml_key(key) else { continue };
                    if let Some(value) = Self::from_yaml(value) {
                        scope.insert(key, value);
                    }
                }
                Some(Self::Mapping(scope))
            }
            serde_yml::Value::Tagged(tagged) => Self::from_yaml(tagged.value),
        }
    }
}

/// Whether a YAML numeral must keep its source text: hex forms and
/// zero-padded digits, where the number alone loses leading digits.
fn keeps_source_text(numeral: &str) -> bool {
    let digits = numeral.trim_start_matches(['+', '-']);
    let bytes = digits.as_bytes();
    digits.starts_with("0x")
        || digits.starts_with("0X")
        || (bytes.first() == Some(&b'0') && bytes.get(1).is_some_and(u8::is_ascii_digit))
}

/// Second pass over a document, shaped by the tree from the first pass.
///
/// Numeric nodes are read again as strings to recover the numeral as
/// written; everything else is converted with [`Value::from_yaml`].
struct SourceText<'a>(&'a serde_yml::Value);

impl<'de> DeserializeSeed<'de> for SourceText<'_> {
    type Value = Option<Value>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        match self.0 {
            serde_yml::Value::Number(_) => {
                let numeral = String::deserialize(deserializer)?;
                if keeps_source_text(&numeral) {
                    Ok(Some(Value::from(numeral)))
                } else {
                    Ok(Value::from_yaml(self.0.clone()))
                }
            }
            serde_yml::Value::Sequence(items) => deserializer.deserialize_seq(SequenceText(items)),
            serde_yml::Value::Mapping(mapping) => deserializer.deserialize_map(MappingText(mapping)),
            other => {
                IgnoredAny::deserialize(deserializer)?;
                Ok(Value::from_yaml(other.clone()))
            }
        }
    }
}

struct SequenceText<'a>(&'a [serde_yml::Value]);

impl<'de> Visitor<'de> for SequenceText<'_> {
    type Value = Option<Value>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a sequence of {} items", self.0.len())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut values = Vec::with_capacity(self.0.len());
        for (index, item) in self.0.iter().enumerate() {
            let value = seq
                .next_element_seed(SourceText(item))?
                .ok_or_else(|| <A::Error as de::Error>::invalid_length(index, &self))?;
            values.extend(value);
        }
        Ok(Some(Value::Sequence(values)))
    }
}

struct MappingText<'a>(&'a serde_yml::Mapping);

impl<'de> Visitor<'de> for MappingText<'_> {
    type Value = Option<Value>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a mapping of {} entries", self.0.len())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut scope = ConfigScope::new();
        for (index, (key, node)) in self.0.iter().enumerate() {
            if map.next_key::<IgnoredAny>()?.is_none() {
                return Err(de::Error::invalid_length(index, &self));
            }
            let value = map.next_value_seed(SourceText(node))?;
            if let (Some(key), Some(value)) = (yaml_key(key.clone()), value) {
                scope.insert(key, value);
            }
        }
        Ok(Some(Value::Mapping(scope)))
    }
}

/// Mapping keys are strings in Rime; scalar keys are stringified, others dropped.
fn yaml_key(key: serde_yml::Value) -> Option<String> {
    match key {
        serde_yml::Value::String(s) => Some(s),
        serde_yml::Value::Number(n) => Some(n.to_string()),
        serde_yml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Scalar(Scalar::String(s))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Scalar(Scalar::Int(n))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Scalar(Scalar::Float(x))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Scalar(Scalar::Bool(b))
    }
}

impl From<ConfigScope> for Value {
    fn from(scope: ConfigScope) -> Self {
        Self::Mapping(scope)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Sequence(items)
    }
}

/// One mapping level of the configuration tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConfigScope(IndexMap<String, Value>);

impl ConfigScope {
    /// Creates an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Parses a YAML document whose root is a mapping.
    ///
    /// An empty document yields an empty scope.
    ///
    /// # Examples
    ///
    /// ```
    /// use trime_config::models::ConfigScope;
    ///
    /// let scope = ConfigScope::from_yaml_str("style:\n  key_height: 40\n").unwrap();
    /// assert!(scope.lookup("style/key_height").is_some());
    /// ```
    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        let node: serde_yml::Value = serde_yml::from_str(text)?;
        if !node.is_mapping() {
            return match Value::from_yaml(node) {
                None => Ok(Self::new()),
                Some(other) => Err(other.mismatch("<document>", "mapping")),
            };
        }
        match SourceText(&node).deserialize(serde_yml::Deserializer::from_str(text))? {
            None => Ok(Self::new()),
            Some(Value::Mapping(scope)) => Ok(scope),
            Some(other) => Err(other.mismatch("<document>", "mapping")),
        }
    }

    /// Returns the value stored directly under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns whether `key` is present at this level.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Walks a `/`-separated path through nested mappings.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let mut value = self.get(segments.next()?)?;
        for segment in segments {
            value = value.as_scope()?.get(segment)?;
        }
        Some(value)
    }

    /// Inserts or replaces `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder form of [`ConfigScope::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries at this level.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the scope has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for ConfigScope {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
