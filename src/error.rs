//! Error types for configuration resolution.
//!
//! A missing key is never an error: lookups return `None` and the accessors
//! fall back to their documented defaults. The variants below cover the cases
//! a caller may want to tell apart.

use thiserror::Error;

/// Errors raised while loading or resolving theme configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A scope the operation relies on was never loaded, or the config was closed.
    #[error("{0} is not loaded; initialize a theme first")]
    NotInitialized(&'static str),

    /// A value exists but has the wrong shape for the requested conversion.
    #[error("`{path}` holds {found}, expected {expected}")]
    TypeMismatch {
        /// Key or path that was looked up
        path: String,
        /// Kind of value the caller asked for
        expected: &'static str,
        /// Kind of value actually stored
        found: &'static str,
    },

    /// A numeral or color string could not be parsed by any strategy.
    #[error("cannot parse `{value}` as {target}")]
    Parse {
        /// Offending text
        value: String,
        /// What the text was being parsed into
        target: &'static str,
    },

    /// A `fallback_colors` chain revisits a key.
    #[error("fallback chain for `{key}` loops back on `{repeated}`")]
    FallbackCycle {
        /// Key the walk started from
        key: String,
        /// First alias seen twice
        repeated: String,
    },

    /// A `fallback_colors` chain is longer than the hop limit.
    #[error("fallback chain for `{key}` exceeds {limit} hops")]
    ChainTooLong {
        /// Key the walk started from
        key: String,
        /// Hop limit that was hit
        limit: usize,
    },

    /// A `"default"` entry the resolution depends on is absent.
    #[error("{0} has no `default` entry")]
    MissingDefault(&'static str),

    /// Writing a preference failed.
    #[error("failed to persist preference `{key}`")]
    Preference {
        /// Preference key being written
        key: String,
        /// Underlying persistence error
        #[source]
        source: anyhow::Error,
    },

    /// YAML text could not be parsed.
    #[error(transparent)]
    Yaml(#[from] serde_yml::Error),

    /// Filesystem error while reading configuration files.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Builds a parse error for `value`.
    pub fn parse(value: impl Into<String>, target: &'static str) -> Self {
        Self::Parse {
            value: value.into(),
            target,
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
