//! Shared CLI plumbing: error type, exit codes, global options.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use serde::Serialize;

use crate::config::{Config, DisplayMetrics};
use crate::error::ConfigError;
use crate::prefs::{PreferenceFile, PreferenceStore};
use crate::store::{ResourceDirs, YamlThemeStore};

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Invalid input or unresolvable configuration
    ValidationError = 1,
    /// Filesystem or serialization failure
    IoError = 2,
    /// The requested key, theme or scheme does not exist
    NotFound = 3,
}

/// Error reported by a CLI command.
#[derive(Debug)]
pub struct CliError {
    code: ExitCode,
    message: String,
}

impl CliError {
    /// Invalid input or configuration.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// Filesystem or serialization failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// Missing key, theme or scheme.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::NotFound,
            message: message.into(),
        }
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        let message = err.to_string();
        match err {
            ConfigError::NotInitialized(_) | ConfigError::MissingDefault(_) => {
                Self::not_found(message)
            }
            ConfigError::Io(_) | ConfigError::Yaml(_) | ConfigError::Preference { .. } => {
                Self::io(message)
            }
            ConfigError::TypeMismatch { .. }
            | ConfigError::Parse { .. }
            | ConfigError::FallbackCycle { .. }
            | ConfigError::ChainTooLong { .. } => Self::validation(message),
        }
    }
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Options shared by every command.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Shared Rime data directory (default: preference, then <data dir>/rime)
    #[arg(long, value_name = "DIR", global = true)]
    pub shared_dir: Option<PathBuf>,

    /// User Rime data directory (default: preference, then <data dir>/rime)
    #[arg(long, value_name = "DIR", global = true)]
    pub user_dir: Option<PathBuf>,

    /// Schema to resolve against instead of the engine's selection
    #[arg(long, value_name = "ID", global = true)]
    pub schema: Option<String>,

    /// Scaled display density used for pixel values
    #[arg(long, value_name = "FACTOR", default_value_t = 1.0, global = true)]
    pub density: f32,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Data directories: flags first, then preferences, then the platform default.
    pub fn resources(&self, prefs: &dyn PreferenceStore) -> CliResult<ResourceDirs> {
        let stored = ResourceDirs::from_preferences(prefs)
            .map_err(|e| CliError::io(format!("Failed to resolve data directories: {e}")))?;
        Ok(ResourceDirs::new(
            self.shared_dir
                .clone()
                .unwrap_or_else(|| stored.shared().to_path_buf()),
            self.user_dir
                .clone()
                .unwrap_or_else(|| stored.user().to_path_buf()),
        ))
    }

    /// Loads preferences and opens the configuration engine.
    pub fn open_config(&self) -> CliResult<Config> {
        let prefs = PreferenceFile::load()
            .map_err(|e| CliError::io(format!("Failed to load preferences: {e}")))?;
        let resources = self.resources(&prefs)?;
        let store = YamlThemeStore::new(resources.shared(), resources.user());

        let config = Config::create(Arc::new(store), Box::new(prefs), resources)?
            .with_display_metrics(DisplayMetrics::new(self.density));

        if let Some(schema) = &self.schema {
            config.switch_schema(schema)?;
        }
        Ok(config)
    }
}

/// Prints `value` as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{}", json);
    Ok(())
}
