//! Trime Config Library
//!
//! This library provides the configuration layer of the Trime input method
//! front-end: loading Rime theme and schema documents and resolving the
//! styles, colors, drawables and keyboard layouts UI components ask for.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod models;
pub mod prefs;
pub mod store;

pub use config::{Config, DisplayMetrics};
pub use error::{ConfigError, ConfigResult};
