//! CLI command handlers for trime-config.
//!
//! This module provides headless, scriptable access to theme resolution for
//! theme authors, automation and testing.

pub mod color;
pub mod common;
pub mod get;
pub mod keyboard;
pub mod show;
pub mod theme;

// Re-export types used by main.rs and tests
pub use color::{ColorArgs, DrawableArgs, SchemeArgs, SchemesArgs};
pub use common::{CliError, CliResult, ExitCode, GlobalArgs};
pub use get::GetArgs;
pub use keyboard::{KeyboardArgs, KeyboardsArgs};
pub use show::ShowArgs;
pub use theme::{ThemeArgs, ThemesArgs};
