//! Theme listing and selection commands.

use crate::cli::common::{print_json, CliError, CliResult, GlobalArgs};
use crate::prefs::PreferenceFile;
use crate::store::{theme_files, ThemeEntry};
use clap::{Args, Subcommand};
use serde::Serialize;

/// List the themes found in the data directories
#[derive(Debug, Clone, Args)]
pub struct ThemesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ThemeOutput {
    #[serde(flatten)]
    entry: ThemeEntry,
    source: &'static str,
}

impl ThemesArgs {
    /// Execute the themes command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let prefs = PreferenceFile::load()
            .map_err(|e| CliError::io(format!("Failed to load preferences: {e}")))?;
        let resources = global.resources(&prefs)?;

        let mut themes = Vec::new();
        for (source, dir) in [("user", resources.user()), ("shared", resources.shared())] {
            let entries = theme_files(dir)
                .map_err(|e| CliError::io(format!("Failed to list themes: {e}")))?;
            for entry in entries {
                if !themes.iter().any(|t: &ThemeOutput| t.entry.id == entry.id) {
                    themes.push(ThemeOutput { entry, source });
                }
            }
        }

        if self.json {
            print_json(&themes)?;
        } else if themes.is_empty() {
            println!("No themes found.");
        } else {
            for theme in &themes {
                println!("{:<24} {:<8} {}", theme.entry.id, theme.source, theme.entry.name);
            }
        }
        Ok(())
    }
}

/// Theme selection commands
#[derive(Debug, Args)]
pub struct ThemeArgs {
    #[command(subcommand)]
    command: ThemeCommand,
}

#[derive(Debug, Subcommand)]
enum ThemeCommand {
    /// Select the active theme
    Set(ThemeSetArgs),
}

/// Select the active theme
#[derive(Debug, Args)]
pub struct ThemeSetArgs {
    /// Theme id, e.g. `trime` or `tongwenfeng`
    #[arg(value_name = "NAME")]
    name: String,
}

impl ThemeArgs {
    /// Execute theme subcommand
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        match &self.command {
            ThemeCommand::Set(args) => args.execute(global),
        }
    }
}

impl ThemeSetArgs {
    /// Execute set command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let config = global.open_config()?;
        if !config.has_theme(&self.name)? {
            return Err(CliError::not_found(format!(
                "Theme not found: {}",
                self.name
            )));
        }

        config.switch_theme(&self.name)?;
        println!("Theme set to {}.", self.name);
        Ok(())
    }
}
