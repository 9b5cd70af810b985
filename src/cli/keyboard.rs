//! Keyboard layout resolution commands.

use crate::cli::common::{print_json, CliResult, GlobalArgs};
use crate::models::ConfigScope;
use clap::Args;
use serde::Serialize;

/// Resolve a logical keyboard name to a preset keyboard
#[derive(Debug, Clone, Args)]
pub struct KeyboardArgs {
    /// Keyboard name; `.default` picks one for the active schema
    #[arg(value_name = "NAME", default_value = ".default")]
    pub name: String,

    /// Output as JSON (includes the preset spec)
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct KeyboardResult {
    name: String,
    schema_id: String,
    resolved: String,
    spec: ConfigScope,
}

impl KeyboardArgs {
    /// Execute the keyboard command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let config = global.open_config()?;
        let resolved = config.keyboard_name(&self.name)?;
        let spec = config.keyboard(&resolved)?;

        let result = KeyboardResult {
            name: self.name.clone(),
            schema_id: config.schema_id().unwrap_or_default(),
            resolved,
            spec,
        };

        if self.json {
            print_json(&result)?;
        } else {
            println!("{}", result.resolved);
        }
        Ok(())
    }
}

/// List the keyboards the theme offers for the active schema
#[derive(Debug, Clone, Args)]
pub struct KeyboardsArgs {
    /// Resolve these names instead of the style's `keyboards` list
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl KeyboardsArgs {
    /// Execute the keyboards command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let config = global.open_config()?;
        let keyboards = if self.names.is_empty() {
            config.keyboard_names()?
        } else {
            config.keyboard_names_from(self.names.iter().map(String::as_str))?
        };

        if self.json {
            print_json(&keyboards)?;
        } else {
            for keyboard in &keyboards {
                println!("{}", keyboard);
            }
        }
        Ok(())
    }
}
