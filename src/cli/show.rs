//! Summary of the loaded configuration.

use crate::cli::common::{print_json, CliError, CliResult, GlobalArgs};
use crate::config::UiSettings;
use crate::constants::APP_NAME;
use crate::store::{opencc_dictionaries, OpenccDictionary, ResourceDirs};
use clap::Args;
use serde::Serialize;

/// Show the active theme, schema, color scheme, keyboards and settings
#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ShowOutput {
    theme: String,
    schema_id: String,
    color_scheme: String,
    keyboards: Vec<String>,
    symbol_start: usize,
    data_dirs: ResourceDirs,
    opencc: Vec<OpenccDictionary>,
    settings: UiSettings,
}

impl ShowArgs {
    /// Execute the show command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let config = global.open_config()?;

        let keyboards = config.keyboard_names().unwrap_or_else(|err| {
            tracing::warn!("cannot resolve keyboards: {}", err);
            Vec::new()
        });
        let opencc = opencc_dictionaries(config.resources())
            .map_err(|e| CliError::io(format!("Failed to list OpenCC dictionaries: {e}")))?;

        let output = ShowOutput {
            theme: config.theme().unwrap_or_default(),
            schema_id: config.schema_id().unwrap_or_default(),
            color_scheme: config.color_scheme(),
            keyboards,
            symbol_start: config.android_keys()?.symbol_start,
            data_dirs: config.resources().clone(),
            opencc,
            settings: config.ui_settings(),
        };

        if self.json {
            print_json(&output)?;
        } else {
            output_human_readable(&output);
        }
        Ok(())
    }
}

fn output_human_readable(output: &ShowOutput) {
    println!("{}", APP_NAME);
    println!();
    println!("Theme:          {}", output.theme);
    println!("Schema:         {}", output.schema_id);
    println!("Color scheme:   {}", output.color_scheme);
    println!("Keyboards:      {}", output.keyboards.join(", "));
    println!("Shared data:    {}", output.data_dirs.shared().display());
    println!("User data:      {}", output.data_dirs.user().display());
    println!();
    println!("Inline preedit: {:?}", output.settings.inline_preedit);
    println!("Window:         {:?}", output.settings.window_position);
    println!("Long press:     {} ms", output.settings.long_press_timeout);
    println!("Repeat:         {} ms", output.settings.repeat_interval);
    if !output.opencc.is_empty() {
        println!();
        println!("OpenCC dictionaries:");
        for dictionary in &output.opencc {
            println!("  {}", dictionary.source.display());
        }
    }
}
