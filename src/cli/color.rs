//! Color, drawable and color scheme commands.

use crate::cli::common::{print_json, CliError, CliResult, GlobalArgs};
use crate::models::{Color, Drawable};
use clap::{Args, Subcommand};
use serde::Serialize;

/// Resolve a color key against the active color scheme
#[derive(Debug, Clone, Args)]
pub struct ColorArgs {
    /// Color key, e.g. `text_color`
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Only look in the active scheme, without the `default` scheme fallback
    #[arg(long)]
    pub current: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ColorResult {
    key: String,
    scheme: String,
    color: Color,
    argb: u32,
}

impl ColorArgs {
    /// Execute the color command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let config = global.open_config()?;
        let color = if self.current {
            config.try_current_color(&self.key)?
        } else {
            config.try_color(&self.key)?
        };
        let color = color.ok_or_else(|| CliError::not_found(format!("Color not found: {}", self.key)))?;

        let result = ColorResult {
            key: self.key.clone(),
            scheme: config.color_scheme(),
            color,
            argb: color.argb(),
        };

        if self.json {
            print_json(&result)?;
        } else {
            println!("{}", result.color);
        }
        Ok(())
    }
}

/// Resolve a drawable (solid color or background image)
#[derive(Debug, Clone, Args)]
pub struct DrawableArgs {
    /// Color scheme key, or style path with `--style`
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Only look in the active scheme, without the `default` scheme fallback
    #[arg(long, conflicts_with = "style")]
    pub current: bool,

    /// Read the value from the style instead of the color scheme
    #[arg(long)]
    pub style: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct DrawableResult {
    key: String,
    drawable: Drawable,
}

impl DrawableArgs {
    /// Execute the drawable command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let config = global.open_config()?;
        let drawable = if self.style {
            config.drawable(&self.key)
        } else if self.current {
            config.try_current_color_drawable(&self.key)?
        } else {
            config.try_color_drawable(&self.key)?
        };
        let drawable = drawable
            .ok_or_else(|| CliError::not_found(format!("Drawable not found: {}", self.key)))?;

        let result = DrawableResult {
            key: self.key.clone(),
            drawable,
        };

        if self.json {
            print_json(&result)?;
        } else {
            match &result.drawable {
                Drawable::Solid(color) => println!("solid {}", color),
                Drawable::Bitmap(path) => println!("bitmap {}", path.display()),
            }
        }
        Ok(())
    }
}

/// List the theme's color schemes
#[derive(Debug, Clone, Args)]
pub struct SchemesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct SchemeOutput {
    key: String,
    name: String,
    active: bool,
}

impl SchemesArgs {
    /// Execute the schemes command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let config = global.open_config()?;
        let active = config.color_scheme();
        let schemes: Vec<SchemeOutput> = config
            .color_schemes()?
            .into_iter()
            .map(|entry| SchemeOutput {
                active: entry.key == active,
                key: entry.key,
                name: entry.name,
            })
            .collect();

        if self.json {
            print_json(&schemes)?;
        } else {
            for scheme in &schemes {
                let marker = if scheme.active { "*" } else { " " };
                println!("{} {:<20} {}", marker, scheme.key, scheme.name);
            }
        }
        Ok(())
    }
}

/// Color scheme selection commands
#[derive(Debug, Args)]
pub struct SchemeArgs {
    #[command(subcommand)]
    command: SchemeCommand,
}

#[derive(Debug, Subcommand)]
enum SchemeCommand {
    /// Select the active color scheme
    Set(SchemeSetArgs),
}

/// Select the active color scheme
#[derive(Debug, Args)]
pub struct SchemeSetArgs {
    /// Key in `preset_color_schemes`
    #[arg(value_name = "NAME")]
    name: String,
}

impl SchemeArgs {
    /// Execute scheme subcommand
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        match &self.command {
            SchemeCommand::Set(args) => args.execute(global),
        }
    }
}

impl SchemeSetArgs {
    /// Execute set command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let config = global.open_config()?;
        let exists = config
            .color_schemes()?
            .iter()
            .any(|entry| entry.key == self.name);
        if !exists {
            return Err(CliError::not_found(format!(
                "Color scheme not found: {}",
                self.name
            )));
        }

        config.set_color_scheme(&self.name)?;
        println!("Color scheme set to {}.", self.name);
        Ok(())
    }
}
