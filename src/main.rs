//! Trime Config - inspect Rime themes from the command line
//!
//! Resolves style values, colors, drawables and keyboard layouts exactly the
//! way the input method front-end does, and manages the theme and color
//! scheme selection.

use clap::{Parser, Subcommand};
use trime_config::cli::{
    CliResult, ColorArgs, DrawableArgs, GetArgs, GlobalArgs, KeyboardArgs, KeyboardsArgs,
    SchemeArgs, SchemesArgs, ShowArgs, ThemeArgs, ThemesArgs,
};
use trime_config::constants::APP_BINARY_NAME;
use trime_config::logging;

/// Trime Config - inspect Rime themes from the command line
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a style value
    Get(GetArgs),
    /// Resolve a color
    Color(ColorArgs),
    /// Resolve a drawable
    Drawable(DrawableArgs),
    /// Resolve a keyboard name
    Keyboard(KeyboardArgs),
    /// List resolved keyboards
    Keyboards(KeyboardsArgs),
    /// List color schemes
    Schemes(SchemesArgs),
    /// Select a color scheme
    Scheme(SchemeArgs),
    /// List themes
    Themes(ThemesArgs),
    /// Select a theme
    Theme(ThemeArgs),
    /// Show the loaded configuration
    Show(ShowArgs),
}

impl Command {
    fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        match self {
            Self::Get(args) => args.execute(global),
            Self::Color(args) => args.execute(global),
            Self::Drawable(args) => args.execute(global),
            Self::Keyboard(args) => args.execute(global),
            Self::Keyboards(args) => args.execute(global),
            Self::Schemes(args) => args.execute(global),
            Self::Scheme(args) => args.execute(global),
            Self::Themes(args) => args.execute(global),
            Self::Theme(args) => args.execute(global),
            Self::Show(args) => args.execute(global),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);

    if let Err(err) = cli.command.execute(&cli.global) {
        eprintln!("Error: {}", err);
        std::process::exit(err.exit_code() as i32);
    }
}
