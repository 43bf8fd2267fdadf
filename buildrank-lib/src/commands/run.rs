//! Command dispatch logic for buildrank

use super::{AnalyzeArgs, InitArgs, ValidateArgs, analyze_root, init_config, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "buildrank", version, author, long_about = None)]
#[command(about = "Inventory TeamCity build configurations and rank them by complexity")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: BuildrankSubcommand,
}

#[derive(Subcommand, Debug)]
enum BuildrankSubcommand {
    /// Walk a configuration tree and generate inventory, complexity, and coverage reports
    Analyze(Box<AnalyzeArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        BuildrankSubcommand::Analyze(analyze_args) => analyze_root(host, analyze_args),
        BuildrankSubcommand::Init(init_args) => init_config(host, init_args),
        BuildrankSubcommand::Validate(validate_args) => validate_config(host, validate_args),
    }
}
