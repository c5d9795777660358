//! Check command - validate a command string without running it

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use tracing::info;
use warp_core::{command, Options};

/// Check command arguments
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Command string as a host would pass it.
    ///
    /// Put it after `--` when it is a single `-v` or `-q`.
    #[arg(allow_hyphen_values = true)]
    pub command: String,

    /// Output format for the effective options
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: OutputFormat,
}

/// How to print the effective options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// TOML, loadable with `run --config`
    Toml,
    /// JSON object
    Json,
    /// Canonical command string
    Args,
}

/// Execute the check command
pub fn execute(args: CheckArgs) -> Result<()> {
    let options = command::parse(&args.command)?;
    info!(bind = %options.bind_address, endpoint = %options.endpoint, "Command string is valid");

    eprintln!("{}", "Command string is valid".green().bold());
    println!("{}", render(&options, args.format)?);
    Ok(())
}

fn render(options: &Options, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Toml => options.to_toml()?,
        OutputFormat::Json => {
            serde_json::to_string_pretty(options).context("Failed to serialize options")?
        }
        OutputFormat::Args => options.to_command_line(),
    })
}
