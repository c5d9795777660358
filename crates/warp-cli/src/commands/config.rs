//! Config command - options file management

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use warp_core::Options;

/// Options file name looked up in the working and user config directories
pub const OPTIONS_FILE: &str = "warp-plus.toml";

/// Config command arguments
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the options in a file and the equivalent command string
    Show {
        /// Options file to show (default: detect)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Write an options file with every default spelled out
    Generate {
        /// Output file path
        #[arg(short, long, default_value = OPTIONS_FILE)]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate an options file
    Validate {
        /// Options file to validate
        file: PathBuf,
    },

    /// Show options file locations
    Paths,
}

/// Execute config command
pub fn execute(args: ConfigArgs) -> Result<()> {
    match args.action {
        ConfigAction::Show { file } => show_options(file),
        ConfigAction::Generate { output, force } => generate_options(&output, force),
        ConfigAction::Validate { file } => validate_options(&file),
        ConfigAction::Paths => show_paths(),
    }
}

fn show_options(file: Option<PathBuf>) -> Result<()> {
    let path = match file {
        Some(path) => path,
        None => find_options_file().context("No options file found, see `config paths`")?,
    };
    let options = load(&path)?;

    println!("# {}", path.display());
    println!("{}", options.to_toml()?);
    println!("# command string: {}", options.to_command_line());
    Ok(())
}

fn generate_options(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        anyhow::bail!(
            "{} already exists, pass --force to overwrite",
            output.display()
        );
    }

    let toml_str = Options::default().to_toml()?;
    let content = format!(
        "# warp-plus session options\n\
         # `endpoint` must be set to an IP address before this file validates.\n\n\
         {toml_str}"
    );

    std::fs::write(output, content)
        .with_context(|| format!("Failed to write options to {}", output.display()))?;

    info!(path = %output.display(), "Generated options file");
    println!("Options file generated: {}", output.display());
    Ok(())
}

fn validate_options(file: &Path) -> Result<()> {
    let options = load(file)?;
    options.validate().context("Options validation failed")?;

    println!("✓ Options are valid");
    println!("  Bind address: {}", options.bind_address);
    println!("  Endpoint: {}", options.endpoint);
    println!("  Psiphon: {}", options.psiphon_enabled);
    println!("  Gool: {}", options.gool_enabled);
    println!("  Scan: {}", options.scan_enabled);
    Ok(())
}

fn show_paths() -> Result<()> {
    println!("Options file search paths:");
    println!();
    println!("  1. ./{OPTIONS_FILE}");
    if let Some(path) = user_options_path() {
        println!("  2. {}", path.display());
    }
    Ok(())
}

/// Load an options file with path context
pub fn load(path: &Path) -> Result<Options> {
    Options::load(path).with_context(|| format!("Failed to load options from {}", path.display()))
}

fn user_options_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "bepass", "warp-plus")
        .map(|dirs| dirs.config_dir().join(OPTIONS_FILE))
}

/// First existing options file in the search path
pub fn find_options_file() -> Option<PathBuf> {
    std::iter::once(PathBuf::from(OPTIONS_FILE))
        .chain(user_options_path())
        .find(|path| path.exists())
}
