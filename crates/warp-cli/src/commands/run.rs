//! Run command - drive a session from the terminal

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use warp_core::Session;

use crate::commands::config;
use crate::engine::IdleEngine;

/// Run command arguments
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Command string, e.g. "-b 127.0.0.1:8086 -e 1.1.1.1 -k KEY".
    ///
    /// A command that is a single `-v` or `-q` must follow `--`, otherwise
    /// it is read as this program's own flag: `warp-plus run -- -v`.
    #[arg(allow_hyphen_values = true, conflicts_with = "config")]
    pub command: Option<String>,

    /// Options file to build the command string from
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Validate and exit without starting the session
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the run command
pub fn execute(args: RunArgs) -> Result<()> {
    let command = resolve_command(&args)?;

    if args.dry_run {
        warp_core::command::parse(&command)?;
        warn!("Dry run mode - session not started");
        info!("Command string validated successfully");
        return Ok(());
    }

    let session = Arc::new(Session::new(IdleEngine::default()));

    let stop = session.stop_handle();
    ctrlc::set_handler(move || {
        info!("Received interrupt signal, shutting down...");
        stop.stop();
    })
    .context("Failed to set signal handler")?;

    info!("Starting warp-plus session");
    session.start(&command)?;
    info!(state = session.state().as_str(), "warp-plus session stopped");

    Ok(())
}

/// Command string from the argument, an explicit options file, or the first
/// options file found in the search path.
fn resolve_command(args: &RunArgs) -> Result<String> {
    if let Some(ref command) = args.command {
        return Ok(command.clone());
    }

    let path = match args.config {
        Some(ref path) => path.clone(),
        None => config::find_options_file()
            .context("No command string given and no options file found")?,
    };

    let options = config::load(&path)?;
    info!(path = %path.display(), "Loaded options file");
    Ok(options.to_command_line())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_explicit_command() {
        let args = RunArgs {
            command: Some("-e 1.1.1.1".to_string()),
            config: None,
            dry_run: false,
        };
        assert_eq!(resolve_command(&args).unwrap(), "-e 1.1.1.1");
    }

    #[test]
    fn test_resolve_from_options_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("options.toml");
        std::fs::write(&path, "endpoint = \"1.1.1.1\"\nlicense_key = \"my key\"\n").unwrap();

        let args = RunArgs {
            command: None,
            config: Some(path),
            dry_run: true,
        };
        let command = resolve_command(&args).unwrap();
        assert_eq!(command, "-e 1.1.1.1 -k 'my key'");
        assert!(execute(args).is_ok());
    }

    #[test]
    fn test_dry_run_rejects_invalid_command() {
        let args = RunArgs {
            command: Some("-e nowhere".to_string()),
            config: None,
            dry_run: true,
        };
        assert!(execute(args).is_err());
    }
}
