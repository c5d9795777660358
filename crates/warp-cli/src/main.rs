//! warp-plus CLI
//!
//! Terminal host for command-string sessions.

mod args;
mod commands;
mod engine;
mod logging;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::error;

use args::Args;
use commands::Command;

/// Exit status for a rejected command string, as clap uses for bad flags
const USAGE_EXIT_CODE: u8 = 2;

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging; the guard flushes the log file when main returns
    let _guard = match logging::init(&args) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    if matches!(args.command, Command::Run(_)) && atty::is(atty::Stream::Stderr) {
        print_banner();
    }

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            eprintln!("Error: {e:?}");
            if is_usage_error(&e) {
                eprintln!("Run `warp-plus flags` to list the session command flags");
                ExitCode::from(USAGE_EXIT_CODE)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

/// Whether the failure came from tokenizing, parsing or validating a
/// command string
fn is_usage_error(err: &anyhow::Error) -> bool {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<warp_core::Error>())
        .is_some_and(warp_core::Error::is_usage)
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Run(run_args) => commands::run::execute(run_args),
        Command::Check(check_args) => commands::check::execute(check_args),
        Command::Tokens(tokens_args) => commands::tokens::execute(tokens_args),
        Command::Config(config_args) => commands::config::execute(config_args),
        Command::Flags => commands::flags::execute(),
        Command::Completions(comp_args) => commands::completions::execute(comp_args),
    }
}

fn print_banner() {
    use colored::Colorize;

    eprintln!();
    eprintln!(
        "{} {}",
        "warp-plus".green().bold(),
        env!("CARGO_PKG_VERSION").cyan()
    );
    eprintln!("{}", "Press Ctrl-C to stop the session".white());
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_usage_error_detected() {
        let err = anyhow::Error::from(warp_core::Error::MissingCountry);
        assert!(is_usage_error(&err));
    }

    #[test]
    fn test_usage_error_through_context() {
        let err = Err::<(), _>(warp_core::Error::UnknownFlag {
            flag: "-socks".to_string(),
        })
        .context("Invalid options file")
        .unwrap_err();
        assert!(is_usage_error(&err));
    }

    #[test]
    fn test_other_errors_are_not_usage() {
        assert!(!is_usage_error(&anyhow::Error::from(
            warp_core::Error::SessionTerminated
        )));
        assert!(!is_usage_error(&anyhow::anyhow!("Failed to set signal handler")));
    }
}
