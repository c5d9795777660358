//! Command-line argument parsing

use crate::commands::Command;
use clap::{Parser, ValueEnum};

/// warp-plus - run a proxy session from a single command string
///
/// Hosts embed the session core and pass it one string such as
/// `-b 127.0.0.1:8086 -e 1.1.1.1`. This binary exposes the same entry point
/// on the terminal, plus tools to inspect how a string is understood.
#[derive(Parser, Debug)]
#[command(name = "warp-plus")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format for logs
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub log_format: LogFormat,

    /// Log file path
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<String>,

    /// Run in quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// Compact format
    Compact,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;

    #[test]
    fn test_verbose() {
        let args = Args::parse_from(["warp-plus", "-v", "flags"]);
        assert_eq!(args.verbose, 1);

        let args = Args::parse_from(["warp-plus", "flags", "-vvv"]);
        assert_eq!(args.verbose, 3);
    }

    #[test]
    fn test_log_format() {
        let args = Args::parse_from(["warp-plus", "--log-format", "json", "flags"]);
        assert_eq!(args.log_format, LogFormat::Json);
    }

    #[test]
    fn test_run_takes_command_string() {
        let args = Args::parse_from(["warp-plus", "run", "-b 127.0.0.1:8086 -e 1.1.1.1"]);
        match args.command {
            Command::Run(run) => {
                assert_eq!(run.command.as_deref(), Some("-b 127.0.0.1:8086 -e 1.1.1.1"));
            }
            other => panic!("Wrong command: {other:?}"),
        }
    }
}
