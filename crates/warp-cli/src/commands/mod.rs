//! CLI commands

pub mod check;
pub mod completions;
pub mod config;
pub mod flags;
pub mod run;
pub mod tokens;

use clap::Subcommand;

/// CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a session from a command string (main command)
    Run(run::RunArgs),

    /// Parse and validate a command string, then print the options
    Check(check::CheckArgs),

    /// Show how a command string is split into arguments
    Tokens(tokens::TokensArgs),

    /// Options file management
    Config(config::ConfigArgs),

    /// Print the flags understood inside command strings
    Flags,

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
