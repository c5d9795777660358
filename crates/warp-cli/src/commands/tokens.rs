//! Tokens command - show tokenizer output

use anyhow::Result;
use clap::Args;
use warp_core::command;

/// Tokens command arguments
#[derive(Args, Debug)]
pub struct TokensArgs {
    /// Command string as a host would pass it.
    ///
    /// Put it after `--` when it is a single `-v` or `-q`.
    #[arg(allow_hyphen_values = true)]
    pub command: String,
}

/// Execute the tokens command
pub fn execute(args: TokensArgs) -> Result<()> {
    for token in command::split(&args.command)? {
        println!("{}", render(&token));
    }
    Ok(())
}

/// Make empty and whitespace-padded tokens visible
fn render(token: &str) -> String {
    if token.is_empty() || token.trim() != token {
        format!("{token:?}")
    } else {
        token.to_string()
    }
}
