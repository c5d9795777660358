//! Command string handling
//!
//! Hosts hand us one string such as `-b 127.0.0.1:8086 -e 1.1.1.1`. It is
//! split by the [`tokenizer`] and turned into [`Options`] here.

pub mod tokenizer;

pub use tokenizer::tokenize;

use crate::error::Result;
use crate::options::{parse_args, Options};
use tracing::debug;

/// Program name used as `argv[0]` for host command strings
pub const PROGRAM_NAME: &str = "warp-plus";

/// Split a host command string into arguments.
///
/// The string is tokenized as `"<PROGRAM_NAME> <command>"` and the program
/// name is dropped again, so the tokenizer's literal first character never
/// lands in host text.
pub fn split(command: &str) -> Result<Vec<String>> {
    let mut tokenizer = tokenizer::Tokenizer::new();
    for c in PROGRAM_NAME.chars().chain(std::iter::once(' ')).chain(command.chars()) {
        tokenizer.feed(c);
    }

    let mut args = tokenizer.finish(command)?;
    args.remove(0);
    debug!(count = args.len(), "Tokenized command string");
    Ok(args)
}

/// Tokenize, parse and validate a host command string
pub fn parse(command: &str) -> Result<Options> {
    let args = split(command)?;
    let options = parse_args(&args)?;
    options.validate()?;
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_split_drops_program_name() {
        assert_eq!(split("-v -gool").unwrap(), vec!["-v", "-gool"]);
        assert!(split("").unwrap().is_empty());
        assert!(split("   ").unwrap().is_empty());
    }

    #[test]
    fn test_split_leading_quote_is_honoured() {
        assert_eq!(split("'-k' 'a b'").unwrap(), vec!["-k", "a b"]);
    }

    #[test]
    fn test_split_error_names_host_command() {
        match split("-k 'abc").unwrap_err() {
            Error::UnclosedQuote { command } => assert_eq!(command, "-k 'abc"),
            other => panic!("Wrong error type: {other:?}"),
        }
    }

    #[test]
    fn test_parse_full_command() {
        let options = parse("-b 127.0.0.1:8086 -e 1.1.1.1 -k KEY -cfon -country DE").unwrap();
        assert_eq!(options.endpoint, "1.1.1.1");
        assert_eq!(options.license_key, "KEY");
        assert!(options.psiphon_enabled);
        assert_eq!(options.country, "DE");
    }

    #[test]
    fn test_parse_validates() {
        let err = parse("-e 1.1.1.1 -cfon").unwrap_err();
        assert!(matches!(err, Error::MissingCountry));
    }

    #[test]
    fn test_command_line_roundtrip() {
        let options = parse("-e 1.1.1.1 -k \"it's a key\" -scan -rtt 250").unwrap();
        let rendered = options.to_command_line();
        assert_eq!(parse(&rendered).unwrap(), options);
    }
}
