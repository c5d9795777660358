//! Flag table and argument parser
//!
//! Follows the conventions of Go's `flag` package, which existing host
//! applications already build their command strings against: one or two
//! leading dashes, `-name=value` or `-name value`, and bare presence for
//! booleans.

use super::Options;
use crate::error::{Error, Result};
use std::fmt::Write as _;

/// Recognized flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// `-v`
    Verbose,
    /// `-b`
    BindAddress,
    /// `-e`
    Endpoint,
    /// `-k`
    LicenseKey,
    /// `-country`
    Country,
    /// `-cfon`
    Psiphon,
    /// `-gool`
    Gool,
    /// `-scan`
    Scan,
    /// `-rtt`
    Rtt,
}

impl Flag {
    /// Every flag, in usage order
    pub const ALL: [Flag; 9] = [
        Flag::Verbose,
        Flag::BindAddress,
        Flag::Endpoint,
        Flag::LicenseKey,
        Flag::Country,
        Flag::Psiphon,
        Flag::Gool,
        Flag::Scan,
        Flag::Rtt,
    ];

    /// Name without the leading dash
    pub fn name(self) -> &'static str {
        match self {
            Flag::Verbose => "v",
            Flag::BindAddress => "b",
            Flag::Endpoint => "e",
            Flag::LicenseKey => "k",
            Flag::Country => "country",
            Flag::Psiphon => "cfon",
            Flag::Gool => "gool",
            Flag::Scan => "scan",
            Flag::Rtt => "rtt",
        }
    }

    /// Look a flag up by name (without dashes)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.name() == name)
    }

    /// Boolean flags take no separate value token
    pub fn is_bool(self) -> bool {
        matches!(
            self,
            Flag::Verbose | Flag::Psiphon | Flag::Gool | Flag::Scan
        )
    }

    /// Placeholder shown in usage for value flags
    pub fn value_name(self) -> Option<&'static str> {
        match self {
            Flag::BindAddress => Some("addr:port"),
            Flag::Endpoint => Some("warp-ip"),
            Flag::LicenseKey => Some("license-key"),
            Flag::Country => Some("country-code"),
            Flag::Rtt => Some("ms"),
            Flag::Verbose | Flag::Psiphon | Flag::Gool | Flag::Scan => None,
        }
    }

    /// One-line description
    pub fn help(self) -> &'static str {
        match self {
            Flag::Verbose => "verbose",
            Flag::BindAddress => "socks bind address",
            Flag::Endpoint => "warp clean IP",
            Flag::LicenseKey => "license key",
            Flag::Country => "psiphon country code in ISO 3166-1 alpha-2 format",
            Flag::Psiphon => "enable Psiphon over warp",
            Flag::Gool => "enable warp gooling",
            Flag::Scan => "enable warp scanner(experimental)",
            Flag::Rtt => "scanner rtt threshold in milliseconds",
        }
    }

    fn dashed(self) -> String {
        format!("-{}", self.name())
    }
}

/// Parse `ParseBool`-style literals
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn apply(options: &mut Options, flag: Flag, value: &str) -> Result<()> {
    match flag {
        Flag::BindAddress => options.bind_address = value.to_string(),
        Flag::Endpoint => options.endpoint = value.to_string(),
        Flag::LicenseKey => options.license_key = value.to_string(),
        Flag::Country => options.country = value.to_string(),
        Flag::Rtt => {
            options.rtt_threshold_ms = value.parse().map_err(|_| {
                Error::invalid_value(flag.dashed(), value, "expected a non-negative integer")
            })?;
        }
        Flag::Verbose | Flag::Psiphon | Flag::Gool | Flag::Scan => {
            let enabled = parse_bool(value)
                .ok_or_else(|| Error::invalid_value(flag.dashed(), value, "expected a boolean"))?;
            match flag {
                Flag::Verbose => options.verbose = enabled,
                Flag::Psiphon => options.psiphon_enabled = enabled,
                Flag::Gool => options.gool_enabled = enabled,
                _ => options.scan_enabled = enabled,
            }
        }
    }
    Ok(())
}

/// Parse argument tokens into options. Does not validate.
///
/// The program name must already be stripped.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Options> {
    let mut options = Options::default();
    let mut iter = args.iter().map(AsRef::<str>::as_ref);

    while let Some(arg) = iter.next() {
        if arg == "--" {
            if let Some(extra) = iter.next() {
                return Err(Error::UnexpectedArgument {
                    argument: extra.to_string(),
                });
            }
            break;
        }

        let body = match arg.strip_prefix("--").or_else(|| arg.strip_prefix('-')) {
            Some(body) if !body.is_empty() => body,
            _ => {
                return Err(Error::UnexpectedArgument {
                    argument: arg.to_string(),
                })
            }
        };

        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        let flag = Flag::from_name(name).ok_or_else(|| Error::UnknownFlag {
            flag: arg.to_string(),
        })?;

        let value = match (inline, flag.is_bool()) {
            (Some(value), _) => value,
            (None, true) => "true",
            (None, false) => iter.next().ok_or_else(|| Error::MissingValue {
                flag: flag.dashed(),
            })?,
        };

        apply(&mut options, flag, value)?;
    }

    Ok(options)
}

/// Usage text listing every flag with its default
pub fn usage(program: &str) -> String {
    let defaults = Options::default();
    let mut out = format!("Usage: {program}");
    for flag in Flag::ALL {
        match flag.value_name() {
            Some(value_name) => {
                let _ = write!(out, " [-{} {}]", flag.name(), value_name);
            }
            None => {
                let _ = write!(out, " [-{}]", flag.name());
            }
        }
    }
    out.push('\n');

    let mut sorted = Flag::ALL;
    sorted.sort_by_key(|flag| flag.name());
    for flag in sorted {
        let _ = write!(out, "  -{}", flag.name());
        if let Some(value_name) = flag.value_name() {
            let _ = write!(out, " {value_name}");
        }
        let _ = write!(out, "\n    \t{}", flag.help());
        match flag {
            Flag::BindAddress => {
                let _ = write!(out, " (default \"{}\")", defaults.bind_address);
            }
            Flag::Endpoint => {
                let _ = write!(out, " (default \"{}\")", defaults.endpoint);
            }
            Flag::LicenseKey => {
                let _ = write!(out, " (default \"{}\")", defaults.license_key);
            }
            Flag::Rtt => {
                let _ = write!(out, " (default {})", defaults.rtt_threshold_ms);
            }
            _ => {}
        }
        out.push('\n');
    }
    out
}
