//! Error types for warp-core
//!
//! Everything that can go wrong between receiving a command string and the
//! engine returning is one variant of [`Error`].

use thiserror::Error;

/// Main error type for warp-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// A quoted segment was never closed
    #[error("unclosed quote in command line: {command}")]
    UnclosedQuote {
        /// The command string as given
        command: String,
    },

    /// Token looks like a flag but is not one we recognize
    #[error("flag provided but not defined: {flag}")]
    UnknownFlag {
        /// The offending token
        flag: String,
    },

    /// A value flag appeared as the last token
    #[error("flag needs an argument: {flag}")]
    MissingValue {
        /// Flag name including its leading dash
        flag: String,
    },

    /// Flag value could not be converted to the flag's type
    #[error("invalid value \"{value}\" for flag {flag}: {reason}")]
    InvalidValue {
        /// Flag name including its leading dash
        flag: String,
        /// The raw value
        value: String,
        /// Why the value was rejected
        reason: String,
    },

    /// A positional argument where only flags are accepted
    #[error("unexpected argument: {argument}")]
    UnexpectedArgument {
        /// The offending token
        argument: String,
    },

    /// Bind address is not `host:port`
    #[error("invalid bind address format: {address}")]
    InvalidBindAddress {
        /// The rejected address
        address: String,
    },

    /// Endpoint is not an IP literal
    #[error("invalid warp clean IP: {endpoint}")]
    InvalidEndpoint {
        /// The rejected endpoint
        endpoint: String,
    },

    /// Psiphon was enabled without a country
    #[error("if Psiphon is enabled, country code must be provided")]
    MissingCountry,

    /// Psiphon country is not in the allow-list
    #[error("invalid country code: {country}. valid country codes: {}", .allowed.join(", "))]
    InvalidCountry {
        /// The rejected country code
        country: String,
        /// Every accepted code
        allowed: Vec<&'static str>,
    },

    /// `start` called while a run is in progress
    #[error("session is already running")]
    AlreadyRunning,

    /// `start` called on a session that already finished
    #[error("session has terminated and cannot be restarted")]
    SessionTerminated,

    /// Whatever the engine reported, passed through unchanged
    #[error(transparent)]
    Engine(anyhow::Error),

    /// Options file could not be read
    #[error("failed to read options file {path}: {source}")]
    OptionsFile {
        /// Path to the file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid flag value error
    pub fn invalid_value(
        flag: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            flag: flag.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// True for errors raised while turning a command string into validated
    /// options. These never start a run, so the session stays restartable.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::UnclosedQuote { .. }
                | Self::UnknownFlag { .. }
                | Self::MissingValue { .. }
                | Self::InvalidValue { .. }
                | Self::UnexpectedArgument { .. }
                | Self::InvalidBindAddress { .. }
                | Self::InvalidEndpoint { .. }
                | Self::MissingCountry
                | Self::InvalidCountry { .. }
        )
    }
}
