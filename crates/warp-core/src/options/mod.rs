//! Session options
//!
//! [`Options`] is the typed form of a command string. It can also be loaded
//! from TOML so hosts that prefer a config file get the same validation.

pub mod country;
mod flags;

pub use flags::{parse_args, usage, Flag};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::Path;

/// Options for a single session run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Verbose logging in the engine
    pub verbose: bool,
    /// Local SOCKS listen address, `host:port`
    pub bind_address: String,
    /// Remote tunnel IP
    pub endpoint: String,
    /// License credential
    pub license_key: String,
    /// Psiphon exit country (ISO 3166-1 alpha-2)
    pub country: String,
    /// Psiphon over the tunnel
    pub psiphon_enabled: bool,
    /// Chained tunnel mode
    pub gool_enabled: bool,
    /// Endpoint scanner
    pub scan_enabled: bool,
    /// Scanner latency cutoff in milliseconds
    pub rtt_threshold_ms: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            verbose: false,
            bind_address: "127.0.0.1:8086".to_string(),
            endpoint: "notset".to_string(),
            license_key: "notset".to_string(),
            country: String::new(),
            psiphon_enabled: false,
            gool_enabled: false,
            scan_enabled: false,
            rtt_threshold_ms: 1000,
        }
    }
}

impl Options {
    /// Load options from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::OptionsFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(Error::from)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(Error::from)
    }

    /// Check cross-field rules. First failure wins.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_bind_address(&self.bind_address) {
            return Err(Error::InvalidBindAddress {
                address: self.bind_address.clone(),
            });
        }

        if self.endpoint.parse::<IpAddr>().is_err() {
            return Err(Error::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
            });
        }

        if self.psiphon_enabled && self.country.is_empty() {
            return Err(Error::MissingCountry);
        }

        if self.psiphon_enabled && !country::is_supported(&self.country) {
            return Err(Error::InvalidCountry {
                country: self.country.clone(),
                allowed: country::COUNTRY_CODES.to_vec(),
            });
        }

        Ok(())
    }

    /// Bind address as a socket address, when the host part is an IP
    /// literal or empty (all interfaces).
    pub fn bind_socket_addr(&self) -> Option<SocketAddr> {
        if let Ok(addr) = self.bind_address.parse() {
            return Some(addr);
        }
        let port = self.bind_address.strip_prefix(':')?.parse::<u16>().ok()?;
        Some(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)))
    }

    /// Endpoint as an IP address
    pub fn endpoint_ip(&self) -> Option<IpAddr> {
        self.endpoint.parse().ok()
    }

    /// Arguments that reproduce these options. Defaults are omitted.
    pub fn to_args(&self) -> Vec<String> {
        let defaults = Self::default();
        let mut args = Vec::new();

        fn push_bool(flag: Flag, set: bool, args: &mut Vec<String>) {
            if set {
                args.push(format!("-{}", flag.name()));
            }
        }

        push_bool(Flag::Verbose, self.verbose, &mut args);

        let value_flags = [
            (Flag::BindAddress, &self.bind_address, &defaults.bind_address),
            (Flag::Endpoint, &self.endpoint, &defaults.endpoint),
            (Flag::LicenseKey, &self.license_key, &defaults.license_key),
            (Flag::Country, &self.country, &defaults.country),
        ];
        for (flag, value, default) in value_flags {
            if value != default {
                args.push(format!("-{}", flag.name()));
                args.push(value.clone());
            }
        }

        push_bool(Flag::Psiphon, self.psiphon_enabled, &mut args);
        push_bool(Flag::Gool, self.gool_enabled, &mut args);
        push_bool(Flag::Scan, self.scan_enabled, &mut args);

        if self.rtt_threshold_ms != defaults.rtt_threshold_ms {
            args.push(format!("-{}", Flag::Rtt.name()));
            args.push(self.rtt_threshold_ms.to_string());
        }

        args
    }

    /// Command string that parses back to these options
    pub fn to_command_line(&self) -> String {
        self.to_args()
            .iter()
            .map(|arg| quote(arg))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Quote a single argument for the command tokenizer
pub fn quote(arg: &str) -> String {
    let special = |c: char| c == ' ' || c == '\t' || c == '"' || c == '\'' || c == '\\';

    if arg.is_empty() {
        return "\"\"".to_string();
    }
    if !arg.contains(special) {
        return arg.to_string();
    }
    if !arg.contains('\'') {
        return format!("'{arg}'");
    }
    if !arg.contains('"') {
        return format!("\"{arg}\"");
    }

    let mut out = String::with_capacity(arg.len() * 2);
    for c in arg.chars() {
        if special(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn is_valid_bind_address(address: &str) -> bool {
    let Some((host, port)) = address.rsplit_once(':') else {
        return false;
    };

    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) || port.parse::<u16>().is_err()
    {
        return false;
    }

    if let Some(inner) = host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
        return inner.parse::<Ipv6Addr>().is_ok();
    }

    host.is_empty() || host.parse::<Ipv4Addr>().is_ok() || is_hostname(host)
}

fn is_hostname(host: &str) -> bool {
    let host = host.strip_suffix('.').unwrap_or(host);
    if host.is_empty() || host.len() > 253 {
        return false;
    }

    let labels: Vec<&str> = host.split('.').collect();
    let label_ok = |label: &&str| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    };

    // All-numeric labels are a malformed IPv4 address, not a name.
    labels.iter().all(label_ok) && !labels.iter().all(|l| l.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Options {
        Options {
            endpoint: "162.159.192.1".to_string(),
            ..Options::default()
        }
    }

    // =========== Default Tests ===========

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert!(!options.verbose);
        assert_eq!(options.bind_address, "127.0.0.1:8086");
        assert_eq!(options.endpoint, "notset");
        assert_eq!(options.license_key, "notset");
        assert!(options.country.is_empty());
        assert!(!options.psiphon_enabled);
        assert!(!options.gool_enabled);
        assert!(!options.scan_enabled);
        assert_eq!(options.rtt_threshold_ms, 1000);
    }

    #[test]
    fn test_default_endpoint_does_not_validate() {
        let err = Options::default().validate().unwrap_err();
        assert!(matches!(err, Error::InvalidEndpoint { .. }));
    }

    // =========== Validation Tests ===========

    #[test]
    fn test_valid_options() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_bind_address_forms() {
        for ok in [
            "127.0.0.1:8086",
            "0.0.0.0:0",
            ":1080",
            "[::1]:1080",
            "localhost:65535",
            "proxy.local.:80",
        ] {
            let options = Options {
                bind_address: ok.to_string(),
                ..valid()
            };
            assert!(options.validate().is_ok(), "{ok}");
        }

        for bad in [
            "not-an-address",
            "127.0.0.1",
            "127.0.0.1:",
            "127.0.0.1:70000",
            "127.0.0.1:+80",
            "::1:80",
            "[::1]",
            "1.2.3.999:80",
            "bad_host:80",
            "",
        ] {
            let options = Options {
                bind_address: bad.to_string(),
                ..valid()
            };
            let err = options.validate().unwrap_err();
            assert!(matches!(err, Error::InvalidBindAddress { .. }), "{bad}");
        }
    }

    #[test]
    fn test_endpoint_ipv6() {
        let options = Options {
            endpoint: "2606:4700:d0::a29f:c001".to_string(),
            ..valid()
        };
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_endpoint_with_port_rejected() {
        let options = Options {
            endpoint: "162.159.192.1:2408".to_string(),
            ..valid()
        };
        assert!(matches!(
            options.validate().unwrap_err(),
            Error::InvalidEndpoint { .. }
        ));
    }

    #[test]
    fn test_bind_checked_before_endpoint() {
        let options = Options {
            bind_address: "nope".to_string(),
            endpoint: "nope".to_string(),
            ..Options::default()
        };
        assert!(matches!(
            options.validate().unwrap_err(),
            Error::InvalidBindAddress { .. }
        ));
    }

    #[test]
    fn test_psiphon_requires_country() {
        let options = Options {
            psiphon_enabled: true,
            ..valid()
        };
        assert!(matches!(options.validate().unwrap_err(), Error::MissingCountry));
    }

    #[test]
    fn test_psiphon_unknown_country() {
        let options = Options {
            psiphon_enabled: true,
            country: "ZZ".to_string(),
            ..valid()
        };
        let err = options.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidCountry { .. }));
        assert!(err.to_string().contains("AT, BE, BG"));
    }

    #[test]
    fn test_country_ignored_without_psiphon() {
        let options = Options {
            country: "ZZ".to_string(),
            ..valid()
        };
        assert!(options.validate().is_ok());
    }

    // =========== Accessor Tests ===========

    #[test]
    fn test_bind_socket_addr() {
        assert_eq!(
            valid().bind_socket_addr(),
            Some("127.0.0.1:8086".parse().unwrap())
        );

        let any = Options {
            bind_address: ":1080".to_string(),
            ..valid()
        };
        assert_eq!(any.bind_socket_addr(), Some("0.0.0.0:1080".parse().unwrap()));

        let named = Options {
            bind_address: "localhost:1080".to_string(),
            ..valid()
        };
        assert_eq!(named.bind_socket_addr(), None);
    }

    #[test]
    fn test_endpoint_ip() {
        assert_eq!(valid().endpoint_ip(), Some("162.159.192.1".parse().unwrap()));
        assert_eq!(Options::default().endpoint_ip(), None);
    }

    // =========== Rendering Tests ===========

    #[test]
    fn test_to_args_omits_defaults() {
        assert!(Options::default().to_args().is_empty());

        let options = Options {
            verbose: true,
            scan_enabled: true,
            rtt_threshold_ms: 300,
            ..valid()
        };
        assert_eq!(
            options.to_args(),
            vec!["-v", "-e", "162.159.192.1", "-scan", "-rtt", "300"]
        );
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("plain"), "plain");
        assert_eq!(quote(""), "\"\"");
        assert_eq!(quote("my key"), "'my key'");
        assert_eq!(quote("it's"), "\"it's\"");
        assert_eq!(quote(r#"a'b"c"#), r#"a\'b\"c"#);
    }

    // =========== TOML Tests ===========

    #[test]
    fn test_toml_parse_partial() {
        let options = Options::from_toml(
            r#"
endpoint = "1.1.1.1"
psiphon_enabled = true
country = "NL"
"#,
        )
        .unwrap();
        assert_eq!(options.endpoint, "1.1.1.1");
        assert_eq!(options.country, "NL");
        assert_eq!(options.bind_address, "127.0.0.1:8086");
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_toml_parse_invalid() {
        assert!(Options::from_toml("rtt_threshold_ms = \"fast\"").is_err());
    }
}
