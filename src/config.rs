//! Runtime configuration from environment variables

use std::net::SocketAddr;

use crate::error::{Error, Result};

/// Address the API server binds to when `SNOWLINE_BIND` is unset.
pub const DEFAULT_BIND: &str = "0.0.0.0:5000";

/// Imagery query service endpoint used when `SNOWLINE_IMAGERY_URL` is unset.
pub const DEFAULT_IMAGERY_URL: &str = "http://localhost:8080";

/// Reverse-geocoding endpoint used when `SNOWLINE_GEOCODER_URL` is unset.
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// Service configuration resolved at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Socket address the HTTP server listens on.
    pub bind_addr: SocketAddr,
    /// Base URL of the imagery query service.
    pub imagery_url: String,
    /// Optional bearer token for the imagery query service.
    pub imagery_token: Option<String>,
    /// Accept invalid TLS certificates from the imagery service only.
    /// Off unless `SNOWLINE_IMAGERY_ACCEPT_INVALID_CERTS` is set truthy.
    pub imagery_accept_invalid_certs: bool,
    /// Base URL of the reverse-geocoding service.
    pub geocoder_url: String,
}

impl Config {
    /// Reads the configuration from process environment variables,
    /// falling back to the defaults above.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind = lookup("SNOWLINE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind
            .parse()
            .map_err(|_| Error::Config(format!("SNOWLINE_BIND is not a socket address: {bind}")))?;

        Ok(Config {
            bind_addr,
            imagery_url: lookup("SNOWLINE_IMAGERY_URL")
                .unwrap_or_else(|| DEFAULT_IMAGERY_URL.to_string()),
            imagery_token: lookup("SNOWLINE_IMAGERY_TOKEN"),
            imagery_accept_invalid_certs: parse_bool(
                "SNOWLINE_IMAGERY_ACCEPT_INVALID_CERTS",
                lookup("SNOWLINE_IMAGERY_ACCEPT_INVALID_CERTS"),
            )?,
            geocoder_url: lookup("SNOWLINE_GEOCODER_URL")
                .unwrap_or_else(|| DEFAULT_GEOCODER_URL.to_string()),
        })
    }
}

fn parse_bool(name: &str, value: Option<String>) -> Result<bool> {
    match value.as_deref() {
        None => Ok(false),
        Some(raw) => match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            _ => Err(Error::Config(format!("{name} is not a boolean: {raw}"))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND);
        assert_eq!(config.imagery_url, DEFAULT_IMAGERY_URL);
        assert_eq!(config.imagery_token, None);
        assert!(!config.imagery_accept_invalid_certs);
        assert_eq!(config.geocoder_url, DEFAULT_GEOCODER_URL);
    }

    #[test]
    fn test_overrides_are_honored() {
        let config = Config::from_lookup(|name| match name {
            "SNOWLINE_BIND" => Some("127.0.0.1:9000".to_string()),
            "SNOWLINE_IMAGERY_URL" => Some("https://imagery.internal".to_string()),
            "SNOWLINE_IMAGERY_TOKEN" => Some("t0k3n".to_string()),
            "SNOWLINE_IMAGERY_ACCEPT_INVALID_CERTS" => Some("true".to_string()),
            "SNOWLINE_GEOCODER_URL" => Some("https://geo.internal".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(config.imagery_url, "https://imagery.internal");
        assert_eq!(config.imagery_token.as_deref(), Some("t0k3n"));
        assert!(config.imagery_accept_invalid_certs);
        assert_eq!(config.geocoder_url, "https://geo.internal");
    }

    #[test]
    fn test_invalid_bind_address_is_rejected() {
        let result = Config::from_lookup(|name| match name {
            "SNOWLINE_BIND" => Some("not-an-address".to_string()),
            _ => None,
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_cert_flag_is_rejected() {
        let result = Config::from_lookup(|name| match name {
            "SNOWLINE_IMAGERY_ACCEPT_INVALID_CERTS" => Some("maybe".to_string()),
            _ => None,
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
