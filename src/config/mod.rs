//! Environment-backed configuration.
//!
//! All settings have defaults. Override with `QRELJUDGE_*` environment
//! variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::time::Duration;

use crate::backend::{DEFAULT_INDEX, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RESULT_CAP};
use crate::dispatch::{DEFAULT_DEBOUNCE_MS, DEFAULT_MIN_QUERY_LEN, DispatcherConfig};

/// Default Elasticsearch URL used when `QRELJUDGE_BACKEND_URL` is not set.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:9200";

/// Server and session configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `QRELJUDGE_*` overrides on top of
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Elasticsearch endpoint URL. Default: `http://localhost:9200`.
    pub backend_url: String,

    /// Elasticsearch index to search. Default: `crawler`.
    pub index: String,

    /// Cap on results requested per search. Default: `200`.
    pub result_cap: usize,

    /// Per-request backend timeout, in seconds. Default: `10`.
    pub request_timeout_secs: u64,

    /// Debounce window for query dispatch, in milliseconds. Default: `300`.
    pub debounce_ms: u64,

    /// Minimum query length sent to the backend. Default: `3`.
    pub min_query_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            index: DEFAULT_INDEX.to_string(),
            result_cap: DEFAULT_RESULT_CAP,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "QRELJUDGE_PORT";
    const ENV_BIND_ADDR: &'static str = "QRELJUDGE_BIND_ADDR";
    const ENV_BACKEND_URL: &'static str = "QRELJUDGE_BACKEND_URL";
    const ENV_INDEX: &'static str = "QRELJUDGE_INDEX";
    const ENV_RESULT_CAP: &'static str = "QRELJUDGE_RESULT_CAP";
    const ENV_REQUEST_TIMEOUT_SECS: &'static str = "QRELJUDGE_REQUEST_TIMEOUT_SECS";
    const ENV_DEBOUNCE_MS: &'static str = "QRELJUDGE_DEBOUNCE_MS";
    const ENV_MIN_QUERY_LEN: &'static str = "QRELJUDGE_MIN_QUERY_LEN";

    /// Loads configuration from environment variables (falling back to
    /// defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let backend_url = Self::parse_string_from_env(Self::ENV_BACKEND_URL, defaults.backend_url);
        let index = Self::parse_string_from_env(Self::ENV_INDEX, defaults.index);
        let result_cap = Self::parse_usize_from_env(Self::ENV_RESULT_CAP, defaults.result_cap);
        let request_timeout_secs = Self::parse_u64_from_env(
            Self::ENV_REQUEST_TIMEOUT_SECS,
            defaults.request_timeout_secs,
        );
        let debounce_ms = Self::parse_u64_from_env(Self::ENV_DEBOUNCE_MS, defaults.debounce_ms);
        let min_query_len =
            Self::parse_usize_from_env(Self::ENV_MIN_QUERY_LEN, defaults.min_query_len);

        Ok(Self {
            port,
            bind_addr,
            backend_url,
            index,
            result_cap,
            request_timeout_secs,
            debounce_ms,
            min_query_len,
        })
    }

    /// Validates basic invariants (does not contact the backend).
    pub fn validate(&self) -> Result<(), ConfigError> {
        reqwest::Url::parse(&self.backend_url).map_err(|e| ConfigError::InvalidBackendUrl {
            value: self.backend_url.clone(),
            message: e.to_string(),
        })?;

        if self.min_query_len == 0 {
            return Err(ConfigError::InvalidMinQueryLen);
        }

        if self.result_cap == 0 {
            return Err(ConfigError::InvalidResultCap);
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Returns the dispatcher tuning derived from this configuration.
    pub fn dispatcher_config(&self) -> DispatcherConfig {
        DispatcherConfig {
            window: Duration::from_millis(self.debounce_ms),
            min_query_len: self.min_query_len,
        }
    }

    /// Returns the backend request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn parse_usize_from_env(var_name: &str, default: usize) -> usize {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}
