//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// Backend base URL could not be parsed.
    #[error("invalid backend URL '{value}': {message}")]
    InvalidBackendUrl { value: String, message: String },

    /// A minimum query length of zero would send a backend query for every
    /// keystroke, including empty input.
    #[error("minimum query length must be at least 1")]
    InvalidMinQueryLen,

    /// A result cap of zero makes every search trivially empty.
    #[error("result cap must be at least 1")]
    InvalidResultCap,
}
