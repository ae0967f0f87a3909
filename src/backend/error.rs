use thiserror::Error;

#[derive(Debug, Error)]
/// Errors surfaced by search backend operations.
///
/// All variants are non-fatal at the session level: the dispatcher reports
/// them and leaves the current result set untouched. The next keystroke
/// naturally re-attempts; there is no automatic retry.
pub enum BackendError {
    /// The configured base URL could not be parsed.
    #[error("invalid backend URL '{url}': {message}")]
    InvalidUrl {
        /// Offending URL string.
        url: String,
        /// Parse error message.
        message: String,
    },

    /// Transport-level failure (connect, timeout, TLS).
    #[error("backend unavailable at '{url}': {message}")]
    Unavailable {
        /// Endpoint URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// The backend answered with a non-success HTTP status.
    #[error("backend returned status {status}")]
    BackendStatus {
        /// HTTP status code.
        status: u16,
    },

    /// The response body did not match the expected hits structure.
    #[error("malformed backend response: {message}")]
    MalformedResponse {
        /// Decode error message.
        message: String,
    },
}
