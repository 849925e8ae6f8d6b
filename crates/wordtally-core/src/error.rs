//! Error types for wordtally-core.
//!
//! Dictionary operations never fail; only configuration loading and text
//! sources have error channels.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading text from a source.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The address could not be parsed as an HTTP(S) URL.
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl {
        /// The address as given.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The HTTP client could not be built.
    #[error("failed to initialize HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request failed (unreachable host, timeout, bad body).
    #[error("request to {url} failed: {source}")]
    Request {
        /// The requested URL.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    HttpStatus {
        /// The requested URL.
        url: String,
        /// Status code returned.
        status: reqwest::StatusCode,
    },

    /// A file, stdin or response body could not be read.
    #[error("failed to read {origin}: {source}")]
    Io {
        /// URL, path or `-` for stdin.
        origin: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The input exceeds the configured size limit.
    #[error("input too large: {origin} is {size} bytes (limit: {limit} bytes)")]
    TooLarge {
        /// URL, path or `-` for stdin.
        origin: String,
        /// Observed size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: u64,
    },
}

impl SourceError {
    /// Whether retrying the same source later might succeed.
    ///
    /// Timeouts, connection failures and server-side (5xx) statuses are
    /// transient; everything else will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request { source, .. } => source.is_timeout() || source.is_connect(),
            Self::HttpStatus { status, .. } => status.is_server_error(),
            _ => false,
        }
    }
}

/// Result type alias using [`SourceError`].
pub type SourceResult<T> = Result<T, SourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_large_message_names_origin_and_limit() {
        let err = SourceError::TooLarge {
            origin: "page.html".to_string(),
            size: 2048,
            limit: 1024,
        };
        assert_eq!(
            err.to_string(),
            "input too large: page.html is 2048 bytes (limit: 1024 bytes)"
        );
        assert!(!err.is_retryable());
    }

    #[test]
    fn server_errors_are_retryable() {
        let err = SourceError::HttpStatus {
            url: "https://example.com".to_string(),
            status: reqwest::StatusCode::BAD_GATEWAY,
        };
        assert!(err.is_retryable());

        let err = SourceError::HttpStatus {
            url: "https://example.com".to_string(),
            status: reqwest::StatusCode::NOT_FOUND,
        };
        assert!(!err.is_retryable());
    }
}
