//! Error types for the compat-data source.

use thiserror::Error;

use super::ConfigError;

/// Errors that can occur while listing or fetching compat-data files.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// Non-2xx HTTP response.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The response body could not be read.
    #[error("failed to read response body from {url}: {source}")]
    Body {
        /// The URL whose body failed to arrive.
        url: String,
        /// The underlying read error.
        #[source]
        source: reqwest::Error,
    },

    /// The response body is not valid JSON of the expected shape.
    #[error("failed to parse JSON from {url}: {source}")]
    Json {
        /// The URL whose body failed to parse.
        url: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The source configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be constructed.
    #[error("HTTP client construction failed: {reason}")]
    ClientBuild {
        /// What went wrong.
        reason: String,
    },
}

impl SourceError {
    /// Creates a network error, promoting timeouts to [`SourceError::Timeout`].
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        if source.is_timeout() {
            Self::Timeout { url }
        } else {
            Self::Network { url, source }
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a body read error, promoting timeouts to [`SourceError::Timeout`].
    pub fn body(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        if source.is_timeout() {
            Self::Timeout { url }
        } else {
            Self::Body { url, source }
        }
    }

    /// Creates a JSON parse error.
    pub fn json(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            url: url.into(),
            source,
        }
    }

    /// Creates a client construction error.
    pub fn client_build(reason: impl Into<String>) -> Self {
        Self::ClientBuild {
            reason: reason.into(),
        }
    }
}

// No `From<reqwest::Error>`: the network variants need the URL, which the
// source error does not carry. Use the constructors above.
