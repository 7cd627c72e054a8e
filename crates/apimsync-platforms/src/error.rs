//! Error types for apimsync-platforms

use thiserror::Error;

/// Result type alias using apimsync-platforms's Error type
pub type Result<T> = std::result::Result<T, PlatformError>;

/// Failures talking to a platform's REST API
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Request never produced a response
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Platform answered with a non-success status
    #[error("{status}")]
    Status { status: String, url: String },

    /// Response body did not have the expected shape
    #[error("Unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Prerequisites for building a client were not met
    #[error(transparent)]
    Configuration(#[from] apimsync_core::Error),
}

impl PlatformError {
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }

    /// Status rendered the way HTTP reports it, e.g. `401 Unauthorized`
    pub fn status(status: reqwest::StatusCode, url: impl Into<String>) -> Self {
        Self::Status {
            status: status.to_string(),
            url: url.into(),
        }
    }

    pub fn decode(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }
}
