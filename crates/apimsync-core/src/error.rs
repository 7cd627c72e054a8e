//! Error types for apimsync-core

use camino::Utf8PathBuf;
use thiserror::Error;

/// Result type alias using apimsync-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for apimsync
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration format
    #[error("Invalid configuration format: {message}")]
    InvalidConfig { message: String },

    /// A required identifier or credential is absent
    #[error("No {field} given, cannot connect to {platform}.")]
    ConfigurationMissing { platform: String, field: String },

    /// Token acquisition produced nothing
    #[error("Could not get a valid {platform} token.")]
    AuthFailure { platform: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Staging file could not be read or written
    #[error("Staging I/O failed for {path}: {source}")]
    StagingIo {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Staged file could not be decoded
    #[error("Staged file {path} is not valid: {source}")]
    StagingDecode {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown platform tag
    #[error("Unknown platform: {platform}. Valid platforms: {valid}")]
    UnknownPlatform { platform: String, valid: String },
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a configuration missing error
    pub fn configuration_missing(platform: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ConfigurationMissing {
            platform: platform.into(),
            field: field.into(),
        }
    }

    /// Create an auth failure error
    pub fn auth_failure(platform: impl Into<String>) -> Self {
        Self::AuthFailure {
            platform: platform.into(),
        }
    }

    /// Create a staging I/O error for a path
    pub fn staging_io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::StagingIo {
            path: path.into(),
            source,
        }
    }

    /// Create a staging decode error for a path
    pub fn staging_decode(path: impl Into<Utf8PathBuf>, source: serde_json::Error) -> Self {
        Self::StagingDecode {
            path: path.into(),
            source,
        }
    }

    /// Create an unknown platform error
    pub fn unknown_platform(platform: impl Into<String>, valid: &[&str]) -> Self {
        Self::UnknownPlatform {
            platform: platform.into(),
            valid: valid.join(", "),
        }
    }

    /// Whether this error means a stage should be reported as a no-op
    /// rather than treated as a failure of the staged data
    pub fn is_prerequisite(&self) -> bool {
        matches!(
            self,
            Self::ConfigurationMissing { .. } | Self::AuthFailure { .. }
        )
    }
}
