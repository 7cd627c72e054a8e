//! Synchronization request/response and status types

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Platforms APIs can be offramped from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourcePlatform {
    Azure,
}

impl SourcePlatform {
    pub const ALL: &'static [SourcePlatform] = &[SourcePlatform::Azure];

    /// Staging tag of the platform
    pub fn tag(&self) -> &'static str {
        match self {
            SourcePlatform::Azure => "azure",
        }
    }
}

impl std::fmt::Display for SourcePlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for SourcePlatform {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "azure" => Ok(SourcePlatform::Azure),
            other => Err(crate::Error::unknown_platform(other, &["azure"])),
        }
    }
}

/// Platforms APIs can be onramped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationPlatform {
    Apihub,
}

impl DestinationPlatform {
    pub const ALL: &'static [DestinationPlatform] = &[DestinationPlatform::Apihub];

    /// Staging tag of the platform
    pub fn tag(&self) -> &'static str {
        match self {
            DestinationPlatform::Apihub => "apihub",
        }
    }
}

impl std::fmt::Display for DestinationPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for DestinationPlatform {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "apihub" => Ok(DestinationPlatform::Apihub),
            other => Err(crate::Error::unknown_platform(other, &["apihub"])),
        }
    }
}

/// Connection status of one platform
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformStatus {
    pub connected: bool,
    pub message: String,
}

impl PlatformStatus {
    pub fn connected(message: impl Into<String>) -> Self {
        Self {
            connected: true,
            message: message.into(),
        }
    }

    pub fn disconnected(message: impl Into<String>) -> Self {
        Self {
            connected: false,
            message: message.into(),
        }
    }
}

/// Status of every supported platform
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub azure: PlatformStatus,
    pub apihub: PlatformStatus,
}

/// Synchronization request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
    /// Platform to offramp the APIs from
    pub offramp: SourcePlatform,

    /// Platform to onramp the APIs to
    pub onramp: DestinationPlatform,

    /// Only export APIs that are not staged yet
    #[serde(default)]
    pub only_new: bool,
}

/// Synchronization outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResponse {
    pub result: bool,
    pub message: String,
}
