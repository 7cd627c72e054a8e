//! Core types for token acquisition

use crate::security::SecureString;
use serde::Deserialize;
use serde_json::Value;

/// Bearer token together with where it came from
#[derive(Debug, Clone)]
pub struct ResolvedToken {
    pub value: SecureString,
    pub resolved_from: ResolvedFrom,
}

impl ResolvedToken {
    pub fn new(value: impl Into<SecureString>, resolved_from: ResolvedFrom) -> Self {
        Self {
            value: value.into(),
            resolved_from,
        }
    }

    /// The raw bearer value
    pub fn bearer(&self) -> &str {
        self.value.as_str()
    }
}

/// Information about where a token was resolved from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedFrom {
    /// Passed directly on the command line or in a request
    Supplied,
    /// Read from the environment at the boundary
    Environment,
    /// Exchanged from client id/secret at a tenant's token endpoint
    ClientCredentials { tenant_id: String },
}

impl std::fmt::Display for ResolvedFrom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolvedFrom::Supplied => write!(f, "supplied token"),
            ResolvedFrom::Environment => write!(f, "environment token"),
            ResolvedFrom::ClientCredentials { tenant_id } => {
                write!(f, "client credentials (tenant {})", tenant_id)
            }
        }
    }
}

/// Response body of an OAuth2 token endpoint
#[derive(Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: String,

    #[serde(default)]
    pub token_type: String,

    /// Seconds; Azure AD v1 sends this as a string
    #[serde(default)]
    pub expires_in: Option<Value>,

    #[serde(default)]
    pub resource: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("resource", &self.resource)
            .finish()
    }
}
