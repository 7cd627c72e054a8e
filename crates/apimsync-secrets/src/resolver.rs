//! Token resolution across ordered sources
//!
//! Sources are tried in order and the first token wins. A failing source is
//! audited and the next one is tried; running out of sources yields `None`
//! rather than an error.

use crate::security::AuditLog;
use crate::sources::{ClientCredentialsSource, SuppliedSource, TokenSource};
use crate::types::ResolvedToken;
use apimsync_core::config::{ApiHubConfig, AzureConfig};
use apimsync_core::{Error, Result};
use async_trait::async_trait;

/// Supplies a bearer credential for one platform
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Platform the token is for
    fn platform(&self) -> &str;

    /// Whether any source is configured at all
    fn has_sources(&self) -> bool;

    /// Obtain a token; `None` when every source came up empty or failed
    async fn get_token(&self) -> Option<ResolvedToken>;

    /// Obtain a token, classifying the failure
    async fn acquire(&self) -> Result<ResolvedToken> {
        if !self.has_sources() {
            return Err(Error::configuration_missing(
                self.platform(),
                "token or client credentials",
            ));
        }
        self.get_token()
            .await
            .ok_or_else(|| Error::auth_failure(self.platform()))
    }
}

/// Token resolver that walks multiple sources
pub struct TokenResolver {
    platform: String,
    sources: Vec<Box<dyn TokenSource>>,
}

impl TokenResolver {
    /// Create with custom sources (for testing)
    pub fn with_sources(platform: impl Into<String>, sources: Vec<Box<dyn TokenSource>>) -> Self {
        Self {
            platform: platform.into(),
            sources,
        }
    }

    /// Supplied token, then environment token, then client credentials
    pub fn for_azure(config: &AzureConfig, http: reqwest::Client) -> Self {
        let creds = &config.credentials;
        let mut sources: Vec<Box<dyn TokenSource>> = Vec::new();

        let supplied = SuppliedSource::supplied(creds.token.as_deref());
        if supplied.is_set() {
            sources.push(Box::new(supplied));
        }

        let environment = SuppliedSource::environment(creds.env_token.as_deref());
        if environment.is_set() {
            sources.push(Box::new(environment));
        }

        if creds.has_client_credentials() {
            if let (Some(client_id), Some(client_secret), Some(tenant_id)) = (
                creds.client_id.as_deref(),
                creds.client_secret.as_deref(),
                creds.tenant_id.as_deref(),
            ) {
                sources.push(Box::new(ClientCredentialsSource::new(
                    http,
                    config.login_endpoint.as_str(),
                    tenant_id,
                    client_id,
                    client_secret,
                )));
            }
        }

        Self::with_sources(AzureConfig::PLATFORM, sources)
    }

    /// API Hub only accepts a token handed over at the boundary
    pub fn for_apihub(config: &ApiHubConfig) -> Self {
        let mut sources: Vec<Box<dyn TokenSource>> = Vec::new();
        let supplied = SuppliedSource::supplied(config.token.as_deref());
        if supplied.is_set() {
            sources.push(Box::new(supplied));
        }
        Self::with_sources(ApiHubConfig::PLATFORM, sources)
    }
}

#[async_trait]
impl TokenProvider for TokenResolver {
    fn platform(&self) -> &str {
        &self.platform
    }

    fn has_sources(&self) -> bool {
        !self.sources.is_empty()
    }

    async fn get_token(&self) -> Option<ResolvedToken> {
        for source in &self.sources {
            match source.resolve().await {
                Ok(Some(token)) => {
                    AuditLog::new(&self.platform, source.name()).log();
                    return Some(token);
                }
                Ok(None) => {
                    tracing::debug!("Token source '{}' returned nothing", source.name());
                }
                Err(e) => {
                    AuditLog::new(&self.platform, source.name())
                        .with_error(format!("{:#}", e))
                        .log();
                }
            }
        }
        None
    }
}
