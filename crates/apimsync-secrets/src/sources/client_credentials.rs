//! OAuth2 client-credentials exchange against an Azure AD tenant

use crate::security::sanitize_error;
use crate::sources::TokenSource;
use crate::types::{ResolvedFrom, ResolvedToken, TokenResponse};
use crate::SecureString;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use tracing::debug;

/// Resource the management token is requested for
pub const MANAGEMENT_RESOURCE: &str = "https://management.azure.com/";

pub struct ClientCredentialsSource {
    http: reqwest::Client,
    login_endpoint: String,
    tenant_id: String,
    client_id: String,
    client_secret: SecureString,
}

impl ClientCredentialsSource {
    pub fn new(
        http: reqwest::Client,
        login_endpoint: impl Into<String>,
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<SecureString>,
    ) -> Self {
        Self {
            http,
            login_endpoint: login_endpoint.into(),
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    fn token_url(&self) -> String {
        format!(
            "{}/{}/oauth2/token",
            self.login_endpoint.trim_end_matches('/'),
            self.tenant_id
        )
    }
}

#[async_trait]
impl TokenSource for ClientCredentialsSource {
    async fn resolve(&self) -> Result<Option<ResolvedToken>> {
        let url = self.token_url();
        debug!("Requesting client-credentials token from {}", url);

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("resource", MANAGEMENT_RESOURCE),
        ];

        let response = self
            .http
            .post(&url)
            .form(&form)
            .send()
            .await
            .with_context(|| format!("Failed to reach token endpoint {}", url))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read token endpoint response")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Token endpoint returned {}: {}",
                status,
                sanitize_error(&body)
            ));
        }

        let token: TokenResponse =
            serde_json::from_str(&body).context("Failed to parse token endpoint response")?;

        if token.access_token.is_empty() {
            return Ok(None);
        }

        Ok(Some(ResolvedToken::new(
            token.access_token.clone(),
            ResolvedFrom::ClientCredentials {
                tenant_id: self.tenant_id.clone(),
            },
        )))
    }

    fn name(&self) -> &'static str {
        "client-credentials"
    }
}
