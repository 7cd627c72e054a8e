//! Bearer-authenticated JSON requests shared by the platform clients

use crate::error::{PlatformError, Result};
use crate::traits::CreateOutcome;
use apimsync_secrets::SecureString;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};

/// Build the HTTP client every platform adapter shares
pub fn default_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!("apimsync/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Authenticated HTTP handle for one platform
#[derive(Clone)]
pub(crate) struct BearerClient {
    http: reqwest::Client,
    token: SecureString,
}

impl BearerClient {
    pub(crate) fn new(http: reqwest::Client, token: SecureString) -> Self {
        Self { http, token }
    }

    /// GET a JSON document, failing on any non-success status
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        match self.get_optional(url).await? {
            Some(value) => Ok(value),
            None => Err(PlatformError::status(StatusCode::NOT_FOUND, url)),
        }
    }

    /// GET a JSON document; `404 Not Found` yields `None`
    pub(crate) async fn get_optional<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .bearer_auth(self.token.as_str())
            .send()
            .await
            .map_err(|e| PlatformError::transport(url, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(PlatformError::status(status, url));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PlatformError::transport(url, e))?;
        trace!("Response from {}: {} bytes", url, body.len());

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| PlatformError::decode(url, e))
    }

    /// POST a JSON body to create a resource; `409 Conflict` means it already exists
    pub(crate) async fn create<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<CreateOutcome> {
        debug!("POST {}", url);
        let response = self
            .http
            .post(url)
            .bearer_auth(self.token.as_str())
            .json(body)
            .send()
            .await
            .map_err(|e| PlatformError::transport(url, e))?;

        match response.status() {
            StatusCode::CONFLICT => Ok(CreateOutcome::AlreadyExists),
            status if status.is_success() => Ok(CreateOutcome::Created),
            status => Err(PlatformError::status(status, url)),
        }
    }
}
