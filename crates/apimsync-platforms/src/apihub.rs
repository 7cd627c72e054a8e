//! Apigee API Hub destination adapter

use crate::error::Result;
use crate::http::BearerClient;
use crate::traits::{CatalogClient, CreateOutcome, SpecUpload};
use apimsync_core::config::{ApiHubConfig, ApiHubIdentifiers};
use apimsync_core::types::{CatalogApi, CatalogVersion};
use apimsync_secrets::SecureString;
use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;
use serde_json::{json, Value};

pub const TAG: &str = "apihub";
pub const PLATFORM_NAME: &str = "Apigee API Hub";

const SPEC_MIME_TYPE: &str = "application/json";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiListPage {
    #[serde(default)]
    apis: Vec<Value>,
    #[serde(default)]
    next_page_token: Option<String>,
}

/// Client for the API Hub instance of one project and region
pub struct ApiHubClient {
    http: BearerClient,
    base_url: String,
    ids: ApiHubIdentifiers,
}

impl ApiHubClient {
    pub fn new(config: &ApiHubConfig, token: SecureString, http: reqwest::Client) -> Result<Self> {
        let ids = config.identifiers()?;
        let base_url = format!(
            "{}/v1/projects/{}/locations/{}",
            config.endpoint.trim_end_matches('/'),
            ids.project,
            ids.region
        );
        Ok(Self {
            http: BearerClient::new(http, token),
            base_url,
            ids,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CatalogClient for ApiHubClient {
    fn tag(&self) -> &str {
        TAG
    }

    fn platform_name(&self) -> &str {
        PLATFORM_NAME
    }

    fn scope(&self) -> String {
        format!("project {} ({})", self.ids.project, self.ids.region)
    }

    async fn list_apis(&self) -> Result<Vec<Value>> {
        let mut apis = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let url = match &page_token {
                Some(token) => format!("{}/apis?pageToken={}", self.base_url, token),
                None => format!("{}/apis", self.base_url),
            };
            let page: ApiListPage = self.http.get_json(&url).await?;
            apis.extend(page.apis);

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(next) if page_token.as_deref() != Some(next.as_str()) => {
                    page_token = Some(next)
                }
                _ => break,
            }
        }

        Ok(apis)
    }

    async fn create_api(&self, api_id: &str, api: &CatalogApi) -> Result<CreateOutcome> {
        let url = format!("{}/apis?apiId={}", self.base_url, api_id);
        self.http.create(&url, api).await
    }

    async fn create_version(
        &self,
        api_id: &str,
        version_id: &str,
        version: &CatalogVersion,
    ) -> Result<CreateOutcome> {
        let url = format!(
            "{}/apis/{}/versions?versionId={}",
            self.base_url, api_id, version_id
        );
        self.http.create(&url, version).await
    }

    async fn create_spec(
        &self,
        api_id: &str,
        version_id: &str,
        spec: SpecUpload<'_>,
    ) -> Result<CreateOutcome> {
        let url = format!(
            "{}/apis/{}/versions/{}/specs?specId={}",
            self.base_url, api_id, version_id, spec.spec_id
        );
        let body = json!({
            "displayName": spec.display_name,
            "contents": {
                "contents": base64::engine::general_purpose::STANDARD.encode(spec.contents),
                "mimeType": SPEC_MIME_TYPE,
            }
        });
        self.http.create(&url, &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url() {
        let config = ApiHubConfig {
            project: Some("proj".to_string()),
            region: Some("europe-west1".to_string()),
            endpoint: "https://apihub.googleapis.com/".to_string(),
            token: None,
        };
        let client =
            ApiHubClient::new(&config, SecureString::from("t"), reqwest::Client::new()).unwrap();
        assert_eq!(
            client.base_url(),
            "https://apihub.googleapis.com/v1/projects/proj/locations/europe-west1"
        );
        assert_eq!(client.scope(), "project proj (europe-west1)");
    }

    #[test]
    fn test_missing_region() {
        let config = ApiHubConfig {
            project: Some("proj".to_string()),
            ..ApiHubConfig::default()
        };
        let err = ApiHubClient::new(&config, SecureString::from("t"), reqwest::Client::new())
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "No region given, cannot connect to Apigee API Hub.");
    }
}
