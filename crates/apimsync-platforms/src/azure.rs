//! Azure API Management source adapter
//!
//! Talks to the Azure Resource Manager REST API of one API Management
//! service. Every call is a single bearer-authenticated GET.

use crate::error::Result;
use crate::http::BearerClient;
use crate::traits::{PlatformClient, PlatformDescriptor};
use apimsync_core::config::{AzureConfig, AzureIdentifiers};
use apimsync_core::types::{PlatformApi, PlatformApiList, PlatformService, SchemaDocument};
use apimsync_secrets::SecureString;
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

pub const TAG: &str = "azure";
pub const PLATFORM_ID: &str = "azure-api-management";
pub const PLATFORM_NAME: &str = "Azure API Management";
pub const API_VERSION: &str = "2022-08-01";

const PORTAL_URL: &str = "https://portal.azure.com";

/// Link templates for one Azure API Management service
#[derive(Debug, Clone)]
pub struct AzureDescriptor {
    ids: AzureIdentifiers,
}

impl AzureDescriptor {
    pub fn new(ids: AzureIdentifiers) -> Self {
        Self { ids }
    }

    /// Build from configuration, naming the first missing identifier
    pub fn from_config(config: &AzureConfig) -> apimsync_core::Result<Self> {
        Ok(Self::new(config.identifiers()?))
    }

    pub fn identifiers(&self) -> &AzureIdentifiers {
        &self.ids
    }
}

impl PlatformDescriptor for AzureDescriptor {
    fn tag(&self) -> &str {
        TAG
    }

    fn platform_id(&self) -> &str {
        PLATFORM_ID
    }

    fn platform_name(&self) -> &str {
        PLATFORM_NAME
    }

    fn resource_uri(&self, api_name: &str) -> String {
        format!(
            "{}/#resource/subscriptions/{}/resourceGroups/{}/providers/Microsoft.ApiManagement/service/{}/overview?apiName={}",
            PORTAL_URL, self.ids.subscription, self.ids.resource_group, self.ids.service_name, api_name
        )
    }

    fn documentation_url(&self, service: &PlatformService, api_name: &str) -> String {
        let portal = service.properties.developer_portal_url.trim_end_matches('/');
        if portal.is_empty() {
            return String::new();
        }
        format!("{}/api-details#api={}", portal, api_name)
    }

    fn gateway_url(&self, service: &PlatformService, base_path: &str) -> String {
        let gateway = service.properties.gateway_url.trim_end_matches('/');
        if gateway.is_empty() {
            return String::new();
        }
        let path = base_path.trim_start_matches('/');
        if path.is_empty() {
            return gateway.to_string();
        }
        format!("{}/{}", gateway, path)
    }
}

/// Client for one Azure API Management service
pub struct AzureClient {
    http: BearerClient,
    base_url: String,
    descriptor: AzureDescriptor,
}

impl AzureClient {
    pub fn new(config: &AzureConfig, token: SecureString, http: reqwest::Client) -> Result<Self> {
        let descriptor = AzureDescriptor::from_config(config)?;
        Ok(Self {
            http: BearerClient::new(http, token),
            base_url: config.management_endpoint.trim_end_matches('/').to_string(),
            descriptor,
        })
    }

    /// `…/providers/Microsoft.ApiManagement/service/<name>`
    fn service_url(&self) -> String {
        let ids = self.descriptor.identifiers();
        format!(
            "{}/subscriptions/{}/resourceGroups/{}/providers/Microsoft.ApiManagement/service/{}",
            self.base_url, ids.subscription, ids.resource_group, ids.service_name
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}?api-version={}", self.service_url(), path, API_VERSION)
    }
}

#[async_trait]
impl PlatformClient for AzureClient {
    fn descriptor(&self) -> &dyn PlatformDescriptor {
        &self.descriptor
    }

    fn service_name(&self) -> &str {
        &self.descriptor.identifiers().service_name
    }

    async fn list_apis(&self) -> Result<Vec<PlatformApi>> {
        let mut apis = Vec::new();
        let mut next = Some(self.url("/apis"));

        while let Some(url) = next.take() {
            let page: PlatformApiList = self.http.get_json(&url).await?;
            apis.extend(page.value);
            next = page.next_link.filter(|link| !link.is_empty() && *link != url);
        }

        debug!("Azure service {} lists {} APIs", self.service_name(), apis.len());
        Ok(apis)
    }

    async fn get_api(&self, name: &str) -> Result<Option<PlatformApi>> {
        self.http.get_optional(&self.url(&format!("/apis/{}", name))).await
    }

    async fn get_schema(&self, api_name: &str) -> Result<Option<SchemaDocument>> {
        let schema: Option<SchemaDocument> = self
            .http
            .get_optional(&self.url(&format!("/schemas/{}", api_name)))
            .await?;
        Ok(schema.filter(SchemaDocument::is_present))
    }

    async fn get_service_metadata(&self) -> Result<Option<Value>> {
        self.http.get_optional(&self.url("")).await
    }
}
