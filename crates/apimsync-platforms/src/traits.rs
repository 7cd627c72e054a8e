//! Platform trait definitions

use crate::error::Result;
use apimsync_core::types::{CatalogApi, CatalogVersion, PlatformApi, PlatformService, SchemaDocument};
use async_trait::async_trait;
use serde_json::Value;

/// Pure identity and link templates of a source platform.
///
/// Needs no credentials, so offramping staged files works offline.
pub trait PlatformDescriptor: Send + Sync {
    /// Short tag used in staging paths and canonical names (`azure`)
    fn tag(&self) -> &str;

    /// Stable platform identifier (`azure-api-management`)
    fn platform_id(&self) -> &str;

    /// Human readable platform name
    fn platform_name(&self) -> &str;

    /// Deep link to the API in the platform's console
    fn resource_uri(&self, api_name: &str) -> String;

    /// Developer portal page of the API; empty without service metadata
    fn documentation_url(&self, service: &PlatformService, api_name: &str) -> String;

    /// Public URL of the API on the platform gateway; empty without service metadata
    fn gateway_url(&self, service: &PlatformService, base_path: &str) -> String;
}

/// Read access to a source platform's API inventory
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Link templates of the platform
    fn descriptor(&self) -> &dyn PlatformDescriptor;

    /// Name of the platform service (account) the client is bound to
    fn service_name(&self) -> &str;

    /// All APIs, including revisions
    async fn list_apis(&self) -> Result<Vec<PlatformApi>>;

    /// One API by raw name
    async fn get_api(&self, name: &str) -> Result<Option<PlatformApi>>;

    /// Schema document of an API, if it has one
    async fn get_schema(&self, api_name: &str) -> Result<Option<SchemaDocument>>;

    /// Raw service metadata document
    async fn get_service_metadata(&self) -> Result<Option<Value>>;
}

/// Outcome of a create call against a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
}

/// Spec document uploaded alongside an API version
#[derive(Debug, Clone, Copy)]
pub struct SpecUpload<'a> {
    pub spec_id: &'a str,
    pub display_name: &'a str,
    pub contents: &'a [u8],
}

/// Write access to a destination platform's API catalog
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Short tag used in staging paths (`apihub`)
    fn tag(&self) -> &str;

    /// Human readable platform name
    fn platform_name(&self) -> &str;

    /// Where in the platform the catalog lives, for status messages
    fn scope(&self) -> String;

    /// All catalog entries, as returned by the platform
    async fn list_apis(&self) -> Result<Vec<Value>>;

    async fn create_api(&self, api_id: &str, api: &CatalogApi) -> Result<CreateOutcome>;

    async fn create_version(
        &self,
        api_id: &str,
        version_id: &str,
        version: &CatalogVersion,
    ) -> Result<CreateOutcome>;

    async fn create_spec(
        &self,
        api_id: &str,
        version_id: &str,
        spec: SpecUpload<'_>,
    ) -> Result<CreateOutcome>;
}
