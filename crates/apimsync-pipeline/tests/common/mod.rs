//! In-memory platform and catalog doubles for pipeline tests

#![allow(dead_code)]

use apimsync_core::types::{
    CatalogApi, CatalogVersion, PlatformApi, PlatformApiProperties, PlatformService,
    SchemaDocument, SchemaProperties,
};
use apimsync_core::Stager;
use apimsync_platforms::{
    CatalogClient, CreateOutcome, PlatformClient, PlatformDescriptor, PlatformError, SpecUpload,
};
use async_trait::async_trait;
use camino::Utf8PathBuf;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tempfile::TempDir;

pub const PROTO_TAG: &str = "proto";
pub const PROTO_GATEWAY: &str = "https://gw.proto.example";
pub const PROTO_SERVICE: &str = "proto-svc";

/// Temporary staging root that lives as long as the value
pub struct TestStaging {
    _temp: TempDir,
    pub stager: Stager,
}

pub fn staging() -> TestStaging {
    let temp = TempDir::new().unwrap();
    let root = Utf8PathBuf::try_from(temp.path().to_path_buf()).unwrap();
    TestStaging {
        _temp: temp,
        stager: Stager::new(root),
    }
}

pub struct ProtoDescriptor;

impl PlatformDescriptor for ProtoDescriptor {
    fn tag(&self) -> &str {
        PROTO_TAG
    }

    fn platform_id(&self) -> &str {
        "proto-platform"
    }

    fn platform_name(&self) -> &str {
        "Proto Platform"
    }

    fn resource_uri(&self, api_name: &str) -> String {
        format!("https://console.proto.example/apis/{}", api_name)
    }

    fn documentation_url(&self, service: &PlatformService, api_name: &str) -> String {
        if service.properties.developer_portal_url.is_empty() {
            return String::new();
        }
        format!("{}/apis/{}", service.properties.developer_portal_url, api_name)
    }

    fn gateway_url(&self, service: &PlatformService, base_path: &str) -> String {
        if service.properties.gateway_url.is_empty() {
            return String::new();
        }
        format!(
            "{}/{}",
            service.properties.gateway_url.trim_end_matches('/'),
            base_path.trim_start_matches('/')
        )
    }
}

pub fn api(name: &str, display_name: &str, version: &str, path: &str) -> PlatformApi {
    PlatformApi {
        id: format!("/apis/{}", name),
        kind: "proto/apis".to_string(),
        name: name.to_string(),
        properties: PlatformApiProperties {
            display_name: display_name.to_string(),
            api_version: version.to_string(),
            path: path.to_string(),
            is_current: true,
            ..PlatformApiProperties::default()
        },
    }
}

pub fn schema(name: &str, schema_type: &str, document: &str) -> SchemaDocument {
    SchemaDocument {
        id: format!("/schemas/{}", name),
        kind: "proto/schemas".to_string(),
        name: name.to_string(),
        properties: SchemaProperties {
            description: String::new(),
            schema_type: schema_type.to_string(),
            document: document.to_string(),
        },
    }
}

/// Source platform double serving a fixed inventory
pub struct MockPlatform {
    pub descriptor: ProtoDescriptor,
    pub apis: Vec<PlatformApi>,
    pub schemas: HashMap<String, SchemaDocument>,
    pub service: Option<Value>,
    pub fail_listing: bool,
    pub schema_requests: Mutex<Vec<String>>,
}

impl MockPlatform {
    pub fn new(apis: Vec<PlatformApi>) -> Self {
        Self {
            descriptor: ProtoDescriptor,
            apis,
            schemas: HashMap::new(),
            service: Some(json!({
                "name": PROTO_SERVICE,
                "properties": {
                    "gatewayUrl": PROTO_GATEWAY,
                    "developerPortalUrl": "https://portal.proto.example",
                    "publisherEmail": "apis@proto.example",
                    "publisherName": "Proto Team"
                }
            })),
            fail_listing: false,
            schema_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_schema(mut self, schema: SchemaDocument) -> Self {
        self.schemas.insert(schema.name.clone(), schema);
        self
    }

    pub fn schema_requests(&self) -> Vec<String> {
        self.schema_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlatformClient for MockPlatform {
    fn descriptor(&self) -> &dyn PlatformDescriptor {
        &self.descriptor
    }

    fn service_name(&self) -> &str {
        PROTO_SERVICE
    }

    async fn list_apis(&self) -> apimsync_platforms::Result<Vec<PlatformApi>> {
        if self.fail_listing {
            return Err(PlatformError::Status {
                status: "503 Service Unavailable".to_string(),
                url: "mock://apis".to_string(),
            });
        }
        Ok(self.apis.clone())
    }

    async fn get_api(&self, name: &str) -> apimsync_platforms::Result<Option<PlatformApi>> {
        Ok(self.apis.iter().find(|a| a.name == name).cloned())
    }

    async fn get_schema(&self, api_name: &str) -> apimsync_platforms::Result<Option<SchemaDocument>> {
        self.schema_requests.lock().unwrap().push(api_name.to_string());
        Ok(self.schemas.get(api_name).cloned())
    }

    async fn get_service_metadata(&self) -> apimsync_platforms::Result<Option<Value>> {
        Ok(self.service.clone())
    }
}

/// Destination catalog double recording every create call
#[derive(Default)]
pub struct MockCatalog {
    pub calls: Mutex<Vec<String>>,
    pub existing: Mutex<HashSet<String>>,
    pub failing_apis: HashSet<String>,
}

impl MockCatalog {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> CreateOutcome {
        self.calls.lock().unwrap().push(call.clone());
        if self.existing.lock().unwrap().insert(call) {
            CreateOutcome::Created
        } else {
            CreateOutcome::AlreadyExists
        }
    }
}

#[async_trait]
impl CatalogClient for MockCatalog {
    fn tag(&self) -> &str {
        "hub"
    }

    fn platform_name(&self) -> &str {
        "Mock Hub"
    }

    fn scope(&self) -> String {
        "memory".to_string()
    }

    async fn list_apis(&self) -> apimsync_platforms::Result<Vec<Value>> {
        Ok(Vec::new())
    }

    async fn create_api(
        &self,
        api_id: &str,
        _api: &CatalogApi,
    ) -> apimsync_platforms::Result<CreateOutcome> {
        if self.failing_apis.contains(api_id) {
            return Err(PlatformError::Status {
                status: "500 Internal Server Error".to_string(),
                url: format!("mock://apis/{}", api_id),
            });
        }
        Ok(self.record(format!("api:{}", api_id)))
    }

    async fn create_version(
        &self,
        api_id: &str,
        version_id: &str,
        _version: &CatalogVersion,
    ) -> apimsync_platforms::Result<CreateOutcome> {
        Ok(self.record(format!("version:{}/{}", api_id, version_id)))
    }

    async fn create_spec(
        &self,
        api_id: &str,
        version_id: &str,
        spec: SpecUpload<'_>,
    ) -> apimsync_platforms::Result<CreateOutcome> {
        Ok(self.record(format!(
            "spec:{}/{}/{} ({} bytes)",
            api_id,
            version_id,
            spec.spec_id,
            spec.contents.len()
        )))
    }
}
