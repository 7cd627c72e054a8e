//! Platform-agnostic and destination-native API records

use serde::{Deserialize, Serialize};

/// Canonical API entry produced by offramping one platform API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanonicalApi {
    /// Version-qualified name with a `-<platform tag>` suffix
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub version: String,
    pub owner_email: String,
    pub owner_name: String,
    pub documentation_url: String,
    pub gateway_url: String,
    pub base_path: String,
    pub platform_id: String,
    pub platform_name: String,
    /// Deep link back to the source platform's console
    pub platform_resource_uri: String,
}

/// Destination-native record staged by onramping one canonical API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnrampApi {
    pub api_id: String,
    pub api: CatalogApi,
    pub version_id: String,
    pub version: CatalogVersion,
    pub source: SourceLink,
}

/// API resource body sent to the destination catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogApi {
    pub display_name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<CatalogOwner>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<CatalogDocumentation>,
}

/// Version resource body sent to the destination catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogVersion {
    pub display_name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<CatalogDocumentation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogOwner {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocumentation {
    pub external_uri: String,
}

/// Where an onramped API originally came from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLink {
    pub platform_id: String,
    pub platform_name: String,
    pub resource_uri: String,
    pub gateway_url: String,
    pub base_path: String,
}
