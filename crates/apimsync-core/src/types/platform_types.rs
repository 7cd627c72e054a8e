//! Platform-native types as returned by a source platform's management API
//!
//! These mirror the Azure Resource Manager shape that API Management uses.
//! Unknown properties are kept in `extra` so a staged file round-trips
//! without losing fields this crate does not model.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// List envelope returned by `GET …/apis`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformApiList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: Vec<PlatformApi>,

    /// Continuation link for paged results
    #[serde(rename = "nextLink", default, skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,
}

/// Platform-native API descriptor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformApi {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,

    /// Raw API name; rewritten to the version-qualified name before staging
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: PlatformApiProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformApiProperties {
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub api_revision: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub subscription_required: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub service_url: String,

    /// Base path the gateway exposes the API under
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub protocols: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub authentication_settings: AuthenticationSettings,

    #[serde(default, deserialize_with = "null_as_default")]
    pub subscription_key_parameter_names: SubscriptionKeyParameterNames,

    #[serde(default, deserialize_with = "null_as_default")]
    pub is_current: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub api_revision_description: String,

    /// Version tag, may be empty
    #[serde(default, deserialize_with = "null_as_default")]
    pub api_version: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationSettings {
    #[serde(rename = "oAuth2", default, skip_serializing_if = "Option::is_none")]
    pub oauth2: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_id: Option<Value>,

    #[serde(
        rename = "oAuth2AuthenticationSettings",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub oauth2_authentication_settings: Vec<Value>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub open_id_authentication_settings: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionKeyParameterNames {
    #[serde(default, deserialize_with = "null_as_default")]
    pub header: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub query: String,
}

/// OpenAPI/WSDL document attached to an API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: SchemaProperties,
}

impl SchemaDocument {
    /// A schema counts as present only when it carries an identifier
    pub fn is_present(&self) -> bool {
        !self.id.is_empty()
    }

    /// File extension used for the staged document body.
    ///
    /// Content types map to `wsdl`, `xml` or `yaml`; a plain alphanumeric
    /// schema type is used as is; anything else is JSON.
    pub fn extension(&self) -> &str {
        let schema_type = self.properties.schema_type.as_str();
        let lower = schema_type.to_ascii_lowercase();
        if lower.contains("wsdl") {
            "wsdl"
        } else if lower.ends_with("xml") {
            "xml"
        } else if lower.contains("yaml") {
            "yaml"
        } else if !schema_type.is_empty()
            && schema_type.chars().all(|c| c.is_ascii_alphanumeric())
        {
            schema_type
        } else {
            "json"
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaProperties {
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub schema_type: String,

    /// Raw document text
    #[serde(default, deserialize_with = "document_text")]
    pub document: String,
}

/// Read an explicit `null` the same way as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept a document delivered either as a string or as embedded JSON
fn document_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => serde_json::to_string_pretty(&other).map_err(serde::de::Error::custom)?,
    })
}

/// Platform account/tenant metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformService {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: PlatformServiceProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformServiceProperties {
    #[serde(default, deserialize_with = "null_as_default")]
    pub developer_portal_url: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub gateway_url: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub gateway_regional_url: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub portal_url: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub publisher_email: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub publisher_name: String,
}
