//! Configuration file loading and parsing

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fs;

/// Configuration file names to search for
const CONFIG_FILE_NAMES: &[&str] = &["apimsync.yaml", "apimsync.yml"];

/// Default staging root, relative to the working directory
pub const DEFAULT_STAGING_DIR: &str = "src/main";

/// Default Azure Resource Manager endpoint
pub const DEFAULT_AZURE_MANAGEMENT_ENDPOINT: &str = "https://management.azure.com";

/// Default Azure AD token endpoint
pub const DEFAULT_AZURE_LOGIN_ENDPOINT: &str = "https://login.microsoftonline.com";

/// Default Apigee API Hub endpoint
pub const DEFAULT_APIHUB_ENDPOINT: &str = "https://apihub.googleapis.com";

/// Root apimsync.yaml configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApimSyncConfigFile {
    /// Root of the staging area
    #[serde(default = "default_staging_dir")]
    pub staging_dir: Utf8PathBuf,

    #[serde(default)]
    pub azure: AzureConfig,

    #[serde(default)]
    pub apihub: ApiHubConfig,
}

impl Default for ApimSyncConfigFile {
    fn default() -> Self {
        Self {
            staging_dir: default_staging_dir(),
            azure: AzureConfig::default(),
            apihub: ApiHubConfig::default(),
        }
    }
}

fn default_staging_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_STAGING_DIR)
}

fn default_azure_management_endpoint() -> String {
    DEFAULT_AZURE_MANAGEMENT_ENDPOINT.to_string()
}

fn default_azure_login_endpoint() -> String {
    DEFAULT_AZURE_LOGIN_ENDPOINT.to_string()
}

fn default_apihub_endpoint() -> String {
    DEFAULT_APIHUB_ENDPOINT.to_string()
}

/// Azure API Management source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureConfig {
    #[serde(default)]
    pub subscription: Option<String>,

    #[serde(default)]
    pub resource_group: Option<String>,

    #[serde(default)]
    pub service_name: Option<String>,

    #[serde(default = "default_azure_management_endpoint")]
    pub management_endpoint: String,

    #[serde(default = "default_azure_login_endpoint")]
    pub login_endpoint: String,

    /// Only ever populated at the CLI/request boundary
    #[serde(skip)]
    pub credentials: AzureCredentials,
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            subscription: None,
            resource_group: None,
            service_name: None,
            management_endpoint: default_azure_management_endpoint(),
            login_endpoint: default_azure_login_endpoint(),
            credentials: AzureCredentials::default(),
        }
    }
}

/// Azure identifiers that every management call needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AzureIdentifiers {
    pub subscription: String,
    pub resource_group: String,
    pub service_name: String,
}

impl AzureConfig {
    pub const PLATFORM: &'static str = "Azure API Management";

    /// Return the identifiers, or name the first missing one
    pub fn identifiers(&self) -> Result<AzureIdentifiers> {
        let subscription = required(&self.subscription, Self::PLATFORM, "subscription")?;
        let resource_group = required(&self.resource_group, Self::PLATFORM, "resource group")?;
        let service_name = required(&self.service_name, Self::PLATFORM, "service name")?;

        Ok(AzureIdentifiers {
            subscription,
            resource_group,
            service_name,
        })
    }
}

/// Credentials used to obtain an Azure management token
#[derive(Clone, Default)]
pub struct AzureCredentials {
    /// Token supplied directly on the command line or in a request
    pub token: Option<String>,
    /// Token sourced from the environment at the boundary
    pub env_token: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub tenant_id: Option<String>,
}

impl AzureCredentials {
    /// Whether a client-credentials exchange can be attempted
    pub fn has_client_credentials(&self) -> bool {
        [&self.client_id, &self.client_secret, &self.tenant_id]
            .iter()
            .all(|v| v.as_deref().is_some_and(|s| !s.is_empty()))
    }
}

impl std::fmt::Debug for AzureCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureCredentials")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("env_token", &self.env_token.as_ref().map(|_| "[REDACTED]"))
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "[REDACTED]"))
            .field("tenant_id", &self.tenant_id)
            .finish()
    }
}

/// Apigee API Hub destination configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHubConfig {
    #[serde(default)]
    pub project: Option<String>,

    #[serde(default)]
    pub region: Option<String>,

    #[serde(default = "default_apihub_endpoint")]
    pub endpoint: String,

    /// Only ever populated at the CLI/request boundary
    #[serde(skip)]
    pub token: Option<String>,
}

impl Default for ApiHubConfig {
    fn default() -> Self {
        Self {
            project: None,
            region: None,
            endpoint: default_apihub_endpoint(),
            token: None,
        }
    }
}

impl std::fmt::Debug for ApiHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiHubConfig")
            .field("project", &self.project)
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// API Hub identifiers that every catalog call needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiHubIdentifiers {
    pub project: String,
    pub region: String,
}

impl ApiHubConfig {
    pub const PLATFORM: &'static str = "Apigee API Hub";

    /// Return the identifiers, or name the first missing one
    pub fn identifiers(&self) -> Result<ApiHubIdentifiers> {
        Ok(ApiHubIdentifiers {
            project: required(&self.project, Self::PLATFORM, "project")?,
            region: required(&self.region, Self::PLATFORM, "region")?,
        })
    }
}

fn required(value: &Option<String>, platform: &str, field: &str) -> Result<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(Error::configuration_missing(platform, field)),
    }
}

/// Values collected at the boundary that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub staging_dir: Option<Utf8PathBuf>,
    pub azure_subscription: Option<String>,
    pub azure_resource_group: Option<String>,
    pub azure_service_name: Option<String>,
    pub azure_credentials: AzureCredentials,
    pub apihub_project: Option<String>,
    pub apihub_region: Option<String>,
    pub apihub_token: Option<String>,
}

/// Loaded apimsync configuration
#[derive(Debug, Clone, Default)]
pub struct ApimSyncConfig {
    /// The parsed configuration
    pub config: ApimSyncConfigFile,

    /// Path to the configuration file, when one was found
    pub config_path: Option<Utf8PathBuf>,
}

impl ApimSyncConfig {
    /// Load configuration from the specified path or search for it.
    ///
    /// An explicit path must exist. Without one, the current and parent
    /// directories are searched and defaults are used if nothing is found.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        let found = match path {
            Some(p) => {
                let content = fs::read_to_string(p).map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        Error::config_not_found(p.as_str())
                    } else {
                        Error::Io(e)
                    }
                })?;
                Some((p.to_owned(), content))
            }
            None => Self::find_config()?,
        };

        match found {
            Some((config_path, content)) => {
                tracing::debug!("Loading configuration from {}", config_path);
                Ok(Self {
                    config: Self::parse(&content)?,
                    config_path: Some(config_path),
                })
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration YAML
    pub fn parse(content: &str) -> Result<ApimSyncConfigFile> {
        if content.trim().is_empty() {
            return Ok(ApimSyncConfigFile::default());
        }
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Find configuration file in current directory or parent directories
    fn find_config() -> Result<Option<(Utf8PathBuf, String)>> {
        let cwd = std::env::current_dir().map_err(Error::Io)?;
        let cwd = Utf8PathBuf::try_from(cwd)
            .map_err(|_| Error::invalid_config("Current directory path is not valid UTF-8"))?;

        let mut current = cwd.as_path();

        loop {
            for name in CONFIG_FILE_NAMES {
                let path = current.join(name);
                if path.exists() {
                    let content = fs::read_to_string(&path)?;
                    return Ok(Some((path, content)));
                }
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => return Ok(None),
            }
        }
    }

    /// Apply boundary overrides on top of the file values
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        let file = &mut self.config;

        if let Some(dir) = overrides.staging_dir {
            file.staging_dir = dir;
        }
        override_with(&mut file.azure.subscription, overrides.azure_subscription);
        override_with(&mut file.azure.resource_group, overrides.azure_resource_group);
        override_with(&mut file.azure.service_name, overrides.azure_service_name);
        file.azure.credentials = overrides.azure_credentials;
        override_with(&mut file.apihub.project, overrides.apihub_project);
        override_with(&mut file.apihub.region, overrides.apihub_region);
        override_with(&mut file.apihub.token, overrides.apihub_token);

        self
    }

    /// Get the inner configuration file
    pub fn inner(&self) -> &ApimSyncConfigFile {
        &self.config
    }

    /// Root of the staging area
    pub fn staging_dir(&self) -> &Utf8Path {
        &self.config.staging_dir
    }

    /// Azure source configuration
    pub fn azure(&self) -> &AzureConfig {
        &self.config.azure
    }

    /// API Hub destination configuration
    pub fn apihub(&self) -> &ApiHubConfig {
        &self.config.apihub
    }

    /// Render the configuration as YAML (credentials are never serialized)
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(&self.config)?)
    }
}

fn override_with(target: &mut Option<String>, value: Option<String>) {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        *target = Some(v);
    }
}
