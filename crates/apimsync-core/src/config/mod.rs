//! Configuration loading and management

mod loader;

pub use loader::{
    ApiHubConfig, ApiHubIdentifiers, ApimSyncConfig, ApimSyncConfigFile, AzureConfig,
    AzureCredentials, AzureIdentifiers, ConfigOverrides, DEFAULT_APIHUB_ENDPOINT,
    DEFAULT_AZURE_LOGIN_ENDPOINT, DEFAULT_AZURE_MANAGEMENT_ENDPOINT, DEFAULT_STAGING_DIR,
};
