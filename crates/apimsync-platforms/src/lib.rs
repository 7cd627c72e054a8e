//! Platform adapters for apimsync
//!
//! This crate provides the abstraction over the API-management platforms
//! APIs are migrated between:
//!
//! - Azure API Management (source, `PlatformClient`)
//! - Apigee API Hub (destination, `CatalogClient`)
//!
//! Link templates live behind `PlatformDescriptor` so they can be used
//! without credentials.

pub mod apihub;
pub mod azure;
pub mod error;
mod http;
pub mod traits;

pub use error::{PlatformError, Result};
pub use http::default_client;
pub use traits::{CatalogClient, CreateOutcome, PlatformClient, PlatformDescriptor, SpecUpload};

use apimsync_core::config::ApimSyncConfig;
use apimsync_core::types::{DestinationPlatform, SourcePlatform};
use apimsync_secrets::SecureString;

/// Link templates of a source platform
pub fn source_descriptor(
    platform: SourcePlatform,
    config: &ApimSyncConfig,
) -> apimsync_core::Result<Box<dyn PlatformDescriptor>> {
    match platform {
        SourcePlatform::Azure => Ok(Box::new(azure::AzureDescriptor::from_config(
            config.azure(),
        )?)),
    }
}

/// Create a source platform client
pub fn create_source(
    platform: SourcePlatform,
    config: &ApimSyncConfig,
    token: SecureString,
    http: reqwest::Client,
) -> Result<Box<dyn PlatformClient>> {
    match platform {
        SourcePlatform::Azure => Ok(Box::new(azure::AzureClient::new(
            config.azure(),
            token,
            http,
        )?)),
    }
}

/// Create a destination catalog client
pub fn create_catalog(
    platform: DestinationPlatform,
    config: &ApimSyncConfig,
    token: SecureString,
    http: reqwest::Client,
) -> Result<Box<dyn CatalogClient>> {
    match platform {
        DestinationPlatform::Apihub => Ok(Box::new(apihub::ApiHubClient::new(
            config.apihub(),
            token,
            http,
        )?)),
    }
}
