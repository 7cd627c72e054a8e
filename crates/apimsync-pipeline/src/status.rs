//! Connectivity check for every supported platform

use crate::orchestrator::Orchestrator;
use apimsync_core::types::{DestinationPlatform, PlatformStatus, SourcePlatform, StatusReport};
use tracing::debug;

impl Orchestrator {
    /// Status of every platform
    pub async fn status(&self) -> StatusReport {
        StatusReport {
            azure: self.source_status(SourcePlatform::Azure).await,
            apihub: self.destination_status(DestinationPlatform::Apihub).await,
        }
    }

    /// Connect to a source platform and count its APIs
    pub async fn source_status(&self, platform: SourcePlatform) -> PlatformStatus {
        let client = match self.connect_source(platform).await {
            Ok(client) => client,
            Err(e) => return PlatformStatus::disconnected(e.to_string()),
        };

        match client.list_apis().await {
            Ok(apis) => PlatformStatus::connected(format!(
                "Connected to {}, {} APIs found in service {}.",
                short_name(platform),
                apis.len(),
                client.service_name()
            )),
            Err(e) => {
                debug!("{} status check failed: {:?}", platform, e);
                PlatformStatus::disconnected(e.to_string())
            }
        }
    }

    /// Connect to a destination catalog and count its APIs
    pub async fn destination_status(&self, platform: DestinationPlatform) -> PlatformStatus {
        let client = match self.connect_catalog(platform).await {
            Ok(client) => client,
            Err(e) => return PlatformStatus::disconnected(e.to_string()),
        };

        match client.list_apis().await {
            Ok(apis) => PlatformStatus::connected(format!(
                "Connected to {}, {} APIs found in {}.",
                client.platform_name(),
                apis.len(),
                client.scope()
            )),
            Err(e) => {
                debug!("{} status check failed: {:?}", platform, e);
                PlatformStatus::disconnected(e.to_string())
            }
        }
    }
}

fn short_name(platform: SourcePlatform) -> &'static str {
    match platform {
        SourcePlatform::Azure => "Azure",
    }
}
