//! Runs the pipeline stages for a source and destination platform

use crate::report::{Stage, StageReport};
use crate::{exporter, importer, offramp, onramp};
use apimsync_core::config::ApimSyncConfig;
use apimsync_core::types::{DestinationPlatform, SourcePlatform, SyncRequest, SyncResponse};
use apimsync_core::Stager;
use apimsync_platforms::{CatalogClient, PlatformClient};
use apimsync_secrets::{TokenProvider, TokenResolver};
use std::sync::Arc;
use tracing::info;

/// Entry point for every pipeline operation.
///
/// Holds the configuration captured at the boundary; each call builds its
/// own clients and stager.
#[derive(Clone)]
pub struct Orchestrator {
    config: Arc<ApimSyncConfig>,
    http: reqwest::Client,
}

impl Orchestrator {
    pub fn new(config: impl Into<Arc<ApimSyncConfig>>) -> Self {
        Self {
            config: config.into(),
            http: apimsync_platforms::default_client(),
        }
    }

    /// Use a specific HTTP client for platform and token calls
    pub fn with_http(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn config(&self) -> &ApimSyncConfig {
        &self.config
    }

    pub fn stager(&self) -> Stager {
        Stager::new(self.config.staging_dir())
    }

    pub(crate) fn source_tokens(&self, platform: SourcePlatform) -> TokenResolver {
        match platform {
            SourcePlatform::Azure => TokenResolver::for_azure(self.config.azure(), self.http.clone()),
        }
    }

    pub(crate) fn destination_tokens(&self, platform: DestinationPlatform) -> TokenResolver {
        match platform {
            DestinationPlatform::Apihub => TokenResolver::for_apihub(self.config.apihub()),
        }
    }

    /// Check prerequisites, acquire a token and build the source client
    pub async fn connect_source(
        &self,
        platform: SourcePlatform,
    ) -> apimsync_platforms::Result<Box<dyn PlatformClient>> {
        apimsync_platforms::source_descriptor(platform, &self.config)?;
        let token = self.source_tokens(platform).acquire().await?;
        apimsync_platforms::create_source(platform, &self.config, token.value, self.http.clone())
    }

    /// Check prerequisites, acquire a token and build the destination client
    pub async fn connect_catalog(
        &self,
        platform: DestinationPlatform,
    ) -> apimsync_platforms::Result<Box<dyn CatalogClient>> {
        match platform {
            DestinationPlatform::Apihub => {
                self.config.apihub().identifiers()?;
            }
        }
        let token = self.destination_tokens(platform).acquire().await?;
        apimsync_platforms::create_catalog(platform, &self.config, token.value, self.http.clone())
    }

    /// Export service metadata, then the APIs of a source platform
    pub async fn export(
        &self,
        platform: SourcePlatform,
        filter: Option<&str>,
        only_new: bool,
    ) -> Vec<StageReport> {
        let client = match self.connect_source(platform).await {
            Ok(client) => client,
            Err(e) => return vec![StageReport::aborted(Stage::Export, platform.tag(), e)],
        };

        let stager = self.stager();
        vec![
            exporter::export_service(client.as_ref(), &stager).await,
            exporter::export(client.as_ref(), &stager, filter, only_new).await,
        ]
    }

    /// Canonicalize what is staged for a source platform; works offline
    pub fn offramp(&self, platform: SourcePlatform, group_filter: Option<&str>) -> StageReport {
        match apimsync_platforms::source_descriptor(platform, &self.config) {
            Ok(descriptor) => offramp::offramp(
                &self.stager(),
                descriptor.as_ref(),
                self.source_service_name(platform),
                group_filter,
            ),
            Err(e) => StageReport::aborted(Stage::Offramp, platform.tag(), e),
        }
    }

    fn source_service_name(&self, platform: SourcePlatform) -> &str {
        match platform {
            SourcePlatform::Azure => self.config.azure().service_name.as_deref().unwrap_or_default(),
        }
    }

    /// Stage canonical APIs for a destination platform; works offline
    pub fn onramp(&self, platform: DestinationPlatform, group_filter: Option<&str>) -> StageReport {
        onramp::onramp(&self.stager(), platform.tag(), group_filter)
    }

    /// Import onramped APIs into a destination platform
    pub async fn import(&self, platform: DestinationPlatform) -> StageReport {
        match self.connect_catalog(platform).await {
            Ok(client) => importer::import(client.as_ref(), &self.stager()).await,
            Err(e) => StageReport::aborted(Stage::Import, platform.tag(), e),
        }
    }

    /// Remove the export area of a source platform
    pub fn clean(&self, platform: SourcePlatform) -> apimsync_core::Result<bool> {
        exporter::clean(&self.stager(), platform.tag())
    }

    /// Run every stage of a sync and return the per-stage reports
    pub async fn run_sync(&self, request: &SyncRequest) -> Vec<StageReport> {
        info!("Syncing from {} to {}", request.offramp, request.onramp);
        let mut reports = self.export(request.offramp, None, request.only_new).await;

        // Missing identifiers were already reported by the export stage
        if apimsync_platforms::source_descriptor(request.offramp, &self.config).is_ok() {
            reports.push(self.offramp(request.offramp, None));
        }

        reports.push(self.onramp(request.onramp, None));
        reports.push(self.import(request.onramp).await);
        reports
    }

    /// Run a sync and summarize it
    pub async fn sync(&self, request: &SyncRequest) -> SyncResponse {
        let reports = self.run_sync(request).await;
        sync_response(request, &reports)
    }
}

/// Summarize stage reports into the response of a sync
pub fn sync_response(request: &SyncRequest, reports: &[StageReport]) -> SyncResponse {
    let problems: Vec<String> = reports.iter().flat_map(StageReport::problems).collect();
    if problems.is_empty() {
        SyncResponse {
            result: true,
            message: format!("Sync from {} to {} successful!", request.offramp, request.onramp),
        }
    } else {
        SyncResponse {
            result: false,
            message: format!(
                "Sync from {} to {} finished with problems: {}",
                request.offramp,
                request.onramp,
                problems.join("; ")
            ),
        }
    }
}
