//! Export of platform-native API descriptors into the staging area

use crate::report::{Stage, StageReport};
use apimsync_core::naming;
use apimsync_core::types::{PlatformApi, SchemaDocument};
use apimsync_core::Stager;
use apimsync_platforms::PlatformClient;
use tracing::{debug, info};

/// Export every non-revision API of `client` that passes `filter`.
///
/// An empty or absent filter selects all APIs; otherwise the raw API name
/// must match exactly. With `only_new`, APIs whose staged file already
/// exists are skipped without fetching their schema.
pub async fn export(
    client: &dyn PlatformClient,
    stager: &Stager,
    filter: Option<&str>,
    only_new: bool,
) -> StageReport {
    let tag = client.descriptor().tag().to_string();
    let mut report = StageReport::new(Stage::Export, &tag);

    info!("Exporting APIs for service {}", client.service_name());
    let apis = match client.list_apis().await {
        Ok(apis) => apis,
        Err(e) => return StageReport::aborted(Stage::Export, tag, e),
    };

    let filter = filter.filter(|f| !f.is_empty());
    for mut api in apis {
        if naming::is_revision(&api.name) {
            debug!("Skipping revision {}", api.name);
            continue;
        }
        if filter.is_some_and(|f| f != api.name) {
            continue;
        }

        let normalized = naming::normalize(
            &api.name,
            &api.properties.display_name,
            &api.properties.api_version,
        );
        api.name = normalized.name;
        api.properties.display_name = normalized.display_name;
        let group = normalized.group_key;

        let path = stager.export_api_path(&tag, &group, &api.name);
        if only_new && stager.exists(&path) {
            debug!("{} already staged, skipping", api.name);
            report.skipped.push(api.name);
            continue;
        }

        info!("Exporting {}", api.name);
        if let Err(e) = stager.write_json(&path, &api) {
            report.record_failure(&api.name, e);
            continue;
        }

        if let Err(e) = export_schema(client, stager, &tag, &group, &api).await {
            report.record_failure(&api.name, e);
            continue;
        }

        report.processed.push(api.name);
    }

    report
}

async fn export_schema(
    client: &dyn PlatformClient,
    stager: &Stager,
    tag: &str,
    group: &str,
    api: &PlatformApi,
) -> apimsync_core::Result<()> {
    let schema: SchemaDocument = match client.get_schema(&api.name).await {
        Ok(Some(schema)) if schema.is_present() => schema,
        Ok(_) => {
            debug!("No schema for {}", api.name);
            return Ok(());
        }
        Err(e) => {
            debug!("No schema for {}: {}", api.name, e);
            return Ok(());
        }
    };

    stager.write_json(
        &stager.export_schema_definition_path(tag, group, &api.name),
        &schema,
    )?;
    stager.write_bytes(
        &stager.export_schema_body_path(tag, group, &api.name, schema.extension()),
        schema.properties.document.as_bytes(),
    )
}

/// Stage the platform's service metadata next to its API groups
pub async fn export_service(client: &dyn PlatformClient, stager: &Stager) -> StageReport {
    let tag = client.descriptor().tag().to_string();
    let service_name = client.service_name().to_string();
    let mut report = StageReport::new(Stage::ServiceExport, &tag);

    info!("Exporting service {}", service_name);
    match client.get_service_metadata().await {
        Ok(Some(service)) => {
            let path = stager.service_path(&tag, &service_name);
            match stager.write_json(&path, &service) {
                Ok(()) => report.processed.push(service_name),
                Err(e) => report.record_failure(service_name, e),
            }
        }
        Ok(None) => debug!("No service metadata for {}", service_name),
        Err(e) => report.problem = Some(e.to_string()),
    }

    report
}

/// Remove a platform's export area
pub fn clean(stager: &Stager, platform: &str) -> apimsync_core::Result<bool> {
    let removed = stager.clean_export(platform)?;
    if removed {
        info!("Removed {}", stager.export_dir(platform));
    } else {
        debug!("Nothing to clean for {}", platform);
    }
    Ok(removed)
}
