//! Offramp: platform-native staged APIs into the canonical form

use crate::report::{Stage, StageReport};
use apimsync_core::staging::{api_file_stem, is_api_file};
use apimsync_core::types::{CanonicalApi, PlatformApi, PlatformService};
use apimsync_core::Stager;
use apimsync_platforms::PlatformDescriptor;
use tracing::{debug, info, warn};

/// Map one staged platform API into its canonical record
pub fn to_canonical(
    api: &PlatformApi,
    service: &PlatformService,
    descriptor: &dyn PlatformDescriptor,
) -> CanonicalApi {
    let props = &api.properties;
    CanonicalApi {
        name: format!("{}-{}", api.name, descriptor.tag()),
        display_name: props.display_name.clone(),
        description: props.description.clone(),
        version: props.api_version.clone(),
        owner_email: service.properties.publisher_email.clone(),
        owner_name: service.properties.publisher_name.clone(),
        documentation_url: descriptor.documentation_url(service, &api.name),
        gateway_url: descriptor.gateway_url(service, &props.path),
        base_path: props.path.clone(),
        platform_id: descriptor.platform_id().to_string(),
        platform_name: descriptor.platform_name().to_string(),
        platform_resource_uri: descriptor.resource_uri(&api.name),
    }
}

/// Canonicalize every staged API of one platform.
///
/// `group_filter` restricts the run to a single group directory.
pub fn offramp(
    stager: &Stager,
    descriptor: &dyn PlatformDescriptor,
    service_name: &str,
    group_filter: Option<&str>,
) -> StageReport {
    let tag = descriptor.tag();
    let mut report = StageReport::new(Stage::Offramp, tag);

    let export_dir = stager.export_dir(tag);
    let groups = match stager.list_groups(&export_dir) {
        Ok(groups) => groups,
        Err(e) => return StageReport::aborted(Stage::Offramp, tag, e),
    };
    if groups.is_empty() {
        info!("Nothing exported under {}", export_dir);
        return report;
    }

    let service = load_service(stager, tag, service_name);
    info!("Offramping {} APIs to canonical", descriptor.platform_name());

    let group_filter = group_filter.filter(|g| !g.is_empty());
    for group in groups {
        if group_filter.is_some_and(|g| g != group) {
            continue;
        }
        offramp_group(stager, descriptor, &service, &group, &mut report);
    }

    report
}

fn load_service(stager: &Stager, tag: &str, service_name: &str) -> PlatformService {
    let path = stager.service_path(tag, service_name);
    match stager.read_json_opt::<PlatformService>(&path) {
        Ok(Some(service)) => service,
        Ok(None) => {
            debug!("No service metadata at {}", path);
            PlatformService::default()
        }
        Err(e) => {
            warn!("Ignoring service metadata: {}", e);
            PlatformService::default()
        }
    }
}

fn offramp_group(
    stager: &Stager,
    descriptor: &dyn PlatformDescriptor,
    service: &PlatformService,
    group: &str,
    report: &mut StageReport,
) {
    let tag = descriptor.tag();
    let group_dir = stager.export_group_dir(tag, group);
    let files = match stager.list_files(&group_dir) {
        Ok(files) => files,
        Err(e) => {
            report.record_failure(group, e);
            return;
        }
    };

    debug!("Offramping group {}", group);
    for file in files.iter().filter(|f| is_api_file(f)) {
        let api: PlatformApi = match stager.read_json(&group_dir.join(file)) {
            Ok(api) => api,
            Err(e) => {
                report.record_failure(api_file_stem(file), e);
                continue;
            }
        };
        if api.name.is_empty() {
            debug!("Skipping {} without a name", file);
            continue;
        }

        let canonical = to_canonical(&api, service, descriptor);
        if let Err(e) = write_canonical(stager, tag, group, &api.name, &canonical) {
            report.record_failure(&canonical.name, e);
            continue;
        }
        report.processed.push(canonical.name);
    }
}

fn write_canonical(
    stager: &Stager,
    tag: &str,
    group: &str,
    api_name: &str,
    canonical: &CanonicalApi,
) -> apimsync_core::Result<()> {
    stager.write_json(&stager.canonical_api_path(group, &canonical.name), canonical)?;

    if let Some(schema) = stager.find_export_schema_body(tag, group, api_name)? {
        stager.copy(&schema, &stager.canonical_schema_path(group, &canonical.name))?;
    }
    Ok(())
}
