//! Import of onramped APIs into a destination catalog

use crate::report::{Stage, StageReport};
use apimsync_core::staging::is_api_file;
use apimsync_core::types::OnrampApi;
use apimsync_core::Stager;
use apimsync_platforms::{CatalogClient, CreateOutcome, SpecUpload};
use tracing::{debug, info};

/// Create every API staged for `client`'s platform, with its version and spec.
///
/// Resources that already exist are left as they are, so an import can be
/// re-run after a partial failure.
pub async fn import(client: &dyn CatalogClient, stager: &Stager) -> StageReport {
    let tag = client.tag().to_string();
    let mut report = StageReport::new(Stage::Import, &tag);

    let onramp_dir = stager.onramp_dir(&tag);
    let groups = match stager.list_groups(&onramp_dir) {
        Ok(groups) => groups,
        Err(e) => return StageReport::aborted(Stage::Import, tag, e),
    };

    info!("Importing APIs into {} {}", client.platform_name(), client.scope());
    for group in groups {
        let group_dir = stager.onramp_group_dir(&tag, &group);
        let files = match stager.list_files(&group_dir) {
            Ok(files) => files,
            Err(e) => {
                report.record_failure(&group, e);
                continue;
            }
        };

        for file in files.iter().filter(|f| is_api_file(f)) {
            let staged: OnrampApi = match stager.read_json(&group_dir.join(file)) {
                Ok(staged) => staged,
                Err(e) => {
                    report.record_failure(file, e);
                    continue;
                }
            };

            let spec_path = stager.onramp_schema_path(&tag, &group, &staged.api_id);
            let spec = if stager.exists(&spec_path) {
                match stager.read_bytes(&spec_path) {
                    Ok(bytes) => Some(bytes),
                    Err(e) => {
                        report.record_failure(&staged.api_id, e);
                        continue;
                    }
                }
            } else {
                None
            };

            match import_api(client, &staged, spec.as_deref()).await {
                Ok(()) => report.processed.push(staged.api_id),
                Err(e) => report.record_failure(&staged.api_id, e),
            }
        }
    }

    report
}

async fn import_api(
    client: &dyn CatalogClient,
    staged: &OnrampApi,
    spec: Option<&[u8]>,
) -> apimsync_platforms::Result<()> {
    info!("Importing {}", staged.api_id);

    let outcome = client.create_api(&staged.api_id, &staged.api).await?;
    log_outcome("API", &staged.api_id, outcome);

    let outcome = client
        .create_version(&staged.api_id, &staged.version_id, &staged.version)
        .await?;
    log_outcome("Version", &staged.version_id, outcome);

    if let Some(contents) = spec {
        let spec_id = format!("{}-oas", staged.api_id);
        let outcome = client
            .create_spec(
                &staged.api_id,
                &staged.version_id,
                SpecUpload {
                    spec_id: &spec_id,
                    display_name: &staged.api.display_name,
                    contents,
                },
            )
            .await?;
        log_outcome("Spec", &spec_id, outcome);
    }

    Ok(())
}

fn log_outcome(kind: &str, id: &str, outcome: CreateOutcome) {
    match outcome {
        CreateOutcome::Created => debug!("{} {} created", kind, id),
        CreateOutcome::AlreadyExists => debug!("{} {} already exists", kind, id),
    }
}
