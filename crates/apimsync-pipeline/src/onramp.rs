//! Onramp: canonical APIs into a destination catalog's native records

use crate::report::{Stage, StageReport};
use apimsync_core::staging::{api_file_stem, is_api_file};
use apimsync_core::types::{
    CanonicalApi, CatalogApi, CatalogDocumentation, CatalogOwner, CatalogVersion, OnrampApi,
    SourceLink,
};
use apimsync_core::Stager;
use tracing::{debug, info};

/// Version id used when an API carries no version tag
pub const DEFAULT_VERSION_ID: &str = "default";

/// Reduce a name to a catalog resource id: lowercase `[a-z0-9-]`,
/// no leading, trailing or repeated dashes
pub fn resource_id(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    for c in name.chars().map(|c| c.to_ascii_lowercase()) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            id.push(c);
        } else if !id.is_empty() && !id.ends_with('-') {
            id.push('-');
        }
    }
    while id.ends_with('-') {
        id.pop();
    }
    id
}

/// Map one canonical record into the destination's native shape
pub fn to_onramp(canonical: &CanonicalApi) -> OnrampApi {
    let documentation = (!canonical.documentation_url.is_empty()).then(|| CatalogDocumentation {
        external_uri: canonical.documentation_url.clone(),
    });
    let owner = (!canonical.owner_name.is_empty() || !canonical.owner_email.is_empty()).then(|| {
        CatalogOwner {
            display_name: canonical.owner_name.clone(),
            email: canonical.owner_email.clone(),
        }
    });

    let version_id = match resource_id(&canonical.version) {
        id if id.is_empty() => DEFAULT_VERSION_ID.to_string(),
        id => id,
    };
    let display_name = if canonical.display_name.is_empty() {
        canonical.name.clone()
    } else {
        canonical.display_name.clone()
    };
    let version_name = if canonical.version.is_empty() {
        DEFAULT_VERSION_ID.to_string()
    } else {
        canonical.version.clone()
    };

    OnrampApi {
        api_id: resource_id(&canonical.name),
        api: CatalogApi {
            display_name,
            description: canonical.description.clone(),
            owner,
            documentation: documentation.clone(),
        },
        version_id,
        version: CatalogVersion {
            display_name: version_name,
            description: canonical.description.clone(),
            documentation,
        },
        source: SourceLink {
            platform_id: canonical.platform_id.clone(),
            platform_name: canonical.platform_name.clone(),
            resource_uri: canonical.platform_resource_uri.clone(),
            gateway_url: canonical.gateway_url.clone(),
            base_path: canonical.base_path.clone(),
        },
    }
}

/// Stage every canonical API for `destination`.
///
/// `group_filter` restricts the run to a single group directory.
pub fn onramp(stager: &Stager, destination: &str, group_filter: Option<&str>) -> StageReport {
    let mut report = StageReport::new(Stage::Onramp, destination);

    let canonical_dir = stager.canonical_dir();
    let groups = match stager.list_groups(&canonical_dir) {
        Ok(groups) => groups,
        Err(e) => return StageReport::aborted(Stage::Onramp, destination, e),
    };

    info!("Onramping canonical APIs to {}", destination);
    let group_filter = group_filter.filter(|g| !g.is_empty());
    for group in groups {
        if group_filter.is_some_and(|g| g != group) {
            continue;
        }
        onramp_group(stager, destination, &group, &mut report);
    }

    report
}

fn onramp_group(stager: &Stager, destination: &str, group: &str, report: &mut StageReport) {
    let group_dir = stager.canonical_group_dir(group);
    let files = match stager.list_files(&group_dir) {
        Ok(files) => files,
        Err(e) => {
            report.record_failure(group, e);
            return;
        }
    };

    for file in files.iter().filter(|f| is_api_file(f)) {
        let canonical: CanonicalApi = match stager.read_json(&group_dir.join(file)) {
            Ok(canonical) => canonical,
            Err(e) => {
                report.record_failure(api_file_stem(file), e);
                continue;
            }
        };
        if canonical.name.is_empty() {
            debug!("Skipping {} without a name", file);
            continue;
        }

        let staged = to_onramp(&canonical);
        if let Err(e) = write_onramp(stager, destination, group, &canonical.name, &staged) {
            report.record_failure(&staged.api_id, e);
            continue;
        }
        report.processed.push(staged.api_id);
    }
}

fn write_onramp(
    stager: &Stager,
    destination: &str,
    group: &str,
    canonical_name: &str,
    staged: &OnrampApi,
) -> apimsync_core::Result<()> {
    stager.write_json(
        &stager.onramp_api_path(destination, group, &staged.api_id),
        staged,
    )?;

    let schema = stager.canonical_schema_path(group, canonical_name);
    if stager.exists(&schema) {
        stager.copy(
            &schema,
            &stager.onramp_schema_path(destination, group, &staged.api_id),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_id() {
        assert_eq!(resource_id("orders-v2-azure"), "orders-v2-azure");
        assert_eq!(resource_id("Orders_API  v2"), "orders-api-v2");
        assert_eq!(resource_id("--billing--v1--"), "billing-v1");
        assert_eq!(resource_id("1.0"), "1-0");
        assert_eq!(resource_id(""), "");
    }

    #[test]
    fn test_to_onramp() {
        let canonical = CanonicalApi {
            name: "orders-v2-azure".to_string(),
            display_name: "Orders API v2".to_string(),
            version: "v2".to_string(),
            owner_email: "apis@example.com".to_string(),
            documentation_url: "https://portal/api-details#api=orders-v2".to_string(),
            gateway_url: "https://gw/orders".to_string(),
            base_path: "orders".to_string(),
            platform_id: "azure-api-management".to_string(),
            ..CanonicalApi::default()
        };

        let staged = to_onramp(&canonical);
        assert_eq!(staged.api_id, "orders-v2-azure");
        assert_eq!(staged.version_id, "v2");
        assert_eq!(staged.api.display_name, "Orders API v2");
        assert_eq!(staged.api.owner.as_ref().unwrap().email, "apis@example.com");
        assert_eq!(
            staged.api.documentation.as_ref().unwrap().external_uri,
            "https://portal/api-details#api=orders-v2"
        );
        assert_eq!(staged.source.gateway_url, "https://gw/orders");
    }

    #[test]
    fn test_to_onramp_without_optional_fields() {
        let canonical = CanonicalApi {
            name: "billing-azure".to_string(),
            ..CanonicalApi::default()
        };

        let staged = to_onramp(&canonical);
        assert_eq!(staged.version_id, DEFAULT_VERSION_ID);
        assert_eq!(staged.api.display_name, "billing-azure");
        assert!(staged.api.owner.is_none());
        assert!(staged.api.documentation.is_none());
    }
}
