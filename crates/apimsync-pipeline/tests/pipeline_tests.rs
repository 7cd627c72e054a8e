//! Export → offramp → onramp → import against in-memory platforms
//!
//! Tests cover:
//! - Version-qualified names and group directories
//! - Revision exclusion and name filters
//! - `only_new` re-export behaviour
//! - Canonical mapping of staged exports
//! - Onramp staging and idempotent import

mod common;

use apimsync_core::types::{CanonicalApi, OnrampApi, PlatformApi, SchemaDocument};
use apimsync_pipeline::{exporter, importer, offramp, onramp};
use common::*;
use std::collections::HashSet;

fn inventory() -> MockPlatform {
    MockPlatform::new(vec![
        api("orders-v2", "Orders API", "v2", "/orders"),
        api("billing", "Billing API", "v1", "billing"),
        api("billing;rev=2", "Billing API", "v1", "billing"),
    ])
    .with_schema(schema("orders-v2", "json", "{\"openapi\":\"3.0.1\"}"))
}

async fn export_all(platform: &MockPlatform, staging: &TestStaging) {
    let service = exporter::export_service(platform, &staging.stager).await;
    assert!(service.is_success());
    let report = exporter::export(platform, &staging.stager, None, false).await;
    assert!(report.is_success(), "{:?}", report.problems());
}

#[tokio::test]
async fn test_export_qualifies_names_and_groups() {
    let staging = staging();
    let platform = inventory();

    let report = exporter::export(&platform, &staging.stager, None, false).await;
    assert_eq!(report.processed, vec!["orders-v2", "billing-v1"]);
    assert!(report.skipped.is_empty());

    let stager = &staging.stager;
    let orders: PlatformApi = stager
        .read_json(&stager.export_api_path(PROTO_TAG, "orders", "orders-v2"))
        .unwrap();
    assert_eq!(orders.name, "orders-v2");
    assert_eq!(orders.properties.display_name, "Orders API v2");

    let billing: PlatformApi = stager
        .read_json(&stager.export_api_path(PROTO_TAG, "billing", "billing-v1"))
        .unwrap();
    assert_eq!(billing.name, "billing-v1");
    assert_eq!(billing.properties.display_name, "Billing API v1");
}

#[tokio::test]
async fn test_export_writes_schema_files() {
    let staging = staging();
    let platform = inventory();
    exporter::export(&platform, &staging.stager, None, false).await;

    let stager = &staging.stager;
    let definition: SchemaDocument = stager
        .read_json(&stager.export_schema_definition_path(PROTO_TAG, "orders", "orders-v2"))
        .unwrap();
    assert_eq!(definition.properties.schema_type, "json");

    let body = stager
        .read_bytes(&stager.export_schema_body_path(PROTO_TAG, "orders", "orders-v2", "json"))
        .unwrap();
    assert_eq!(body, b"{\"openapi\":\"3.0.1\"}");

    // billing has no schema: no definition written, not a failure
    assert!(!stager.exists(&stager.export_schema_definition_path(PROTO_TAG, "billing", "billing-v1")));
}

#[tokio::test]
async fn test_staged_json_uses_two_space_indent() {
    let staging = staging();
    exporter::export(&inventory(), &staging.stager, None, false).await;

    let stager = &staging.stager;
    let text = String::from_utf8(
        stager
            .read_bytes(&stager.export_api_path(PROTO_TAG, "billing", "billing-v1"))
            .unwrap(),
    )
    .unwrap();
    assert!(text.starts_with("{\n  \"id\""));
}

#[tokio::test]
async fn test_revisions_never_exported() {
    let staging = staging();
    let platform = inventory();

    let report = exporter::export(&platform, &staging.stager, Some("billing;rev=2"), false).await;
    assert!(report.processed.is_empty());
    assert!(platform.schema_requests().is_empty());

    let files = staging
        .stager
        .list_files(&staging.stager.export_group_dir(PROTO_TAG, "billing"))
        .unwrap();
    assert!(files.is_empty());
}

#[tokio::test]
async fn test_filter_matches_raw_name() {
    let staging = staging();
    let platform = inventory();

    let report = exporter::export(&platform, &staging.stager, Some("billing"), false).await;
    assert_eq!(report.processed, vec!["billing-v1"]);
    assert_eq!(platform.schema_requests(), vec!["billing-v1"]);
}

#[tokio::test]
async fn test_only_new_second_run_exports_nothing() {
    let staging = staging();
    let platform = inventory();

    let first = exporter::export(&platform, &staging.stager, None, true).await;
    assert_eq!(first.processed.len(), 2);

    let second = exporter::export(&platform, &staging.stager, None, true).await;
    assert!(second.processed.is_empty());
    assert_eq!(second.skipped, vec!["orders-v2", "billing-v1"]);
    // skipped APIs do not fetch their schema again
    assert_eq!(platform.schema_requests().len(), 2);
}

#[tokio::test]
async fn test_without_only_new_re_export_overwrites() {
    let staging = staging();
    let platform = inventory();

    exporter::export(&platform, &staging.stager, None, false).await;
    let second = exporter::export(&platform, &staging.stager, None, false).await;
    assert_eq!(second.processed.len(), 2);
    assert!(second.skipped.is_empty());
}

#[tokio::test]
async fn test_listing_failure_aborts_stage() {
    let staging = staging();
    let mut platform = inventory();
    platform.fail_listing = true;

    let report = exporter::export(&platform, &staging.stager, None, false).await;
    assert_eq!(report.problem.as_deref(), Some("503 Service Unavailable"));
    assert!(!report.is_success());
}

#[tokio::test]
async fn test_offramp_builds_canonical_records() {
    let staging = staging();
    let platform = inventory();
    export_all(&platform, &staging).await;

    let report = offramp::offramp(&staging.stager, &ProtoDescriptor, PROTO_SERVICE, None);
    assert!(report.is_success(), "{:?}", report.problems());
    let processed: HashSet<_> = report.processed.iter().map(String::as_str).collect();
    assert_eq!(processed, HashSet::from(["orders-v2-proto", "billing-v1-proto"]));

    let stager = &staging.stager;
    let orders: CanonicalApi = stager
        .read_json(&stager.canonical_api_path("orders", "orders-v2-proto"))
        .unwrap();
    assert_eq!(orders.name, "orders-v2-proto");
    assert_eq!(orders.base_path, "/orders");
    assert_eq!(orders.gateway_url, format!("{}/orders", PROTO_GATEWAY));
    assert_eq!(orders.version, "v2");
    assert_eq!(orders.owner_name, "Proto Team");
    assert_eq!(orders.platform_id, "proto-platform");

    let schema = stager
        .read_bytes(&stager.canonical_schema_path("orders", "orders-v2-proto"))
        .unwrap();
    assert_eq!(schema, b"{\"openapi\":\"3.0.1\"}");
    assert!(!stager.exists(&stager.canonical_schema_path("billing", "billing-v1-proto")));
}

#[tokio::test]
async fn test_offramp_never_emits_revisions() {
    let staging = staging();
    export_all(&inventory(), &staging).await;

    let report = offramp::offramp(&staging.stager, &ProtoDescriptor, PROTO_SERVICE, None);
    assert!(report.processed.iter().all(|name| !name.contains(";rev=")));

    let files = staging
        .stager
        .list_files(&staging.stager.canonical_group_dir("billing"))
        .unwrap();
    assert_eq!(files, vec!["billing-v1-proto.json"]);
}

#[tokio::test]
async fn test_offramp_without_service_metadata() {
    let staging = staging();
    let mut platform = inventory();
    platform.service = None;
    export_all(&platform, &staging).await;

    offramp::offramp(&staging.stager, &ProtoDescriptor, PROTO_SERVICE, Some("orders"));

    let stager = &staging.stager;
    let orders: CanonicalApi = stager
        .read_json(&stager.canonical_api_path("orders", "orders-v2-proto"))
        .unwrap();
    assert_eq!(orders.gateway_url, "");
    assert_eq!(orders.owner_email, "");
    assert_eq!(orders.base_path, "/orders");
    // the group filter left billing alone
    assert!(!stager.exists(&stager.canonical_api_path("billing", "billing-v1-proto")));
}

#[tokio::test]
async fn test_offramp_records_unparseable_files_and_continues() {
    let staging = staging();
    export_all(&inventory(), &staging).await;

    let stager = &staging.stager;
    stager
        .write_bytes(
            &stager.export_api_path(PROTO_TAG, "orders", "orders-v3"),
            b"not json",
        )
        .unwrap();

    let report = offramp::offramp(stager, &ProtoDescriptor, PROTO_SERVICE, None);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].api, "orders-v3");
    assert!(report.processed.contains(&"orders-v2-proto".to_string()));
    assert!(report.processed.contains(&"billing-v1-proto".to_string()));
}

#[tokio::test]
async fn test_offramp_with_nothing_exported() {
    let staging = staging();
    let report = offramp::offramp(&staging.stager, &ProtoDescriptor, PROTO_SERVICE, None);
    assert!(report.is_success());
    assert!(report.processed.is_empty());
}

#[tokio::test]
async fn test_onramp_and_import() {
    let staging = staging();
    export_all(&inventory(), &staging).await;
    offramp::offramp(&staging.stager, &ProtoDescriptor, PROTO_SERVICE, None);

    let report = onramp::onramp(&staging.stager, "hub", None);
    assert!(report.is_success(), "{:?}", report.problems());
    assert_eq!(report.processed.len(), 2);

    let stager = &staging.stager;
    let staged: OnrampApi = stager
        .read_json(&stager.onramp_api_path("hub", "orders", "orders-v2-proto"))
        .unwrap();
    assert_eq!(staged.version_id, "v2");
    assert_eq!(staged.api.display_name, "Orders API v2");
    assert!(stager.exists(&stager.onramp_schema_path("hub", "orders", "orders-v2-proto")));

    let catalog = MockCatalog::default();
    let report = importer::import(&catalog, stager).await;
    assert!(report.is_success(), "{:?}", report.problems());
    assert_eq!(
        catalog.calls(),
        vec![
            "api:billing-v1-proto",
            "version:billing-v1-proto/v1",
            "api:orders-v2-proto",
            "version:orders-v2-proto/v2",
            "spec:orders-v2-proto/v2/orders-v2-proto-oas (19 bytes)",
        ]
    );

    // a second import meets existing resources and still succeeds
    let again = importer::import(&catalog, stager).await;
    assert!(again.is_success());
    assert_eq!(again.processed.len(), 2);
}

#[tokio::test]
async fn test_import_failure_is_recorded_per_api() {
    let staging = staging();
    export_all(&inventory(), &staging).await;
    offramp::offramp(&staging.stager, &ProtoDescriptor, PROTO_SERVICE, None);
    onramp::onramp(&staging.stager, "hub", None);

    let catalog = MockCatalog {
        failing_apis: HashSet::from(["billing-v1-proto".to_string()]),
        ..MockCatalog::default()
    };
    let report = importer::import(&catalog, &staging.stager).await;

    assert_eq!(report.processed, vec!["orders-v2-proto"]);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].api, "billing-v1-proto");
    assert_eq!(report.errors[0].message, "500 Internal Server Error");
}

#[tokio::test]
async fn test_clean_removes_export_area() {
    let staging = staging();
    export_all(&inventory(), &staging).await;

    assert!(exporter::clean(&staging.stager, PROTO_TAG).unwrap());
    assert!(!staging.stager.export_dir(PROTO_TAG).exists());
    assert!(!exporter::clean(&staging.stager, PROTO_TAG).unwrap());
}

#[tokio::test]
async fn test_wsdl_schema_stays_in_export_area() {
    let staging = staging();
    let platform = MockPlatform::new(vec![api("soap-v1", "SOAP API", "v1", "soap")])
        .with_schema(schema("soap-v1", "application/wsdl+xml", "<definitions/>"));
    export_all(&platform, &staging).await;

    let stager = &staging.stager;
    let body = stager
        .read_bytes(&stager.export_schema_body_path(PROTO_TAG, "soap", "soap-v1", "wsdl"))
        .unwrap();
    assert_eq!(body, b"<definitions/>");
    assert!(!stager.exists(&stager.export_schema_body_path(PROTO_TAG, "soap", "soap-v1", "json")));

    let report = offramp::offramp(stager, &ProtoDescriptor, PROTO_SERVICE, None);
    assert_eq!(report.processed, vec!["soap-v1-proto"]);
    assert!(!stager.exists(&stager.canonical_schema_path("soap", "soap-v1-proto")));

    onramp::onramp(stager, "hub", None);
    let catalog = MockCatalog::default();
    importer::import(&catalog, stager).await;
    assert_eq!(
        catalog.calls(),
        vec!["api:soap-v1-proto", "version:soap-v1-proto/v1"]
    );
}
