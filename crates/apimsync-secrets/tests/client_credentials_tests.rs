//! Client-credentials exchange against a mocked token endpoint
//!
//! Tests cover:
//! - Form fields sent to the tenant's token endpoint
//! - Error statuses collapsing to "no token"
//! - Source precedence when several credentials are configured

use apimsync_core::config::{AzureConfig, AzureCredentials};
use apimsync_core::Error;
use apimsync_secrets::{
    ClientCredentialsSource, ResolvedFrom, TokenProvider, TokenResolver, TokenSource,
};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TENANT: &str = "tenant-1";

async fn mock_token_endpoint(server: &MockServer, status: u16, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(format!("/{}/oauth2/token", TENANT)))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

fn azure_config(server: &MockServer, credentials: AzureCredentials) -> AzureConfig {
    AzureConfig {
        login_endpoint: server.uri(),
        credentials,
        ..AzureConfig::default()
    }
}

fn client_credentials() -> AzureCredentials {
    AzureCredentials {
        client_id: Some("client-1".to_string()),
        client_secret: Some("s3cret".to_string()),
        tenant_id: Some(TENANT.to_string()),
        ..AzureCredentials::default()
    }
}

#[tokio::test]
async fn test_exchange_returns_access_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/{}/oauth2/token", TENANT)))
        .and(body_string_contains("client_id=client-1"))
        .and(body_string_contains("client_secret=s3cret"))
        .and(body_string_contains("resource=https%3A%2F%2Fmanagement.azure.com%2F"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token_type": "Bearer",
            "expires_in": "3599",
            "access_token": "issued-token"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let source = ClientCredentialsSource::new(
        reqwest::Client::new(),
        server.uri(),
        TENANT,
        "client-1",
        "s3cret",
    );

    let token = source.resolve().await.unwrap().unwrap();
    assert_eq!(token.bearer(), "issued-token");
    assert_eq!(
        token.resolved_from,
        ResolvedFrom::ClientCredentials {
            tenant_id: TENANT.to_string()
        }
    );
}

#[tokio::test]
async fn test_rejected_exchange_is_error_without_secret() {
    let server = MockServer::start().await;
    mock_token_endpoint(
        &server,
        401,
        serde_json::json!({"error": "invalid_client", "client_secret": "s3cret"}),
    )
    .await;

    let source = ClientCredentialsSource::new(
        reqwest::Client::new(),
        server.uri(),
        TENANT,
        "client-1",
        "s3cret",
    );

    let err = source.resolve().await.unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("401"));
    assert!(!message.contains("s3cret"));
}

#[tokio::test]
async fn test_empty_access_token_is_no_token() {
    let server = MockServer::start().await;
    mock_token_endpoint(&server, 200, serde_json::json!({"token_type": "Bearer"})).await;

    let source = ClientCredentialsSource::new(
        reqwest::Client::new(),
        server.uri(),
        TENANT,
        "client-1",
        "s3cret",
    );

    assert!(source.resolve().await.unwrap().is_none());
}

#[tokio::test]
async fn test_resolver_uses_client_credentials_last() {
    let server = MockServer::start().await;
    mock_token_endpoint(
        &server,
        200,
        serde_json::json!({"access_token": "issued-token"}),
    )
    .await;

    let resolver =
        TokenResolver::for_azure(&azure_config(&server, client_credentials()), reqwest::Client::new());
    let token = resolver.acquire().await.unwrap();
    assert_eq!(token.bearer(), "issued-token");

    let mut credentials = client_credentials();
    credentials.env_token = Some("env-token".to_string());
    let resolver =
        TokenResolver::for_azure(&azure_config(&server, credentials), reqwest::Client::new());
    assert_eq!(resolver.acquire().await.unwrap().bearer(), "env-token");
}

#[tokio::test]
async fn test_resolver_reports_auth_failure() {
    let server = MockServer::start().await;
    mock_token_endpoint(&server, 500, serde_json::json!({"error": "boom"})).await;

    let resolver =
        TokenResolver::for_azure(&azure_config(&server, client_credentials()), reqwest::Client::new());
    assert!(resolver.get_token().await.is_none());

    let err = resolver.acquire().await.unwrap_err();
    assert!(matches!(err, Error::AuthFailure { .. }));
    assert_eq!(
        err.to_string(),
        "Could not get a valid Azure API Management token."
    );
}
