//! HTTP surface for status and sync

use anyhow::{Context, Result};
use apimsync_core::types::{StatusReport, SyncRequest, SyncResponse};
use apimsync_pipeline::Orchestrator;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Routes served by `apimsync serve`
pub fn router(orchestrator: Orchestrator) -> Router {
    Router::new()
        .route("/v1/apim/status", get(status))
        .route("/v1/apim/sync", post(sync))
        .layer(TraceLayer::new_for_http())
        .with_state(orchestrator)
}

async fn status(State(orchestrator): State<Orchestrator>) -> Json<StatusReport> {
    Json(orchestrator.status().await)
}

async fn sync(
    State(orchestrator): State<Orchestrator>,
    Json(request): Json<SyncRequest>,
) -> Json<SyncResponse> {
    Json(orchestrator.sync(&request).await)
}

/// Bind and serve until the process is stopped
pub async fn serve(orchestrator: Orchestrator, host: &str, port: u16) -> Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on {}", addr);
    axum::serve(listener, router(orchestrator))
        .await
        .context("HTTP server stopped")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use apimsync_core::config::ConfigOverrides;
    use apimsync_core::ApimSyncConfig;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use camino::Utf8PathBuf;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn app(staging: &TempDir) -> Router {
        let config = ApimSyncConfig::default().with_overrides(ConfigOverrides {
            staging_dir: Some(Utf8PathBuf::try_from(staging.path().to_path_buf()).unwrap()),
            ..ConfigOverrides::default()
        });
        router(Orchestrator::new(config))
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_status_without_configuration() {
        let staging = TempDir::new().unwrap();
        let response = app(&staging)
            .oneshot(
                Request::builder()
                    .uri("/v1/apim/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let status: StatusReport = body_json(response).await;
        assert!(!status.azure.connected);
        assert!(status.azure.message.contains("Azure API Management"));
        assert!(!status.apihub.connected);
        assert!(status.apihub.message.contains("Apigee API Hub"));
    }

    #[tokio::test]
    async fn test_sync_reports_missing_prerequisites() {
        let staging = TempDir::new().unwrap();
        let response = app(&staging)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/apim/sync")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"offramp":"azure","onramp":"apihub"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let outcome: SyncResponse = body_json(response).await;
        assert!(!outcome.result);
        assert!(outcome
            .message
            .starts_with("Sync from azure to apihub finished with problems: "));
    }

    #[tokio::test]
    async fn test_sync_rejects_unknown_platform() {
        let staging = TempDir::new().unwrap();
        let response = app(&staging)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/apim/sync")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"offramp":"aws","onramp":"apihub"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let staging = TempDir::new().unwrap();
        let response = app(&staging)
            .oneshot(
                Request::builder()
                    .uri("/v1/apim/unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
