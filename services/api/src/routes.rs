use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use recall_atlas::recall::{recall_router, RecallAtlas};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_recall_routes(atlas: Arc<RecallAtlas>) -> axum::Router {
    recall_router(atlas)
        .route("/health", axum::routing::get(healthcheck))
        .route("/health/v1/ping", axum::routing::get(ping))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn ping() -> Json<serde_json::Value> {
    Json(json!({ "message": env!("CARGO_PKG_VERSION") }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::load_atlas;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use recall_atlas::config::{DataConfig, SiteConfig};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    fn sample_atlas() -> Arc<RecallAtlas> {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..");
        let data = DataConfig {
            legislators_path: root.join(DataConfig::DEFAULT_LEGISLATORS_PATH),
            divisions_path: root.join(DataConfig::DEFAULT_DIVISIONS_PATH),
        };
        load_atlas(&data, SiteConfig::default()).expect("sample data loads")
    }

    fn app(ready: bool) -> axum::Router {
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_recall_routes(sample_atlas()).layer(Extension(state))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    async fn get(app: axum::Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::get(uri).body(Body::empty()).expect("request"))
            .await
            .expect("route executes")
    }

    #[tokio::test]
    async fn ping_reports_version() {
        let response = get(app(true), "/health/v1/ping").await;
        assert_eq!(response.status(), StatusCode::OK);
        let payload = body_json(response).await;
        assert_eq!(payload, json!({ "message": env!("CARGO_PKG_VERSION") }));
    }

    #[tokio::test]
    async fn readiness_tracks_listener_flag() {
        let response = get(app(false), "/ready").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = get(app(true), "/ready").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "status": "ready" }));
    }

    #[tokio::test]
    async fn recall_routes_are_mounted() {
        let response = get(app(true), "/apis/constituencies?municipality=63000000").await;
        assert_eq!(response.status(), StatusCode::OK);
        let payload = body_json(response).await;
        assert_eq!(payload["message"], json!("OK"));

        let response = get(app(true), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn readiness_flag_is_shared() {
        let flag = Arc::new(AtomicBool::new(false));
        let state = AppState {
            readiness: flag.clone(),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        flag.store(true, Ordering::Release);
        assert!(state.readiness.load(Ordering::Acquire));
    }
}
