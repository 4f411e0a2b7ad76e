//! Router tests that need no running database.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use campaign_api::{app, AppState, Store};
use std::time::Duration;
use tower::ServiceExt;

// Nothing listens on port 1, so every acquire fails.
const UNREACHABLE_URL: &str = "postgres://campaigns@127.0.0.1:1/campaigns";

fn unreachable_store() -> Store {
    Store::connect_lazy(UNREACHABLE_URL, 1, Duration::from_millis(500)).unwrap()
}

async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn root_does_not_depend_on_storage() {
    let app = app(AppState::new(unreachable_store()));
    let (status, body) = get(app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({"message": "Campaign Management API", "status": "running"})
    );
}

#[tokio::test]
async fn campaigns_fail_when_storage_is_unreachable() {
    let app = app(AppState::new(unreachable_store()));
    let (status, body) = get(app, "/campaigns").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.is_array());
    assert_eq!(body["error"]["code"], "connection_error");
}

#[tokio::test]
async fn campaigns_fail_after_pool_is_closed() {
    let store = unreachable_store();
    store.close().await;
    let app = app(AppState::new(store));
    let (status, body) = get(app, "/campaigns").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "connection_error");
}

#[tokio::test]
async fn health_ok_but_not_ready_without_storage() {
    let app = app(AppState::new(unreachable_store()));
    let (status, body) = get(app.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"status": "ok"}));

    let (status, body) = get(app, "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body,
        serde_json::json!({"status": "degraded", "database": "unavailable"})
    );
}

#[tokio::test]
async fn version_reports_crate_metadata() {
    let app = app(AppState::new(unreachable_store()));
    let (status, body) = get(app, "/version").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "campaign-api");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = app(AppState::new(unreachable_store()));
    let (status, body) = get(app, "/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Campaign Management API");
    assert!(body["paths"]["/campaigns"].is_object());
}

#[tokio::test]
async fn any_origin_is_allowed() {
    let app = app(AppState::new(unreachable_store()));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::ORIGIN, "https://dashboard.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn preflight_allows_any_method_and_header() {
    let app = app(AppState::new(unreachable_store()));
    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/campaigns")
                .header(header::ORIGIN, "https://dashboard.example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-custom")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(), "*");
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(), "*");
}
