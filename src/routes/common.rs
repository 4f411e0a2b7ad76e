//! Common routes: identity, health, readiness, version, API document.

use crate::openapi::ApiDoc;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

pub const SERVICE_NAME: &str = "Campaign Management API";

#[derive(Serialize, ToSchema)]
pub struct RootBody {
    message: &'static str,
    status: &'static str,
}

/// Liveness and readiness payload. `database` is only reported by `/ready`.
#[derive(Serialize)]
struct StatusBody {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

impl StatusBody {
    fn live() -> Self {
        Self { status: "ok", database: None }
    }

    fn ready() -> Self {
        Self { status: "ok", database: Some("ok") }
    }

    fn degraded() -> Self {
        Self { status: "degraded", database: Some("unavailable") }
    }
}

#[derive(Serialize)]
struct VersionBody {
    name: &'static str,
    version: &'static str,
}

/// Fixed identity payload. Never touches storage.
#[utoipa::path(
    get,
    path = "/",
    tag = "service",
    responses((status = 200, description = "Service identity", body = RootBody))
)]
pub async fn root() -> Json<RootBody> {
    Json(RootBody {
        message: SERVICE_NAME,
        status: "running",
    })
}

async fn health() -> Json<StatusBody> {
    Json(StatusBody::live())
}

/// 503 while storage is unreachable.
async fn ready(State(state): State<AppState>) -> Result<Json<StatusBody>, (StatusCode, Json<StatusBody>)> {
    state.store.ping().await.map(|()| Json(StatusBody::ready())).map_err(|e| {
        tracing::warn!(code = e.code(), error = %e, "readiness check failed");
        (StatusCode::SERVICE_UNAVAILABLE, Json(StatusBody::degraded()))
    })
}

async fn version() -> Json<VersionBody> {
    Json(VersionBody {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET /, /health, /ready, /version, /openapi.json.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .route("/openapi.json", get(openapi))
        .with_state(state)
}
