//! Router assembly.

pub mod campaign;
pub mod common;

use crate::state::AppState;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use campaign::campaign_routes;
pub use common::common_routes;

/// Full application router. Every route allows any origin, method and header.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(common_routes(state.clone()))
        .merge(campaign_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
