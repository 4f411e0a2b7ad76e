//! Campaign routes.

use crate::handlers::list_campaigns;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn campaign_routes(state: AppState) -> Router {
    Router::new()
        .route("/campaigns", get(list_campaigns))
        .with_state(state)
}
