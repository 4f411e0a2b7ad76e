//! Campaign list handler.

use crate::campaign::{to_wire_all, Campaign};
use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, Json};

/// Every campaign, in storage order. One session per request; any failure fails the whole list.
#[utoipa::path(
    get,
    path = "/campaigns",
    tag = "campaigns",
    responses(
        (status = 200, description = "All campaigns", body = [Campaign]),
        (status = 500, description = "Storage unavailable, query failed, or a row failed validation")
    )
)]
pub async fn list_campaigns(State(state): State<AppState>) -> Result<Json<Vec<Campaign>>, AppError> {
    let mut session = state.store.open_session().await?;
    let records = session.fetch_campaigns().await;
    session.close();
    let campaigns = to_wire_all(&records?)?;
    tracing::debug!(count = campaigns.len(), "campaigns listed");
    Ok(Json(campaigns))
}
