use axum::extract::State;
use axum::Json;
use railtrack_core::summary::Summary;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/summary
pub async fn summary(State(state): State<AppState>) -> AppResult<Json<Summary>> {
    Ok(Json(state.engine.summarize().await?))
}
