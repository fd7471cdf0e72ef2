//! Handlers for the `/alerts` resource.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use railtrack_core::alert::AlertFilter;
use railtrack_core::ids::parse_id;
use railtrack_core::limits::DEFAULT_ALERT_LIMIT;
use serde_json::json;

use crate::error::AppResult;
use crate::extract::ValidQuery;
use crate::query::AlertListParams;
use crate::state::AppState;

/// GET /api/alerts?only_open=true
///
/// Newest 100 alerts; unacknowledged only unless `only_open=false`.
pub async fn list_alerts(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<AlertListParams>,
) -> AppResult<impl IntoResponse> {
    let alerts = state
        .engine
        .list_alerts(AlertFilter {
            only_open: params.only_open,
            limit: DEFAULT_ALERT_LIMIT,
        })
        .await?;
    Ok(Json(alerts))
}

/// POST /api/alerts/ack/{id}
pub async fn acknowledge_alert(
    State(state): State<AppState>,
    Path(alert_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let alert_id = parse_id(&alert_id)?;
    state.engine.acknowledge_alert(alert_id).await?;
    Ok(Json(json!({ "acknowledged": true })))
}
