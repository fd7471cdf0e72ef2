//! Handlers for inspection submission and listing.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use railtrack_core::engine::ObservationSource;
use railtrack_core::ids::parse_id;
use railtrack_core::inspection::{InspectRequest, InspectionFilter};
use railtrack_core::limits::{clamp_limit, DEFAULT_INSPECTION_LIMIT, MAX_INSPECTION_LIMIT};
use serde_json::json;

use crate::error::AppResult;
use crate::extract::{ValidJson, ValidQuery};
use crate::query::InspectionListParams;
use crate::state::AppState;

/// POST /api/inspect
///
/// Record a full inspection. Runs the same observation rule as a mark.
pub async fn inspect(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<InspectRequest>,
) -> AppResult<impl IntoResponse> {
    let section_id = parse_id(&input.section_id)?;
    state
        .engine
        .record_observation(
            section_id,
            input.status,
            ObservationSource::Inspection {
                detail: input.detail,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "created": true }))))
}

/// GET /api/inspections?section_id=&limit=
///
/// Newest first. `limit` defaults to 50.
pub async fn list_inspections(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<InspectionListParams>,
) -> AppResult<impl IntoResponse> {
    let section_id = params.section_id.as_deref().map(parse_id).transpose()?;
    let filter = InspectionFilter {
        section_id,
        limit: clamp_limit(params.limit, DEFAULT_INSPECTION_LIMIT, MAX_INSPECTION_LIMIT),
    };

    let inspections = state.engine.list_inspections(filter).await?;
    Ok(Json(inspections))
}
