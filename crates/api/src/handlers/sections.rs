//! Handlers for the `/sections` resource.
//!
//! CRUD over track sections plus the status-only mark path, which runs the
//! observation rule. A status set through PATCH does not.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use railtrack_core::engine::{ObservationSource, PatchOutcome};
use railtrack_core::ids::parse_id;
use railtrack_core::inspection::MarkRequest;
use railtrack_core::section::{CreateSection, UpdateSection};
use serde_json::json;

use crate::error::AppResult;
use crate::extract::ValidJson;
use crate::state::AppState;

/// GET /api/sections
///
/// List all sections ordered by name.
pub async fn list_sections(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let sections = state.engine.list_sections().await?;
    Ok(Json(sections))
}

/// POST /api/sections
///
/// Create a section in the `safe` state with zero faults.
pub async fn create_section(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateSection>,
) -> AppResult<impl IntoResponse> {
    let section = state.engine.create_section(&input).await?;
    Ok((StatusCode::CREATED, Json(section)))
}

/// PATCH /api/sections/{id}
///
/// Set any of `name`, `status`, `color_safe`, `color_faulty`. An empty body
/// answers `{"updated": false}` before the id is looked at.
pub async fn patch_section(
    State(state): State<AppState>,
    Path(section_id): Path<String>,
    ValidJson(input): ValidJson<UpdateSection>,
) -> AppResult<Response> {
    if input.is_empty() {
        return Ok(Json(json!({ "updated": false })).into_response());
    }
    let section_id = parse_id(&section_id)?;

    let response = match state.engine.patch_section(section_id, input).await? {
        PatchOutcome::Unchanged => Json(json!({ "updated": false })).into_response(),
        PatchOutcome::Updated(section) => Json(section).into_response(),
    };
    Ok(response)
}

/// DELETE /api/sections/{id}
///
/// Inspections and alerts for the section are kept.
pub async fn delete_section(
    State(state): State<AppState>,
    Path(section_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let section_id = parse_id(&section_id)?;
    state.engine.delete_section(section_id).await?;
    Ok(Json(json!({ "deleted": true })))
}

/// POST /api/sections/{id}/mark
///
/// Record a manual observation and return the updated section.
pub async fn mark_section(
    State(state): State<AppState>,
    Path(section_id): Path<String>,
    ValidJson(input): ValidJson<MarkRequest>,
) -> AppResult<impl IntoResponse> {
    let section_id = parse_id(&section_id)?;
    let section = state
        .engine
        .record_observation(section_id, input.status, ObservationSource::ManualMark)
        .await?;
    Ok(Json(section))
}
