//! Demo login.
//!
//! Issues a deterministic per-email token so the dashboard can show who is
//! signed in. Nothing in the API checks it; it is not an access control
//! mechanism.

use axum::extract::State;
use axum::Json;
use railtrack_core::user::{LoginRequest, LoginResponse};

use crate::error::AppResult;
use crate::extract::ValidJson;
use crate::state::AppState;

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    Ok(Json(state.engine.login(&input).await?))
}
