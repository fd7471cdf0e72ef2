//! Route definitions for track sections.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::sections;
use crate::state::AppState;

/// Section routes mounted at `/sections`.
///
/// ```text
/// GET    /              -> list_sections
/// POST   /              -> create_section
/// PATCH  /{id}          -> patch_section
/// DELETE /{id}          -> delete_section
/// POST   /{id}/mark     -> mark_section
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(sections::list_sections).post(sections::create_section))
        .route(
            "/{id}",
            patch(sections::patch_section).delete(sections::delete_section),
        )
        .route("/{id}/mark", post(sections::mark_section))
}
