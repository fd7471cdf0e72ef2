use axum::routing::get;
use axum::Router;

use crate::handlers::export;
use crate::state::AppState;

/// CSV export routes mounted at `/export`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sections", get(export::export_sections))
        .route("/inspections", get(export::export_inspections))
}
