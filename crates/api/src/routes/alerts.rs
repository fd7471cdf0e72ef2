//! Route definitions for alerts.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::alerts;
use crate::state::AppState;

/// Alert routes mounted at `/alerts`.
///
/// ```text
/// GET    /            -> list_alerts
/// POST   /ack/{id}    -> acknowledge_alert
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(alerts::list_alerts))
        .route("/ack/{id}", post(alerts::acknowledge_alert))
}
