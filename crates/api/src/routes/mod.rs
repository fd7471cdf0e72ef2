pub mod alerts;
pub mod export;
pub mod health;
pub mod sections;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /sections                       list, create
/// /sections/{id}                  patch, delete
/// /sections/{id}/mark             manual observation (POST)
///
/// /inspect                        submit inspection (POST)
/// /inspections                    list (?section_id, ?limit)
///
/// /alerts                         list (?only_open)
/// /alerts/ack/{id}                acknowledge (POST)
///
/// /summary                        section counts
///
/// /export/sections                sections CSV
/// /export/inspections             inspections CSV (?limit)
///
/// /login                          demo login (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/sections", sections::router())
        .route("/inspect", post(handlers::inspections::inspect))
        .route("/inspections", get(handlers::inspections::list_inspections))
        .nest("/alerts", alerts::router())
        .route("/summary", get(handlers::summary::summary))
        .nest("/export", export::router())
        .route("/login", post(handlers::auth::login))
}
