//! HTTP routes for the pillar catalog.

use axum::{routing::get, Router};

use super::handlers::{get_pillar, list_areas, list_pillars, FocusHandlers};

/// Mounted under `/api/focus`.
pub fn focus_routes(handlers: FocusHandlers) -> Router {
    Router::new()
        .route("/pillars", get(list_pillars))
        .route("/pillars/:id", get(get_pillar))
        .route("/areas", get(list_areas))
        .with_state(handlers)
}
