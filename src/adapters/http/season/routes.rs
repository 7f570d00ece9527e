//! HTTP routes for season endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::handlers::{
    add_area, add_metric, archive_season, cancel_season, complete_season, create_season,
    delete_season, get_season, pause_season, remove_area, remove_metric, resume_season,
    set_pillar_theme, start_season, update_goal, update_season, SeasonHandlers,
};

/// Creates the season router with all endpoints.
///
/// Static segments (`/areas`, `/metrics`) take precedence over `/:id`.
pub fn season_routes(handlers: SeasonHandlers) -> Router {
    Router::new()
        .route("/", post(create_season))
        .route(
            "/:id",
            get(get_season).put(update_season).delete(delete_season),
        )
        .route("/:id/pillars/:pillar_id/theme", put(set_pillar_theme))
        .route("/:id/start", post(start_season))
        .route("/:id/pause", post(pause_season))
        .route("/:id/resume", post(resume_season))
        .route("/:id/complete", post(complete_season))
        .route("/:id/cancel", post(cancel_season))
        .route("/:id/archive", post(archive_season))
        .route("/areas", post(add_area))
        .route("/areas/:id", delete(remove_area))
        .route("/metrics", post(add_metric))
        .route("/metrics/:id", delete(remove_metric))
        .route("/metrics/:id/goal", put(update_goal))
        .with_state(handlers)
}
