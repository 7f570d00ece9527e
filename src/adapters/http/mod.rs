//! HTTP adapters - REST API implementations.
//!
//! Each module has its own handlers and routes; [`api_router`] nests them
//! under `/api`.

pub mod error;
pub mod exercise;
pub mod focus;
pub mod progress;
pub mod season;

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::application::Services;
use crate::ports::ExerciseRepository;

pub use error::{handle_season_error, ErrorResponse};
pub use exercise::{exercise_routes, ExerciseHandlers};
pub use focus::{focus_routes, FocusHandlers};
pub use progress::{progress_routes, ProgressHandlers};
pub use season::{season_routes, SeasonHandlers};

/// GET /api/health
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Builds the full API router.
pub fn api_router(services: &Services, exercises: Arc<dyn ExerciseRepository>) -> Router {
    let seasons = SeasonHandlers::new(services.creation.clone(), services.lifecycle.clone());
    let focus = FocusHandlers::new(services.focus.clone());
    let progress = ProgressHandlers::new(services.progress.clone());
    let exercises = ExerciseHandlers::new(exercises);

    let api = Router::new()
        .route("/health", get(health))
        .nest("/seasons", season_routes(seasons))
        .nest("/focus", focus_routes(focus))
        .nest("/progress", progress_routes(progress))
        .nest("/exercises", exercise_routes(exercises));

    Router::new().nest("/api", api)
}
