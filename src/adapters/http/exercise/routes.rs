//! HTTP routes for the exercise library.

use axum::{routing::get, Router};

use super::handlers::{get_exercise, list_exercises, ExerciseHandlers};

pub fn exercise_routes(handlers: ExerciseHandlers) -> Router {
    Router::new()
        .route("/", get(list_exercises))
        .route("/:id", get(get_exercise))
        .with_state(handlers)
}
