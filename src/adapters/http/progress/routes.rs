//! HTTP routes for progress logging.

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers::{
    delete_progress, list_progress, log_progress, update_progress, ProgressHandlers,
};

pub fn progress_routes(handlers: ProgressHandlers) -> Router {
    Router::new()
        .route("/", get(list_progress).post(log_progress))
        .route("/:id", put(update_progress).delete(delete_progress))
        .with_state(handlers)
}
