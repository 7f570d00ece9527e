//! HTTP adapter for the exercise library.

mod dto;
mod handlers;
mod routes;

pub use dto::ExerciseQuery;
pub use handlers::ExerciseHandlers;
pub use routes::exercise_routes;
