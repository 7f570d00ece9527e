//! HTTP adapter for progress logging.

mod dto;
mod handlers;
mod routes;

pub use dto::{LogProgressRequest, ProgressQuery, UpdateProgressRequest};
pub use handlers::ProgressHandlers;
pub use routes::progress_routes;
