//! HTTP adapter for the pillar and area-of-focus catalog.

mod handlers;
mod routes;

pub use handlers::FocusHandlers;
pub use routes::focus_routes;
