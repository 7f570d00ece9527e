//! HTTP adapter for season creation and lifecycle endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AddAreaRequest, AddMetricRequest, CreateSeasonRequest, CreatedResponse, SeasonResponse,
    TransitionRequest, UpdateGoalRequest,
};
pub use handlers::SeasonHandlers;
pub use routes::season_routes;
