//! Season module - seasons, their lifecycle and composition tree.

mod aggregate;
mod composition;
mod errors;
mod status;

pub use aggregate::{Season, MAX_DURATION_WEEKS, MIN_DURATION_WEEKS};
pub use composition::{SeasonAreaMetric, SeasonPillar, SeasonPillarArea, MAX_THEME_LENGTH};
pub use errors::SeasonError;
pub use status::SeasonStatus;
