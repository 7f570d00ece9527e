//! Season services.
//!
//! - `SeasonCreationService` - builds the season composition tree
//! - `SeasonFocusService` - read-only pillar and area aggregation
//! - `SeasonLifecycleService` - persisted status transitions
//! - `ProgressLogService` - progress entries with unit conversion
//! - `ReferenceData` - startup readiness check over the reference datasets

mod progress_log;
mod reference_data;
mod season_creation;
mod season_focus;
mod season_lifecycle;

pub use progress_log::{LogProgressCommand, ProgressLogService, UpdateProgressLogCommand};
pub use reference_data::ReferenceData;
pub use season_creation::{
    AddAreaOfFocusCommand, AddMetricCommand, AddMetricResult, CreateDraftSeasonCommand,
    GoalTarget, MeasuredValue, SeasonAreaView, SeasonCreationService, SeasonCreationView,
    SeasonMetricView, SeasonPillarView, UpdateMetricGoalCommand,
};
pub use season_focus::{PillarWithAreas, SeasonFocusService};
pub use season_lifecycle::{SeasonLifecycleService, UpdateSeasonMetadataCommand};

use tracing::error;

use crate::domain::foundation::DomainError;
use crate::domain::season::SeasonError;

/// Logs a repository failure and converts it for the caller.
pub(crate) fn storage_failure(operation: &'static str) -> impl Fn(DomainError) -> SeasonError {
    move |err| {
        error!(operation, error = %err, "repository call failed");
        SeasonError::from(err)
    }
}
