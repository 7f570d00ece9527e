//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Repository Ports
//!
//! - `SeasonRepository` - Season aggregates
//! - `PillarRepository` - The five system pillars (read-only)
//! - `AreaOfFocusRepository` / `MetricRepository` - Selectable catalog entries
//! - `SeasonCompositionRepository` - Season -> pillar -> area -> metric rows
//! - `MetricGoalRepository` - Goals attached to season metrics
//! - `MetricProgressLogRepository` - Time-series progress values
//! - `ExerciseRepository` - Read-only exercise library

mod area_of_focus_repository;
mod exercise_repository;
mod metric_goal_repository;
mod metric_progress_log_repository;
mod metric_repository;
mod pillar_repository;
mod season_composition_repository;
mod season_repository;

pub use area_of_focus_repository::AreaOfFocusRepository;
pub use exercise_repository::ExerciseRepository;
pub use metric_goal_repository::MetricGoalRepository;
pub use metric_progress_log_repository::MetricProgressLogRepository;
pub use metric_repository::MetricRepository;
pub use pillar_repository::PillarRepository;
pub use season_composition_repository::SeasonCompositionRepository;
pub use season_repository::SeasonRepository;

use std::sync::Arc;

/// One implementation of every port, chosen by the storage backend.
#[derive(Clone)]
pub struct Repositories {
    pub seasons: Arc<dyn SeasonRepository>,
    pub pillars: Arc<dyn PillarRepository>,
    pub areas: Arc<dyn AreaOfFocusRepository>,
    pub metrics: Arc<dyn MetricRepository>,
    pub composition: Arc<dyn SeasonCompositionRepository>,
    pub goals: Arc<dyn MetricGoalRepository>,
    pub progress_logs: Arc<dyn MetricProgressLogRepository>,
    pub exercises: Arc<dyn ExerciseRepository>,
}
