//! In-memory adapters for every repository port.
//!
//! Used by tests and by the `memory` storage backend.

mod area_of_focus_repository;
mod composition_repository;
mod metric_goal_repository;
mod metric_repository;
mod pillar_repository;
mod progress_log_repository;
pub mod seed;
mod season_repository;

pub use area_of_focus_repository::InMemoryAreaOfFocusRepository;
pub use composition_repository::InMemorySeasonCompositionRepository;
pub use metric_goal_repository::InMemoryMetricGoalRepository;
pub use metric_repository::InMemoryMetricRepository;
pub use pillar_repository::InMemoryPillarRepository;
pub use progress_log_repository::InMemoryProgressLogRepository;
pub use season_repository::InMemorySeasonRepository;

use std::sync::Arc;

use crate::adapters::exercise::BundledExerciseRepository;
use crate::domain::foundation::DomainError;
use crate::ports::{MetricGoalRepository, Repositories};

/// Seeded in-memory repositories plus the bundled exercise library.
pub fn repositories() -> Result<Repositories, DomainError> {
    let goals: Arc<dyn MetricGoalRepository> = Arc::new(InMemoryMetricGoalRepository::new());
    Ok(Repositories {
        seasons: Arc::new(InMemorySeasonRepository::new()),
        pillars: Arc::new(InMemoryPillarRepository::seeded()?),
        areas: Arc::new(InMemoryAreaOfFocusRepository::seeded()?),
        metrics: Arc::new(InMemoryMetricRepository::seeded()?),
        composition: Arc::new(InMemorySeasonCompositionRepository::new(goals.clone())),
        goals,
        progress_logs: Arc::new(InMemoryProgressLogRepository::new()),
        exercises: Arc::new(BundledExerciseRepository::load()?),
    })
}
