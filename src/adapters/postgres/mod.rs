//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresSeasonRepository` - Season aggregates
//! - `PostgresPillarRepository` - Migration-seeded system pillars
//! - `PostgresAreaOfFocusRepository` / `PostgresMetricRepository` - Catalog entries
//! - `PostgresSeasonCompositionRepository` - Season tree with transactional cascade
//! - `PostgresMetricGoalRepository` - Goals per season metric
//! - `PostgresProgressLogRepository` - Progress time series

mod area_of_focus_repository;
mod composition_repository;
mod metric_goal_repository;
mod metric_repository;
mod pillar_repository;
mod progress_log_repository;
mod rows;
mod season_repository;

pub use area_of_focus_repository::PostgresAreaOfFocusRepository;
pub use composition_repository::PostgresSeasonCompositionRepository;
pub use metric_goal_repository::PostgresMetricGoalRepository;
pub use metric_repository::PostgresMetricRepository;
pub use pillar_repository::PostgresPillarRepository;
pub use progress_log_repository::PostgresProgressLogRepository;
pub use season_repository::PostgresSeasonRepository;

use std::sync::Arc;

use sqlx::PgPool;

use crate::adapters::exercise::BundledExerciseRepository;
use crate::domain::foundation::DomainError;
use crate::ports::Repositories;

/// Repositories sharing one connection pool. Exercises still come from the bundled dataset.
pub fn repositories(pool: PgPool) -> Result<Repositories, DomainError> {
    Ok(Repositories {
        seasons: Arc::new(PostgresSeasonRepository::new(pool.clone())),
        pillars: Arc::new(PostgresPillarRepository::new(pool.clone())),
        areas: Arc::new(PostgresAreaOfFocusRepository::new(pool.clone())),
        metrics: Arc::new(PostgresMetricRepository::new(pool.clone())),
        composition: Arc::new(PostgresSeasonCompositionRepository::new(pool.clone())),
        goals: Arc::new(PostgresMetricGoalRepository::new(pool.clone())),
        progress_logs: Arc::new(PostgresProgressLogRepository::new(pool)),
        exercises: Arc::new(BundledExerciseRepository::load()?),
    })
}
