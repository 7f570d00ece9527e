//! Metric progress log repository port.

use crate::domain::foundation::{DomainError, MetricId, ProgressLogId, SeasonId};
use crate::domain::progress::MetricProgressLog;
use async_trait::async_trait;

/// Repository port for progress logs.
#[async_trait]
pub trait MetricProgressLogRepository: Send + Sync {
    async fn create(&self, log: &MetricProgressLog) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ProgressLogId)
        -> Result<Option<MetricProgressLog>, DomainError>;

    /// Logs for one metric in one season, newest `logged_at` first.
    async fn find_by_season_and_metric(
        &self,
        season_id: &SeasonId,
        metric_id: &MetricId,
    ) -> Result<Vec<MetricProgressLog>, DomainError>;

    /// The most recent log for one metric in one season.
    async fn find_latest(
        &self,
        season_id: &SeasonId,
        metric_id: &MetricId,
    ) -> Result<Option<MetricProgressLog>, DomainError>;

    /// # Errors
    ///
    /// - `ProgressLogNotFound` if the log doesn't exist
    async fn update(&self, log: &MetricProgressLog) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `ProgressLogNotFound` if the log doesn't exist
    async fn delete(&self, id: &ProgressLogId) -> Result<(), DomainError>;

    /// Removes every log of a season and returns how many were removed.
    async fn delete_by_season_id(&self, season_id: &SeasonId) -> Result<u64, DomainError>;
}
