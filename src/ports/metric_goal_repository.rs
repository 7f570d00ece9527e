//! Metric goal repository port.

use crate::domain::foundation::{DomainError, MetricGoalId, SeasonAreaMetricId, Timestamp};
use crate::domain::goal::MetricGoal;
use async_trait::async_trait;

/// Repository port for metric goals.
///
/// At most one goal exists per season area metric.
#[async_trait]
pub trait MetricGoalRepository: Send + Sync {
    /// Save a new goal.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if the metric association already has a goal
    async fn create(&self, goal: &MetricGoal) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &MetricGoalId) -> Result<Option<MetricGoal>, DomainError>;

    async fn find_by_season_area_metric_id(
        &self,
        season_area_metric_id: &SeasonAreaMetricId,
    ) -> Result<Option<MetricGoal>, DomainError>;

    /// Update an existing goal.
    ///
    /// # Errors
    ///
    /// - `MetricGoalNotFound` if the goal doesn't exist
    async fn update(&self, goal: &MetricGoal) -> Result<(), DomainError>;

    /// Delete a goal.
    ///
    /// # Errors
    ///
    /// - `MetricGoalNotFound` if the goal doesn't exist
    async fn delete(&self, id: &MetricGoalId) -> Result<(), DomainError>;

    /// Delete the goal attached to a metric association, if there is one.
    async fn delete_by_season_area_metric_id(
        &self,
        season_area_metric_id: &SeasonAreaMetricId,
    ) -> Result<(), DomainError>;

    /// Mark a goal achieved at `at` and return the stored result.
    async fn mark_achieved(
        &self,
        id: &MetricGoalId,
        at: Timestamp,
    ) -> Result<MetricGoal, DomainError>;

    /// Clear a goal's achievement and return the stored result.
    async fn mark_not_achieved(&self, id: &MetricGoalId) -> Result<MetricGoal, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_goal_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn MetricGoalRepository) {}
    }
}
