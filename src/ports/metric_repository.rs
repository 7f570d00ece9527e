//! Metric repository port.

use crate::domain::foundation::{DomainError, MetricId, UserId};
use crate::domain::metric::Metric;
use async_trait::async_trait;

/// Repository port for metrics.
///
/// List queries return active metrics ordered by name ascending.
#[async_trait]
pub trait MetricRepository: Send + Sync {
    /// Save a new metric.
    async fn create(&self, metric: &Metric) -> Result<(), DomainError>;

    /// Find a metric by its ID, active or not.
    async fn find_by_id(&self, id: &MetricId) -> Result<Option<Metric>, DomainError>;

    /// Active metrics created by a user.
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Metric>, DomainError>;

    /// Active metrics a user may track: predefined, app-calculated and their own.
    async fn find_accessible(&self, user_id: &UserId) -> Result<Vec<Metric>, DomainError>;

    /// Every active metric.
    async fn find_all_active(&self) -> Result<Vec<Metric>, DomainError>;

    /// Update an existing metric.
    ///
    /// # Errors
    ///
    /// - `MetricNotFound` if the metric doesn't exist
    async fn update(&self, metric: &Metric) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn MetricRepository) {}
    }
}
