//! In-memory metric repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::seed;
use crate::domain::foundation::{DomainError, ErrorCode, MetricId, UserId};
use crate::domain::metric::{Metric, MetricType};
use crate::ports::MetricRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryMetricRepository {
    metrics: Arc<RwLock<HashMap<MetricId, Metric>>>,
}

impl InMemoryMetricRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding the predefined and app-calculated metrics.
    pub fn seeded() -> Result<Self, DomainError> {
        let map = seed::predefined_metrics()?
            .into_iter()
            .map(|m| (*m.id(), m))
            .collect();
        Ok(Self {
            metrics: Arc::new(RwLock::new(map)),
        })
    }

    async fn active_where<F>(&self, keep: F) -> Vec<Metric>
    where
        F: Fn(&Metric) -> bool,
    {
        let metrics = self.metrics.read().await;
        let mut found: Vec<Metric> = metrics
            .values()
            .filter(|m| m.is_active() && keep(m))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name().cmp(b.name()));
        found
    }
}

#[async_trait]
impl MetricRepository for InMemoryMetricRepository {
    async fn create(&self, metric: &Metric) -> Result<(), DomainError> {
        let mut metrics = self.metrics.write().await;
        if metrics.contains_key(metric.id()) {
            return Err(DomainError::database(
                "Failed to create metric",
                format!("duplicate key {}", metric.id()),
            ));
        }
        metrics.insert(*metric.id(), metric.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &MetricId) -> Result<Option<Metric>, DomainError> {
        Ok(self.metrics.read().await.get(id).cloned())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Metric>, DomainError> {
        Ok(self.active_where(|m| m.user_id() == Some(user_id)).await)
    }

    async fn find_accessible(&self, user_id: &UserId) -> Result<Vec<Metric>, DomainError> {
        Ok(self
            .active_where(|m| match m.metric_type() {
                MetricType::Predefined | MetricType::AppCalculated => true,
                MetricType::UserCreated => m.user_id() == Some(user_id),
            })
            .await)
    }

    async fn find_all_active(&self) -> Result<Vec<Metric>, DomainError> {
        Ok(self.active_where(|_| true).await)
    }

    async fn update(&self, metric: &Metric) -> Result<(), DomainError> {
        let mut metrics = self.metrics.write().await;
        match metrics.get_mut(metric.id()) {
            Some(stored) => {
                *stored = metric.clone();
                Ok(())
            }
            None => Err(DomainError::not_found(
                ErrorCode::MetricNotFound,
                "Metric",
                metric.id(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metric::{MetricDefinition, Unit, UnitType};

    #[tokio::test]
    async fn accessible_metrics_include_app_calculated_and_own() {
        let repo = InMemoryMetricRepository::seeded().unwrap();
        let me = UserId::new();
        let mine = Metric::user_created(
            MetricId::new(),
            me,
            MetricDefinition::new("Plank Hold", UnitType::Time, Unit::Seconds),
        )
        .unwrap();
        repo.create(&mine).await.unwrap();

        let accessible = repo.find_accessible(&me).await.unwrap();
        assert!(accessible.iter().any(|m| m.id() == mine.id()));
        assert!(accessible
            .iter()
            .any(|m| m.metric_type() == MetricType::AppCalculated));

        let stranger = repo.find_accessible(&UserId::new()).await.unwrap();
        assert!(!stranger.iter().any(|m| m.id() == mine.id()));
        assert_eq!(stranger.len() + 1, accessible.len());
    }

    #[tokio::test]
    async fn update_unknown_metric_fails() {
        let repo = InMemoryMetricRepository::new();
        let metric = Metric::predefined(
            MetricId::new(),
            MetricDefinition::new("Steps", UnitType::Reps, Unit::Count),
        )
        .unwrap();
        let err = repo.update(&metric).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MetricNotFound);
    }
}
