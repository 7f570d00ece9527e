//! In-memory metric goal repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{
    DomainError, ErrorCode, MetricGoalId, SeasonAreaMetricId, Timestamp,
};
use crate::domain::goal::MetricGoal;
use crate::ports::MetricGoalRepository;

/// In-memory storage for goals, one per season area metric.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMetricGoalRepository {
    goals: Arc<RwLock<HashMap<MetricGoalId, MetricGoal>>>,
}

impl InMemoryMetricGoalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored goals (useful for tests).
    pub async fn len(&self) -> usize {
        self.goals.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.goals.read().await.is_empty()
    }

    async fn replace(
        &self,
        id: &MetricGoalId,
        change: impl FnOnce(&MetricGoal) -> MetricGoal,
    ) -> Result<MetricGoal, DomainError> {
        let mut goals = self.goals.write().await;
        let stored = goals
            .get_mut(id)
            .ok_or_else(|| not_found(id))?;
        *stored = change(&*stored);
        Ok(stored.clone())
    }
}

fn not_found(id: &MetricGoalId) -> DomainError {
    DomainError::not_found(ErrorCode::MetricGoalNotFound, "Metric goal", id)
}

#[async_trait]
impl MetricGoalRepository for InMemoryMetricGoalRepository {
    async fn create(&self, goal: &MetricGoal) -> Result<(), DomainError> {
        let mut goals = self.goals.write().await;
        let taken = goals
            .values()
            .any(|g| g.season_area_metric_id() == goal.season_area_metric_id());
        if taken || goals.contains_key(goal.id()) {
            return Err(DomainError::database(
                "Failed to create metric goal",
                format!(
                    "duplicate key value violates unique constraint (season_area_metric_id)=({})",
                    goal.season_area_metric_id()
                ),
            ));
        }
        goals.insert(*goal.id(), goal.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &MetricGoalId) -> Result<Option<MetricGoal>, DomainError> {
        Ok(self.goals.read().await.get(id).cloned())
    }

    async fn find_by_season_area_metric_id(
        &self,
        season_area_metric_id: &SeasonAreaMetricId,
    ) -> Result<Option<MetricGoal>, DomainError> {
        let goals = self.goals.read().await;
        Ok(goals
            .values()
            .find(|g| g.season_area_metric_id() == season_area_metric_id)
            .cloned())
    }

    async fn update(&self, goal: &MetricGoal) -> Result<(), DomainError> {
        self.replace(goal.id(), |_| goal.clone()).await.map(|_| ())
    }

    async fn delete(&self, id: &MetricGoalId) -> Result<(), DomainError> {
        self.goals
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    async fn delete_by_season_area_metric_id(
        &self,
        season_area_metric_id: &SeasonAreaMetricId,
    ) -> Result<(), DomainError> {
        self.goals
            .write()
            .await
            .retain(|_, g| g.season_area_metric_id() != season_area_metric_id);
        Ok(())
    }

    async fn mark_achieved(
        &self,
        id: &MetricGoalId,
        at: Timestamp,
    ) -> Result<MetricGoal, DomainError> {
        self.replace(id, |g| g.mark_achieved(Some(at))).await
    }

    async fn mark_not_achieved(&self, id: &MetricGoalId) -> Result<MetricGoal, DomainError> {
        self.replace(id, MetricGoal::mark_not_achieved).await
    }
}
