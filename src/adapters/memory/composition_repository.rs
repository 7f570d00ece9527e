//! In-memory season composition repository.
//!
//! Cascade deletes run sequentially through the goal repository: a failure
//! partway through leaves the rows already removed deleted.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::foundation::{
    DomainError, ErrorCode, SeasonAreaMetricId, SeasonId, SeasonPillarAreaId, SeasonPillarId,
};
use crate::domain::season::{SeasonAreaMetric, SeasonPillar, SeasonPillarArea};
use crate::ports::{MetricGoalRepository, SeasonCompositionRepository};

/// In-memory storage for the three composition levels.
#[derive(Clone)]
pub struct InMemorySeasonCompositionRepository {
    pillars: Arc<RwLock<HashMap<SeasonPillarId, SeasonPillar>>>,
    areas: Arc<RwLock<HashMap<SeasonPillarAreaId, SeasonPillarArea>>>,
    metrics: Arc<RwLock<HashMap<SeasonAreaMetricId, SeasonAreaMetric>>>,
    goals: Arc<dyn MetricGoalRepository>,
}

impl InMemorySeasonCompositionRepository {
    pub fn new(goals: Arc<dyn MetricGoalRepository>) -> Self {
        Self {
            pillars: Arc::new(RwLock::new(HashMap::new())),
            areas: Arc::new(RwLock::new(HashMap::new())),
            metrics: Arc::new(RwLock::new(HashMap::new())),
            goals,
        }
    }

    /// Row counts per level (useful for tests).
    pub async fn counts(&self) -> (usize, usize, usize) {
        (
            self.pillars.read().await.len(),
            self.areas.read().await.len(),
            self.metrics.read().await.len(),
        )
    }
}

fn duplicate(table: &str, key: String) -> DomainError {
    DomainError::database(
        &format!("Failed to insert into {}", table),
        format!("duplicate key value violates unique constraint {}", key),
    )
}

#[async_trait]
impl SeasonCompositionRepository for InMemorySeasonCompositionRepository {
    async fn create_season_pillar(&self, row: &SeasonPillar) -> Result<(), DomainError> {
        let mut pillars = self.pillars.write().await;
        if pillars
            .values()
            .any(|p| p.season_id() == row.season_id() && p.pillar_id() == row.pillar_id())
        {
            return Err(duplicate(
                "season_pillars",
                format!("(season_id, pillar_id)=({}, {})", row.season_id(), row.pillar_id()),
            ));
        }
        pillars.insert(*row.id(), row.clone());
        Ok(())
    }

    async fn find_season_pillar_by_id(
        &self,
        id: &SeasonPillarId,
    ) -> Result<Option<SeasonPillar>, DomainError> {
        Ok(self.pillars.read().await.get(id).cloned())
    }

    async fn find_season_pillars(
        &self,
        season_id: &SeasonId,
    ) -> Result<Vec<SeasonPillar>, DomainError> {
        let pillars = self.pillars.read().await;
        let mut found: Vec<SeasonPillar> = pillars
            .values()
            .filter(|p| p.season_id() == season_id)
            .cloned()
            .collect();
        found.sort_by_key(|p| (p.sort_order(), *p.created_at()));
        Ok(found)
    }

    async fn update_season_pillar(&self, row: &SeasonPillar) -> Result<(), DomainError> {
        let mut pillars = self.pillars.write().await;
        match pillars.get_mut(row.id()) {
            Some(stored) => {
                *stored = row.clone();
                Ok(())
            }
            None => Err(DomainError::not_found(
                ErrorCode::SeasonPillarNotFound,
                "Season pillar",
                row.id(),
            )),
        }
    }

    async fn delete_season_pillar(&self, id: &SeasonPillarId) -> Result<(), DomainError> {
        if !self.pillars.read().await.contains_key(id) {
            return Err(DomainError::not_found(
                ErrorCode::SeasonPillarNotFound,
                "Season pillar",
                id,
            ));
        }
        for area in self.find_season_pillar_areas(id).await? {
            self.delete_season_pillar_area(area.id()).await?;
        }
        self.pillars.write().await.remove(id);
        debug!(season_pillar_id = %id, "Season pillar deleted");
        Ok(())
    }

    async fn create_season_pillar_area(&self, row: &SeasonPillarArea) -> Result<(), DomainError> {
        let mut areas = self.areas.write().await;
        if areas.values().any(|a| {
            a.season_pillar_id() == row.season_pillar_id()
                && a.area_of_focus_id() == row.area_of_focus_id()
        }) {
            return Err(duplicate(
                "season_pillar_areas",
                format!(
                    "(season_pillar_id, area_of_focus_id)=({}, {})",
                    row.season_pillar_id(),
                    row.area_of_focus_id()
                ),
            ));
        }
        areas.insert(*row.id(), row.clone());
        Ok(())
    }

    async fn find_season_pillar_area_by_id(
        &self,
        id: &SeasonPillarAreaId,
    ) -> Result<Option<SeasonPillarArea>, DomainError> {
        Ok(self.areas.read().await.get(id).cloned())
    }

    async fn find_season_pillar_areas(
        &self,
        season_pillar_id: &SeasonPillarId,
    ) -> Result<Vec<SeasonPillarArea>, DomainError> {
        let areas = self.areas.read().await;
        let mut found: Vec<SeasonPillarArea> = areas
            .values()
            .filter(|a| a.season_pillar_id() == season_pillar_id)
            .cloned()
            .collect();
        found.sort_by_key(|a| (a.sort_order(), *a.created_at()));
        Ok(found)
    }

    async fn delete_season_pillar_area(&self, id: &SeasonPillarAreaId) -> Result<(), DomainError> {
        if !self.areas.read().await.contains_key(id) {
            return Err(DomainError::not_found(
                ErrorCode::SeasonPillarAreaNotFound,
                "Season pillar area",
                id,
            ));
        }
        for metric in self.find_season_area_metrics(id).await? {
            self.delete_season_area_metric(metric.id()).await?;
        }
        self.areas.write().await.remove(id);
        debug!(season_pillar_area_id = %id, "Season pillar area deleted");
        Ok(())
    }

    async fn create_season_area_metric(&self, row: &SeasonAreaMetric) -> Result<(), DomainError> {
        let mut metrics = self.metrics.write().await;
        if metrics.values().any(|m| {
            m.season_pillar_area_id() == row.season_pillar_area_id()
                && m.metric_id() == row.metric_id()
        }) {
            return Err(duplicate(
                "season_area_metrics",
                format!(
                    "(season_pillar_area_id, metric_id)=({}, {})",
                    row.season_pillar_area_id(),
                    row.metric_id()
                ),
            ));
        }
        metrics.insert(*row.id(), row.clone());
        Ok(())
    }

    async fn find_season_area_metric_by_id(
        &self,
        id: &SeasonAreaMetricId,
    ) -> Result<Option<SeasonAreaMetric>, DomainError> {
        Ok(self.metrics.read().await.get(id).cloned())
    }

    async fn find_season_area_metrics(
        &self,
        season_pillar_area_id: &SeasonPillarAreaId,
    ) -> Result<Vec<SeasonAreaMetric>, DomainError> {
        let metrics = self.metrics.read().await;
        let mut found: Vec<SeasonAreaMetric> = metrics
            .values()
            .filter(|m| m.season_pillar_area_id() == season_pillar_area_id)
            .cloned()
            .collect();
        found.sort_by_key(|m| (m.sort_order(), *m.created_at()));
        Ok(found)
    }

    async fn delete_season_area_metric(&self, id: &SeasonAreaMetricId) -> Result<(), DomainError> {
        if !self.metrics.read().await.contains_key(id) {
            return Err(DomainError::not_found(
                ErrorCode::SeasonAreaMetricNotFound,
                "Season area metric",
                id,
            ));
        }
        self.goals.delete_by_season_area_metric_id(id).await?;
        self.metrics.write().await.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryMetricGoalRepository;
    use crate::domain::foundation::{AreaOfFocusId, MetricGoalId, MetricId, PillarId, SortOrder};
    use crate::domain::goal::{GoalValues, MetricGoal};
    use crate::domain::metric::Unit;

    fn repos() -> (
        InMemorySeasonCompositionRepository,
        Arc<InMemoryMetricGoalRepository>,
    ) {
        let goals = Arc::new(InMemoryMetricGoalRepository::new());
        (InMemorySeasonCompositionRepository::new(goals.clone()), goals)
    }

    fn season_pillar(season: SeasonId) -> SeasonPillar {
        SeasonPillar::new(SeasonPillarId::new(), season, PillarId::new(), SortOrder::FIRST)
    }

    #[tokio::test]
    async fn duplicate_pillar_in_season_is_rejected() {
        let (repo, _) = repos();
        let season = SeasonId::new();
        let first = season_pillar(season);
        repo.create_season_pillar(&first).await.unwrap();
        let dup = SeasonPillar::new(SeasonPillarId::new(), season, *first.pillar_id(), SortOrder::FIRST);
        assert_eq!(
            repo.create_season_pillar(&dup).await.unwrap_err().code,
            ErrorCode::DatabaseError
        );
    }

    #[tokio::test]
    async fn lists_are_ordered_by_sort_order() {
        let (repo, _) = repos();
        let sp = season_pillar(SeasonId::new());
        repo.create_season_pillar(&sp).await.unwrap();
        for order in [2, 0, 1] {
            let row = SeasonPillarArea::new(
                SeasonPillarAreaId::new(),
                *sp.id(),
                AreaOfFocusId::new(),
                SortOrder::try_new(order).unwrap(),
            );
            repo.create_season_pillar_area(&row).await.unwrap();
        }
        let orders: Vec<i32> = repo
            .find_season_pillar_areas(sp.id())
            .await
            .unwrap()
            .iter()
            .map(|a| a.sort_order().value())
            .collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn deleting_area_metric_removes_its_goal() {
        let (repo, goals) = repos();
        let sam = SeasonAreaMetric::new(
            SeasonAreaMetricId::new(),
            SeasonPillarAreaId::new(),
            MetricId::new(),
            SortOrder::FIRST,
        );
        repo.create_season_area_metric(&sam).await.unwrap();
        let goal =
            MetricGoal::new(MetricGoalId::new(), *sam.id(), GoalValues::new(5.0, Unit::Km)).unwrap();
        goals.create(&goal).await.unwrap();

        repo.delete_season_area_metric(sam.id()).await.unwrap();
        assert!(goals.is_empty().await);
        assert!(repo.find_season_area_metric_by_id(sam.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleting_missing_rows_reports_not_found() {
        let (repo, _) = repos();
        assert_eq!(
            repo.delete_season_pillar(&SeasonPillarId::new()).await.unwrap_err().code,
            ErrorCode::SeasonPillarNotFound
        );
        assert_eq!(
            repo.delete_season_pillar_area(&SeasonPillarAreaId::new())
                .await
                .unwrap_err()
                .code,
            ErrorCode::SeasonPillarAreaNotFound
        );
    }
}
