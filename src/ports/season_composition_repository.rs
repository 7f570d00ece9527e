//! Season composition repository port.
//!
//! Persists the three association levels below a season. List queries are
//! ordered by sort_order ascending.
//!
//! # Cascade
//!
//! Deletes flow downward: a season pillar takes its areas with it, an area
//! takes its metrics, and a metric takes its goal.

use crate::domain::foundation::{
    DomainError, SeasonAreaMetricId, SeasonId, SeasonPillarAreaId, SeasonPillarId,
};
use crate::domain::season::{SeasonAreaMetric, SeasonPillar, SeasonPillarArea};
use async_trait::async_trait;

/// Repository port for the season composition tree.
#[async_trait]
pub trait SeasonCompositionRepository: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────
    // Season pillars
    // ─────────────────────────────────────────────────────────────────────

    /// Save a new season pillar.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if (season_id, pillar_id) already exists
    async fn create_season_pillar(&self, row: &SeasonPillar) -> Result<(), DomainError>;

    async fn find_season_pillar_by_id(
        &self,
        id: &SeasonPillarId,
    ) -> Result<Option<SeasonPillar>, DomainError>;

    async fn find_season_pillars(&self, season_id: &SeasonId)
        -> Result<Vec<SeasonPillar>, DomainError>;

    /// Persist a changed theme or sort order.
    async fn update_season_pillar(&self, row: &SeasonPillar) -> Result<(), DomainError>;

    /// Delete a season pillar and everything below it.
    async fn delete_season_pillar(&self, id: &SeasonPillarId) -> Result<(), DomainError>;

    // ─────────────────────────────────────────────────────────────────────
    // Season pillar areas
    // ─────────────────────────────────────────────────────────────────────

    async fn create_season_pillar_area(&self, row: &SeasonPillarArea) -> Result<(), DomainError>;

    async fn find_season_pillar_area_by_id(
        &self,
        id: &SeasonPillarAreaId,
    ) -> Result<Option<SeasonPillarArea>, DomainError>;

    async fn find_season_pillar_areas(
        &self,
        season_pillar_id: &SeasonPillarId,
    ) -> Result<Vec<SeasonPillarArea>, DomainError>;

    /// Delete an area, its metrics and their goals.
    async fn delete_season_pillar_area(&self, id: &SeasonPillarAreaId) -> Result<(), DomainError>;

    // ─────────────────────────────────────────────────────────────────────
    // Season area metrics
    // ─────────────────────────────────────────────────────────────────────

    async fn create_season_area_metric(&self, row: &SeasonAreaMetric) -> Result<(), DomainError>;

    async fn find_season_area_metric_by_id(
        &self,
        id: &SeasonAreaMetricId,
    ) -> Result<Option<SeasonAreaMetric>, DomainError>;

    async fn find_season_area_metrics(
        &self,
        season_pillar_area_id: &SeasonPillarAreaId,
    ) -> Result<Vec<SeasonAreaMetric>, DomainError>;

    /// Delete a metric association and its goal.
    async fn delete_season_area_metric(&self, id: &SeasonAreaMetricId) -> Result<(), DomainError>;
}
