//! PostgreSQL implementation of SeasonCompositionRepository.
//!
//! Deletes walk the tree bottom-up inside one transaction: goals first, then
//! metric associations, then area associations, then the row itself.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use super::rows::{convert_all, SeasonAreaMetricRow, SeasonPillarAreaRow, SeasonPillarRow};
use crate::domain::foundation::{
    DomainError, ErrorCode, SeasonAreaMetricId, SeasonId, SeasonPillarAreaId, SeasonPillarId,
};
use crate::domain::season::{SeasonAreaMetric, SeasonPillar, SeasonPillarArea};
use crate::ports::SeasonCompositionRepository;

/// PostgreSQL implementation of SeasonCompositionRepository.
#[derive(Clone)]
pub struct PostgresSeasonCompositionRepository {
    pool: PgPool,
}

impl PostgresSeasonCompositionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>, DomainError> {
        self.pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))
    }
}

async fn commit(tx: Transaction<'static, Postgres>) -> Result<(), DomainError> {
    tx.commit()
        .await
        .map_err(|e| DomainError::database("Failed to commit transaction", e))
}

#[async_trait]
impl SeasonCompositionRepository for PostgresSeasonCompositionRepository {
    async fn create_season_pillar(&self, row: &SeasonPillar) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO season_pillars (id, season_id, pillar_id, theme, sort_order, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(row.id().as_uuid())
        .bind(row.season_id().as_uuid())
        .bind(row.pillar_id().as_uuid())
        .bind(row.theme())
        .bind(row.sort_order().value())
        .bind(row.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert season pillar", e))?;

        Ok(())
    }

    async fn find_season_pillar_by_id(
        &self,
        id: &SeasonPillarId,
    ) -> Result<Option<SeasonPillar>, DomainError> {
        let row: Option<SeasonPillarRow> = sqlx::query_as(
            r#"
            SELECT id, season_id, pillar_id, theme, sort_order, created_at
            FROM season_pillars
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch season pillar", e))?;

        row.map(SeasonPillar::try_from).transpose()
    }

    async fn find_season_pillars(&self, season_id: &SeasonId) -> Result<Vec<SeasonPillar>, DomainError> {
        let rows: Vec<SeasonPillarRow> = sqlx::query_as(
            r#"
            SELECT id, season_id, pillar_id, theme, sort_order, created_at
            FROM season_pillars
            WHERE season_id = $1
            ORDER BY sort_order, created_at
            "#,
        )
        .bind(season_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch season pillars", e))?;

        convert_all(rows)
    }

    async fn update_season_pillar(&self, row: &SeasonPillar) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE season_pillars SET theme = $2, sort_order = $3 WHERE id = $1",
        )
        .bind(row.id().as_uuid())
        .bind(row.theme())
        .bind(row.sort_order().value())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update season pillar", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::SeasonPillarNotFound,
                "Season pillar",
                row.id(),
            ));
        }

        Ok(())
    }

    async fn delete_season_pillar(&self, id: &SeasonPillarId) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM metric_goals
            WHERE season_area_metric_id IN (
                SELECT sam.id
                FROM season_area_metrics sam
                JOIN season_pillar_areas spa ON spa.id = sam.season_pillar_area_id
                WHERE spa.season_pillar_id = $1
            )
            "#,
        )
        .bind(id.as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to delete goals for season pillar", e))?;

        sqlx::query(
            r#"
            DELETE FROM season_area_metrics
            WHERE season_pillar_area_id IN (
                SELECT id FROM season_pillar_areas WHERE season_pillar_id = $1
            )
            "#,
        )
        .bind(id.as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to delete metrics for season pillar", e))?;

        sqlx::query("DELETE FROM season_pillar_areas WHERE season_pillar_id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to delete areas for season pillar", e))?;

        let result = sqlx::query("DELETE FROM season_pillars WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to delete season pillar", e))?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls it back.
            return Err(DomainError::not_found(
                ErrorCode::SeasonPillarNotFound,
                "Season pillar",
                id,
            ));
        }

        commit(tx).await
    }

    async fn create_season_pillar_area(&self, row: &SeasonPillarArea) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO season_pillar_areas (id, season_pillar_id, area_of_focus_id, sort_order, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(row.id().as_uuid())
        .bind(row.season_pillar_id().as_uuid())
        .bind(row.area_of_focus_id().as_uuid())
        .bind(row.sort_order().value())
        .bind(row.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert season pillar area", e))?;

        Ok(())
    }

    async fn find_season_pillar_area_by_id(
        &self,
        id: &SeasonPillarAreaId,
    ) -> Result<Option<SeasonPillarArea>, DomainError> {
        let row: Option<SeasonPillarAreaRow> = sqlx::query_as(
            r#"
            SELECT id, season_pillar_id, area_of_focus_id, sort_order, created_at
            FROM season_pillar_areas
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch season pillar area", e))?;

        row.map(SeasonPillarArea::try_from).transpose()
    }

    async fn find_season_pillar_areas(
        &self,
        season_pillar_id: &SeasonPillarId,
    ) -> Result<Vec<SeasonPillarArea>, DomainError> {
        let rows: Vec<SeasonPillarAreaRow> = sqlx::query_as(
            r#"
            SELECT id, season_pillar_id, area_of_focus_id, sort_order, created_at
            FROM season_pillar_areas
            WHERE season_pillar_id = $1
            ORDER BY sort_order, created_at
            "#,
        )
        .bind(season_pillar_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch season pillar areas", e))?;

        convert_all(rows)
    }

    async fn delete_season_pillar_area(&self, id: &SeasonPillarAreaId) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM metric_goals
            WHERE season_area_metric_id IN (
                SELECT id FROM season_area_metrics WHERE season_pillar_area_id = $1
            )
            "#,
        )
        .bind(id.as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to delete goals for season area", e))?;

        sqlx::query("DELETE FROM season_area_metrics WHERE season_pillar_area_id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to delete metrics for season area", e))?;

        let result = sqlx::query("DELETE FROM season_pillar_areas WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to delete season pillar area", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::SeasonPillarAreaNotFound,
                "Season pillar area",
                id,
            ));
        }

        commit(tx).await
    }

    async fn create_season_area_metric(&self, row: &SeasonAreaMetric) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO season_area_metrics (id, season_pillar_area_id, metric_id, sort_order, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(row.id().as_uuid())
        .bind(row.season_pillar_area_id().as_uuid())
        .bind(row.metric_id().as_uuid())
        .bind(row.sort_order().value())
        .bind(row.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert season area metric", e))?;

        Ok(())
    }

    async fn find_season_area_metric_by_id(
        &self,
        id: &SeasonAreaMetricId,
    ) -> Result<Option<SeasonAreaMetric>, DomainError> {
        let row: Option<SeasonAreaMetricRow> = sqlx::query_as(
            r#"
            SELECT id, season_pillar_area_id, metric_id, sort_order, created_at
            FROM season_area_metrics
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch season area metric", e))?;

        row.map(SeasonAreaMetric::try_from).transpose()
    }

    async fn find_season_area_metrics(
        &self,
        season_pillar_area_id: &SeasonPillarAreaId,
    ) -> Result<Vec<SeasonAreaMetric>, DomainError> {
        let rows: Vec<SeasonAreaMetricRow> = sqlx::query_as(
            r#"
            SELECT id, season_pillar_area_id, metric_id, sort_order, created_at
            FROM season_area_metrics
            WHERE season_pillar_area_id = $1
            ORDER BY sort_order, created_at
            "#,
        )
        .bind(season_pillar_area_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch season area metrics", e))?;

        convert_all(rows)
    }

    async fn delete_season_area_metric(&self, id: &SeasonAreaMetricId) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;

        sqlx::query("DELETE FROM metric_goals WHERE season_area_metric_id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to delete goal for season metric", e))?;

        let result = sqlx::query("DELETE FROM season_area_metrics WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to delete season area metric", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::SeasonAreaMetricNotFound,
                "Season area metric",
                id,
            ));
        }

        commit(tx).await
    }
}
