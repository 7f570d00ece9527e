//! PostgreSQL implementation of MetricGoalRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::MetricGoalRow;
use crate::domain::foundation::{DomainError, ErrorCode, MetricGoalId, SeasonAreaMetricId, Timestamp};
use crate::domain::goal::MetricGoal;
use crate::ports::MetricGoalRepository;

const GOAL_COLUMNS: &str = "id, season_area_metric_id, goal_value, goal_unit, canonical_value, \
     start_value, start_unit, target_date, is_achieved, achieved_at, notes, created_at, updated_at";

/// PostgreSQL implementation of MetricGoalRepository.
#[derive(Clone)]
pub struct PostgresMetricGoalRepository {
    pool: PgPool,
}

impl PostgresMetricGoalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MetricGoalRepository for PostgresMetricGoalRepository {
    async fn create(&self, goal: &MetricGoal) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO metric_goals (
                id, season_area_metric_id, goal_value, goal_unit, canonical_value,
                start_value, start_unit, target_date, is_achieved, achieved_at,
                notes, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(goal.id().as_uuid())
        .bind(goal.season_area_metric_id().as_uuid())
        .bind(goal.goal_value())
        .bind(goal.goal_unit().as_str())
        .bind(goal.canonical_value())
        .bind(goal.start_value())
        .bind(goal.start_unit().map(|u| u.as_str()))
        .bind(goal.target_date())
        .bind(goal.is_achieved())
        .bind(goal.achieved_at().map(|t| *t.as_datetime()))
        .bind(goal.notes())
        .bind(goal.created_at().as_datetime())
        .bind(goal.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert metric goal", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &MetricGoalId) -> Result<Option<MetricGoal>, DomainError> {
        let sql = format!("SELECT {} FROM metric_goals WHERE id = $1", GOAL_COLUMNS);
        let row: Option<MetricGoalRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch metric goal", e))?;

        row.map(MetricGoal::try_from).transpose()
    }

    async fn find_by_season_area_metric_id(
        &self,
        season_area_metric_id: &SeasonAreaMetricId,
    ) -> Result<Option<MetricGoal>, DomainError> {
        let sql = format!(
            "SELECT {} FROM metric_goals WHERE season_area_metric_id = $1",
            GOAL_COLUMNS
        );
        let row: Option<MetricGoalRow> = sqlx::query_as(&sql)
            .bind(season_area_metric_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch goal for season metric", e))?;

        row.map(MetricGoal::try_from).transpose()
    }

    async fn update(&self, goal: &MetricGoal) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE metric_goals SET
                goal_value = $2,
                goal_unit = $3,
                canonical_value = $4,
                start_value = $5,
                start_unit = $6,
                target_date = $7,
                is_achieved = $8,
                achieved_at = $9,
                notes = $10,
                updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(goal.id().as_uuid())
        .bind(goal.goal_value())
        .bind(goal.goal_unit().as_str())
        .bind(goal.canonical_value())
        .bind(goal.start_value())
        .bind(goal.start_unit().map(|u| u.as_str()))
        .bind(goal.target_date())
        .bind(goal.is_achieved())
        .bind(goal.achieved_at().map(|t| *t.as_datetime()))
        .bind(goal.notes())
        .bind(goal.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update metric goal", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::MetricGoalNotFound,
                "Metric goal",
                goal.id(),
            ));
        }

        Ok(())
    }

    async fn delete(&self, id: &MetricGoalId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM metric_goals WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete metric goal", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::MetricGoalNotFound,
                "Metric goal",
                id,
            ));
        }

        Ok(())
    }

    async fn delete_by_season_area_metric_id(
        &self,
        season_area_metric_id: &SeasonAreaMetricId,
    ) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM metric_goals WHERE season_area_metric_id = $1")
            .bind(season_area_metric_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete goal for season metric", e))?;

        Ok(())
    }

    async fn mark_achieved(
        &self,
        id: &MetricGoalId,
        at: Timestamp,
    ) -> Result<MetricGoal, DomainError> {
        let sql = format!(
            "UPDATE metric_goals SET is_achieved = TRUE, achieved_at = $2, updated_at = now() \
             WHERE id = $1 RETURNING {}",
            GOAL_COLUMNS
        );
        let row: Option<MetricGoalRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .bind(at.as_datetime())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to mark goal achieved", e))?;

        match row {
            Some(row) => MetricGoal::try_from(row),
            None => Err(DomainError::not_found(
                ErrorCode::MetricGoalNotFound,
                "Metric goal",
                id,
            )),
        }
    }

    async fn mark_not_achieved(&self, id: &MetricGoalId) -> Result<MetricGoal, DomainError> {
        let sql = format!(
            "UPDATE metric_goals SET is_achieved = FALSE, achieved_at = NULL, updated_at = now() \
             WHERE id = $1 RETURNING {}",
            GOAL_COLUMNS
        );
        let row: Option<MetricGoalRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to clear goal achievement", e))?;

        match row {
            Some(row) => MetricGoal::try_from(row),
            None => Err(DomainError::not_found(
                ErrorCode::MetricGoalNotFound,
                "Metric goal",
                id,
            )),
        }
    }
}
