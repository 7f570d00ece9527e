//! PostgreSQL implementation of MetricProgressLogRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::{convert_all, ProgressLogRow};
use crate::domain::foundation::{DomainError, ErrorCode, MetricId, ProgressLogId, SeasonId};
use crate::domain::progress::MetricProgressLog;
use crate::ports::MetricProgressLogRepository;

const LOG_COLUMNS: &str = "id, season_id, metric_id, user_id, value, unit, canonical_value, \
     logged_at, entry_type, source_reference, notes, created_at, updated_at";

/// PostgreSQL implementation of MetricProgressLogRepository.
#[derive(Clone)]
pub struct PostgresProgressLogRepository {
    pool: PgPool,
}

impl PostgresProgressLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MetricProgressLogRepository for PostgresProgressLogRepository {
    async fn create(&self, log: &MetricProgressLog) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO metric_progress_logs (
                id, season_id, metric_id, user_id, value, unit, canonical_value,
                logged_at, entry_type, source_reference, notes, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(log.id().as_uuid())
        .bind(log.season_id().as_uuid())
        .bind(log.metric_id().as_uuid())
        .bind(log.user_id().as_uuid())
        .bind(log.value())
        .bind(log.unit().as_str())
        .bind(log.canonical_value())
        .bind(log.logged_at().as_datetime())
        .bind(log.entry_type().as_str())
        .bind(log.source_reference())
        .bind(log.notes())
        .bind(log.created_at().as_datetime())
        .bind(log.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert progress log", e))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ProgressLogId,
    ) -> Result<Option<MetricProgressLog>, DomainError> {
        let sql = format!("SELECT {} FROM metric_progress_logs WHERE id = $1", LOG_COLUMNS);
        let row: Option<ProgressLogRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch progress log", e))?;

        row.map(MetricProgressLog::try_from).transpose()
    }

    async fn find_by_season_and_metric(
        &self,
        season_id: &SeasonId,
        metric_id: &MetricId,
    ) -> Result<Vec<MetricProgressLog>, DomainError> {
        let sql = format!(
            "SELECT {} FROM metric_progress_logs WHERE season_id = $1 AND metric_id = $2 \
             ORDER BY logged_at DESC",
            LOG_COLUMNS
        );
        let rows: Vec<ProgressLogRow> = sqlx::query_as(&sql)
            .bind(season_id.as_uuid())
            .bind(metric_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch progress logs", e))?;

        convert_all(rows)
    }

    async fn find_latest(
        &self,
        season_id: &SeasonId,
        metric_id: &MetricId,
    ) -> Result<Option<MetricProgressLog>, DomainError> {
        let sql = format!(
            "SELECT {} FROM metric_progress_logs WHERE season_id = $1 AND metric_id = $2 \
             ORDER BY logged_at DESC LIMIT 1",
            LOG_COLUMNS
        );
        let row: Option<ProgressLogRow> = sqlx::query_as(&sql)
            .bind(season_id.as_uuid())
            .bind(metric_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch latest progress log", e))?;

        row.map(MetricProgressLog::try_from).transpose()
    }

    async fn update(&self, log: &MetricProgressLog) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE metric_progress_logs SET
                value = $2,
                unit = $3,
                canonical_value = $4,
                logged_at = $5,
                notes = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(log.id().as_uuid())
        .bind(log.value())
        .bind(log.unit().as_str())
        .bind(log.canonical_value())
        .bind(log.logged_at().as_datetime())
        .bind(log.notes())
        .bind(log.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update progress log", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::ProgressLogNotFound,
                "Progress log",
                log.id(),
            ));
        }

        Ok(())
    }

    async fn delete(&self, id: &ProgressLogId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM metric_progress_logs WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete progress log", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::ProgressLogNotFound,
                "Progress log",
                id,
            ));
        }

        Ok(())
    }

    async fn delete_by_season_id(&self, season_id: &SeasonId) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM metric_progress_logs WHERE season_id = $1")
            .bind(season_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete season progress logs", e))?;

        Ok(result.rows_affected())
    }
}
