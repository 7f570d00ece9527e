//! PostgreSQL implementation of MetricRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::{convert_all, MetricRow};
use crate::domain::foundation::{DomainError, ErrorCode, MetricId, UserId};
use crate::domain::metric::Metric;
use crate::ports::MetricRepository;

const METRIC_COLUMNS: &str = "id, name, description, unit_type, default_unit, alternative_units, \
     data_type, metric_type, user_id, calculation_method, is_active, created_at, updated_at";

/// PostgreSQL implementation of MetricRepository.
#[derive(Clone)]
pub struct PostgresMetricRepository {
    pool: PgPool,
}

impl PostgresMetricRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unit_names(metric: &Metric) -> Vec<String> {
    metric
        .alternative_units()
        .iter()
        .map(|u| u.as_str().to_string())
        .collect()
}

#[async_trait]
impl MetricRepository for PostgresMetricRepository {
    async fn create(&self, metric: &Metric) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO metrics (
                id, name, description, unit_type, default_unit, alternative_units,
                data_type, metric_type, user_id, calculation_method,
                is_active, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(metric.id().as_uuid())
        .bind(metric.name())
        .bind(metric.description())
        .bind(metric.unit_type().as_str())
        .bind(metric.default_unit().as_str())
        .bind(unit_names(metric))
        .bind(metric.data_type().as_str())
        .bind(metric.metric_type().as_str())
        .bind(metric.user_id().map(|u| *u.as_uuid()))
        .bind(metric.calculation_method())
        .bind(metric.is_active())
        .bind(metric.created_at().as_datetime())
        .bind(metric.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert metric", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &MetricId) -> Result<Option<Metric>, DomainError> {
        let sql = format!("SELECT {} FROM metrics WHERE id = $1", METRIC_COLUMNS);
        let row: Option<MetricRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch metric", e))?;

        row.map(Metric::try_from).transpose()
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Metric>, DomainError> {
        let sql = format!(
            "SELECT {} FROM metrics WHERE user_id = $1 AND is_active ORDER BY name",
            METRIC_COLUMNS
        );
        let rows: Vec<MetricRow> = sqlx::query_as(&sql)
            .bind(user_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch metrics by user", e))?;

        convert_all(rows)
    }

    async fn find_accessible(&self, user_id: &UserId) -> Result<Vec<Metric>, DomainError> {
        let sql = format!(
            "SELECT {} FROM metrics \
             WHERE is_active AND (metric_type <> 'USER_CREATED' OR user_id = $1) \
             ORDER BY name",
            METRIC_COLUMNS
        );
        let rows: Vec<MetricRow> = sqlx::query_as(&sql)
            .bind(user_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch accessible metrics", e))?;

        convert_all(rows)
    }

    async fn find_all_active(&self) -> Result<Vec<Metric>, DomainError> {
        let sql = format!(
            "SELECT {} FROM metrics WHERE is_active ORDER BY name",
            METRIC_COLUMNS
        );
        let rows: Vec<MetricRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch metrics", e))?;

        convert_all(rows)
    }

    async fn update(&self, metric: &Metric) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE metrics SET
                name = $2,
                description = $3,
                alternative_units = $4,
                is_active = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(metric.id().as_uuid())
        .bind(metric.name())
        .bind(metric.description())
        .bind(unit_names(metric))
        .bind(metric.is_active())
        .bind(metric.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update metric", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::MetricNotFound,
                "Metric",
                metric.id(),
            ));
        }

        Ok(())
    }
}
