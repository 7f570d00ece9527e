//! PostgreSQL implementation of SeasonRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::{convert_all, SeasonRow};
use crate::domain::foundation::{DomainError, ErrorCode, SeasonId, UserId};
use crate::domain::season::Season;
use crate::ports::SeasonRepository;

const SEASON_COLUMNS: &str = "id, user_id, name, duration_weeks, status, start_date, end_date, created_at, updated_at";

/// PostgreSQL implementation of SeasonRepository.
#[derive(Clone)]
pub struct PostgresSeasonRepository {
    pool: PgPool,
}

impl PostgresSeasonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SeasonRepository for PostgresSeasonRepository {
    async fn create(&self, season: &Season) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO seasons (
                id, user_id, name, duration_weeks, status,
                start_date, end_date, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(season.id().as_uuid())
        .bind(season.user_id().as_uuid())
        .bind(season.name())
        .bind(season.duration_weeks())
        .bind(season.status().as_str())
        .bind(season.start_date().map(|t| *t.as_datetime()))
        .bind(season.end_date().map(|t| *t.as_datetime()))
        .bind(season.created_at().as_datetime())
        .bind(season.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert season", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &SeasonId) -> Result<Option<Season>, DomainError> {
        let sql = format!("SELECT {} FROM seasons WHERE id = $1", SEASON_COLUMNS);
        let row: Option<SeasonRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch season", e))?;

        row.map(Season::try_from).transpose()
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Season>, DomainError> {
        let sql = format!(
            "SELECT {} FROM seasons WHERE user_id = $1 ORDER BY created_at DESC",
            SEASON_COLUMNS
        );
        let rows: Vec<SeasonRow> = sqlx::query_as(&sql)
            .bind(user_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch seasons by user", e))?;

        convert_all(rows)
    }

    async fn find_active_by_user_id(&self, user_id: &UserId) -> Result<Option<Season>, DomainError> {
        let sql = format!(
            "SELECT {} FROM seasons WHERE user_id = $1 AND status = 'ACTIVE' \
             ORDER BY start_date DESC NULLS LAST LIMIT 1",
            SEASON_COLUMNS
        );
        let row: Option<SeasonRow> = sqlx::query_as(&sql)
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch active season", e))?;

        row.map(Season::try_from).transpose()
    }

    async fn update(&self, season: &Season) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE seasons SET
                name = $2,
                duration_weeks = $3,
                status = $4,
                start_date = $5,
                end_date = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(season.id().as_uuid())
        .bind(season.name())
        .bind(season.duration_weeks())
        .bind(season.status().as_str())
        .bind(season.start_date().map(|t| *t.as_datetime()))
        .bind(season.end_date().map(|t| *t.as_datetime()))
        .bind(season.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update season", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::SeasonNotFound,
                "Season",
                season.id(),
            ));
        }

        Ok(())
    }

    async fn delete(&self, id: &SeasonId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM seasons WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete season", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(ErrorCode::SeasonNotFound, "Season", id));
        }

        Ok(())
    }
}
