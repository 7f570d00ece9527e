//! PostgreSQL implementation of AreaOfFocusRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::{convert_all, AreaOfFocusRow};
use crate::domain::area_of_focus::AreaOfFocus;
use crate::domain::foundation::{AreaOfFocusId, DomainError, ErrorCode, PillarId, UserId};
use crate::ports::AreaOfFocusRepository;

const AREA_COLUMNS: &str =
    "id, name, description, pillar_id, user_id, area_type, is_active, created_at, updated_at";

/// PostgreSQL implementation of AreaOfFocusRepository.
#[derive(Clone)]
pub struct PostgresAreaOfFocusRepository {
    pool: PgPool,
}

impl PostgresAreaOfFocusRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_many(
        &self,
        filter: &str,
        bind: Option<uuid::Uuid>,
        context: &str,
    ) -> Result<Vec<AreaOfFocus>, DomainError> {
        let sql = format!(
            "SELECT {} FROM areas_of_focus WHERE {} ORDER BY name",
            AREA_COLUMNS, filter
        );
        let mut query = sqlx::query_as::<_, AreaOfFocusRow>(&sql);
        if let Some(id) = bind {
            query = query.bind(id);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(context, e))?;

        convert_all(rows)
    }
}

#[async_trait]
impl AreaOfFocusRepository for PostgresAreaOfFocusRepository {
    async fn create(&self, area: &AreaOfFocus) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO areas_of_focus (
                id, name, description, pillar_id, user_id, area_type,
                is_active, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(area.id().as_uuid())
        .bind(area.name())
        .bind(area.description())
        .bind(area.pillar_id().as_uuid())
        .bind(area.user_id().map(|u| *u.as_uuid()))
        .bind(area.area_type().as_str())
        .bind(area.is_active())
        .bind(area.created_at().as_datetime())
        .bind(area.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert area of focus", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &AreaOfFocusId) -> Result<Option<AreaOfFocus>, DomainError> {
        let sql = format!("SELECT {} FROM areas_of_focus WHERE id = $1", AREA_COLUMNS);
        let row: Option<AreaOfFocusRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch area of focus", e))?;

        row.map(AreaOfFocus::try_from).transpose()
    }

    async fn find_by_pillar_id(&self, pillar_id: &PillarId) -> Result<Vec<AreaOfFocus>, DomainError> {
        self.fetch_many(
            "pillar_id = $1 AND is_active",
            Some(*pillar_id.as_uuid()),
            "Failed to fetch areas by pillar",
        )
        .await
    }

    async fn find_predefined_by_pillar_id(
        &self,
        pillar_id: &PillarId,
    ) -> Result<Vec<AreaOfFocus>, DomainError> {
        self.fetch_many(
            "pillar_id = $1 AND area_type = 'PREDEFINED' AND is_active",
            Some(*pillar_id.as_uuid()),
            "Failed to fetch predefined areas",
        )
        .await
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<AreaOfFocus>, DomainError> {
        self.fetch_many(
            "user_id = $1 AND is_active",
            Some(*user_id.as_uuid()),
            "Failed to fetch areas by user",
        )
        .await
    }

    async fn find_accessible(&self, user_id: &UserId) -> Result<Vec<AreaOfFocus>, DomainError> {
        self.fetch_many(
            "is_active AND (area_type = 'PREDEFINED' OR user_id = $1)",
            Some(*user_id.as_uuid()),
            "Failed to fetch accessible areas",
        )
        .await
    }

    async fn find_all_active(&self) -> Result<Vec<AreaOfFocus>, DomainError> {
        self.fetch_many("is_active", None, "Failed to fetch areas of focus")
            .await
    }

    async fn update(&self, area: &AreaOfFocus) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE areas_of_focus SET
                name = $2,
                description = $3,
                is_active = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(area.id().as_uuid())
        .bind(area.name())
        .bind(area.description())
        .bind(area.is_active())
        .bind(area.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update area of focus", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::AreaOfFocusNotFound,
                "Area of focus",
                area.id(),
            ));
        }

        Ok(())
    }
}
