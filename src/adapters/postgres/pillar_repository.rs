//! PostgreSQL implementation of PillarRepository.
//!
//! Pillars are seeded by migration and never written by the application.

use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::{convert_all, PillarRow};
use crate::domain::foundation::{DomainError, PillarId};
use crate::domain::pillar::{Pillar, PillarName};
use crate::ports::PillarRepository;

/// PostgreSQL implementation of PillarRepository.
#[derive(Clone)]
pub struct PostgresPillarRepository {
    pool: PgPool,
}

impl PostgresPillarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PillarRepository for PostgresPillarRepository {
    async fn find_by_id(&self, id: &PillarId) -> Result<Option<Pillar>, DomainError> {
        let row: Option<PillarRow> = sqlx::query_as(
            r#"
            SELECT id, name, display_name, description, sort_order, is_active, created_at, updated_at
            FROM pillars
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch pillar", e))?;

        row.map(Pillar::try_from).transpose()
    }

    async fn find_by_name(&self, name: PillarName) -> Result<Option<Pillar>, DomainError> {
        let row: Option<PillarRow> = sqlx::query_as(
            r#"
            SELECT id, name, display_name, description, sort_order, is_active, created_at, updated_at
            FROM pillars
            WHERE name = $1
            "#,
        )
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch pillar by name", e))?;

        row.map(Pillar::try_from).transpose()
    }

    async fn find_all_active(&self) -> Result<Vec<Pillar>, DomainError> {
        let rows: Vec<PillarRow> = sqlx::query_as(
            r#"
            SELECT id, name, display_name, description, sort_order, is_active, created_at, updated_at
            FROM pillars
            WHERE is_active
            ORDER BY sort_order
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch pillars", e))?;

        convert_all(rows)
    }
}
