//! In-memory area of focus repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::seed;
use crate::domain::area_of_focus::AreaOfFocus;
use crate::domain::foundation::{AreaOfFocusId, DomainError, ErrorCode, PillarId, UserId};
use crate::ports::AreaOfFocusRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryAreaOfFocusRepository {
    areas: Arc<RwLock<HashMap<AreaOfFocusId, AreaOfFocus>>>,
}

impl InMemoryAreaOfFocusRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding the predefined areas.
    pub fn seeded() -> Result<Self, DomainError> {
        let map = seed::predefined_areas()?
            .into_iter()
            .map(|a| (*a.id(), a))
            .collect();
        Ok(Self {
            areas: Arc::new(RwLock::new(map)),
        })
    }

    async fn active_where<F>(&self, keep: F) -> Vec<AreaOfFocus>
    where
        F: Fn(&AreaOfFocus) -> bool,
    {
        let areas = self.areas.read().await;
        let mut found: Vec<AreaOfFocus> = areas
            .values()
            .filter(|a| a.is_active() && keep(a))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name().cmp(b.name()));
        found
    }
}

#[async_trait]
impl AreaOfFocusRepository for InMemoryAreaOfFocusRepository {
    async fn create(&self, area: &AreaOfFocus) -> Result<(), DomainError> {
        let mut areas = self.areas.write().await;
        if areas.contains_key(area.id()) {
            return Err(DomainError::database(
                "Failed to create area of focus",
                format!("duplicate key {}", area.id()),
            ));
        }
        areas.insert(*area.id(), area.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &AreaOfFocusId) -> Result<Option<AreaOfFocus>, DomainError> {
        Ok(self.areas.read().await.get(id).cloned())
    }

    async fn find_by_pillar_id(
        &self,
        pillar_id: &PillarId,
    ) -> Result<Vec<AreaOfFocus>, DomainError> {
        Ok(self.active_where(|a| a.pillar_id() == pillar_id).await)
    }

    async fn find_predefined_by_pillar_id(
        &self,
        pillar_id: &PillarId,
    ) -> Result<Vec<AreaOfFocus>, DomainError> {
        Ok(self
            .active_where(|a| a.is_predefined() && a.pillar_id() == pillar_id)
            .await)
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<AreaOfFocus>, DomainError> {
        Ok(self.active_where(|a| a.user_id() == Some(user_id)).await)
    }

    async fn find_accessible(&self, user_id: &UserId) -> Result<Vec<AreaOfFocus>, DomainError> {
        Ok(self
            .active_where(|a| a.is_predefined() || a.user_id() == Some(user_id))
            .await)
    }

    async fn find_all_active(&self) -> Result<Vec<AreaOfFocus>, DomainError> {
        Ok(self.active_where(|_| true).await)
    }

    async fn update(&self, area: &AreaOfFocus) -> Result<(), DomainError> {
        let mut areas = self.areas.write().await;
        match areas.get_mut(area.id()) {
            Some(stored) => {
                *stored = area.clone();
                Ok(())
            }
            None => Err(DomainError::not_found(
                ErrorCode::AreaOfFocusNotFound,
                "Area of focus",
                area.id(),
            )),
        }
    }
}
