//! In-memory pillar repository, seeded with the system pillars.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::seed;
use crate::domain::foundation::{DomainError, PillarId};
use crate::domain::pillar::{Pillar, PillarName};
use crate::ports::PillarRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryPillarRepository {
    pillars: Arc<RwLock<HashMap<PillarId, Pillar>>>,
}

impl InMemoryPillarRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding the five system pillars.
    pub fn seeded() -> Result<Self, DomainError> {
        Ok(Self::with_pillars(seed::system_pillars()?))
    }

    pub fn with_pillars(pillars: impl IntoIterator<Item = Pillar>) -> Self {
        let map = pillars.into_iter().map(|p| (*p.id(), p)).collect();
        Self {
            pillars: Arc::new(RwLock::new(map)),
        }
    }

    /// Replace or insert a pillar (system maintenance and tests).
    pub async fn put(&self, pillar: Pillar) {
        self.pillars.write().await.insert(*pillar.id(), pillar);
    }
}

#[async_trait]
impl PillarRepository for InMemoryPillarRepository {
    async fn find_by_id(&self, id: &PillarId) -> Result<Option<Pillar>, DomainError> {
        Ok(self.pillars.read().await.get(id).cloned())
    }

    async fn find_by_name(&self, name: PillarName) -> Result<Option<Pillar>, DomainError> {
        let pillars = self.pillars.read().await;
        Ok(pillars.values().find(|p| p.name() == name).cloned())
    }

    async fn find_all_active(&self) -> Result<Vec<Pillar>, DomainError> {
        let pillars = self.pillars.read().await;
        let mut active: Vec<Pillar> = pillars.values().filter(|p| p.is_active()).cloned().collect();
        active.sort_by_key(|p| p.sort_order());
        Ok(active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_pillars_come_back_in_sort_order() {
        let repo = InMemoryPillarRepository::seeded().unwrap();
        let names: Vec<PillarName> = repo
            .find_all_active()
            .await
            .unwrap()
            .iter()
            .map(|p| p.name())
            .collect();
        assert_eq!(names, PillarName::ALL.to_vec());
    }

    #[tokio::test]
    async fn inactive_pillars_are_hidden_from_listing_only() {
        let repo = InMemoryPillarRepository::seeded().unwrap();
        let wealth = repo.find_by_name(PillarName::Wealth).await.unwrap().unwrap();
        repo.put(wealth.deactivate()).await;

        assert_eq!(repo.find_all_active().await.unwrap().len(), 4);
        assert!(repo.find_by_id(wealth.id()).await.unwrap().is_some());
    }
}
