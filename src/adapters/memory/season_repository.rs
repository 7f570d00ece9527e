//! In-memory season repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, SeasonId, UserId};
use crate::domain::season::Season;
use crate::ports::SeasonRepository;

/// In-memory storage for seasons.
///
/// Enforces the (user_id, name) uniqueness a relational store would.
#[derive(Debug, Clone, Default)]
pub struct InMemorySeasonRepository {
    seasons: Arc<RwLock<HashMap<SeasonId, Season>>>,
}

impl InMemorySeasonRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored seasons (useful for tests).
    pub async fn len(&self) -> usize {
        self.seasons.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.seasons.read().await.is_empty()
    }

    fn name_taken(seasons: &HashMap<SeasonId, Season>, season: &Season) -> bool {
        seasons.values().any(|s| {
            s.id() != season.id() && s.user_id() == season.user_id() && s.name() == season.name()
        })
    }
}

fn duplicate_name(season: &Season) -> DomainError {
    DomainError::database(
        "Failed to save season",
        format!(
            "duplicate key value violates unique constraint (user_id, name)=({}, {})",
            season.user_id(),
            season.name()
        ),
    )
}

#[async_trait]
impl SeasonRepository for InMemorySeasonRepository {
    async fn create(&self, season: &Season) -> Result<(), DomainError> {
        let mut seasons = self.seasons.write().await;
        if seasons.contains_key(season.id()) || Self::name_taken(&seasons, season) {
            return Err(duplicate_name(season));
        }
        seasons.insert(*season.id(), season.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SeasonId) -> Result<Option<Season>, DomainError> {
        Ok(self.seasons.read().await.get(id).cloned())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Season>, DomainError> {
        let seasons = self.seasons.read().await;
        let mut found: Vec<Season> = seasons
            .values()
            .filter(|s| s.user_id() == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(found)
    }

    async fn find_active_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Season>, DomainError> {
        let seasons = self.seasons.read().await;
        Ok(seasons
            .values()
            .find(|s| s.user_id() == user_id && s.is_active())
            .cloned())
    }

    async fn update(&self, season: &Season) -> Result<(), DomainError> {
        let mut seasons = self.seasons.write().await;
        if !seasons.contains_key(season.id()) {
            return Err(DomainError::not_found(
                ErrorCode::SeasonNotFound,
                "Season",
                season.id(),
            ));
        }
        if Self::name_taken(&seasons, season) {
            return Err(duplicate_name(season));
        }
        seasons.insert(*season.id(), season.clone());
        Ok(())
    }

    async fn delete(&self, id: &SeasonId) -> Result<(), DomainError> {
        self.seasons
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(ErrorCode::SeasonNotFound, "Season", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn season(user: UserId, name: &str) -> Season {
        Season::new(SeasonId::new(), user, name, Some(8)).unwrap()
    }

    #[tokio::test]
    async fn create_and_find_round_trip() {
        let repo = InMemorySeasonRepository::new();
        let s = season(UserId::new(), "Summer Cut");
        repo.create(&s).await.unwrap();
        assert_eq!(repo.find_by_id(s.id()).await.unwrap(), Some(s));
        assert!(repo.find_by_id(&SeasonId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_name_for_same_user_is_a_database_error() {
        let repo = InMemorySeasonRepository::new();
        let user = UserId::new();
        repo.create(&season(user, "Cut")).await.unwrap();
        let err = repo.create(&season(user, "Cut")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(repo.create(&season(UserId::new(), "Cut")).await.is_ok());
    }

    #[tokio::test]
    async fn finds_active_season_for_user() {
        let repo = InMemorySeasonRepository::new();
        let user = UserId::new();
        let draft = season(user, "Draft");
        let active = season(user, "Live").start(None).unwrap();
        repo.create(&draft).await.unwrap();
        repo.create(&active).await.unwrap();

        let found = repo.find_active_by_user_id(&user).await.unwrap().unwrap();
        assert_eq!(found.id(), active.id());
        assert_eq!(repo.find_by_user_id(&user).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_and_delete_require_existing_season() {
        let repo = InMemorySeasonRepository::new();
        let s = season(UserId::new(), "Ghost");
        assert_eq!(
            repo.update(&s).await.unwrap_err().code,
            ErrorCode::SeasonNotFound
        );
        repo.create(&s).await.unwrap();
        let cancelled = s.cancel().unwrap();
        repo.update(&cancelled).await.unwrap();
        assert_eq!(repo.find_by_id(s.id()).await.unwrap(), Some(cancelled));
        repo.delete(s.id()).await.unwrap();
        assert!(repo.is_empty().await);
        assert!(repo.delete(s.id()).await.is_err());
    }
}
