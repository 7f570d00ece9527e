//! Season repository port.
//!
//! Defines the contract for persisting and retrieving Season aggregates.
//!
//! # Design
//!
//! - **User-scoped**: most queries are by user_id
//! - **(user_id, name) is unique**: implementations surface the store's
//!   violation as `DatabaseError`

use crate::domain::foundation::{DomainError, SeasonId, UserId};
use crate::domain::season::Season;
use async_trait::async_trait;

/// Repository port for Season aggregate persistence.
#[async_trait]
pub trait SeasonRepository: Send + Sync {
    /// Save a new season.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure or duplicate (user_id, name)
    async fn create(&self, season: &Season) -> Result<(), DomainError>;

    /// Find a season by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SeasonId) -> Result<Option<Season>, DomainError>;

    /// Find all seasons owned by a user, newest first.
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Season>, DomainError>;

    /// Find the user's ACTIVE season, if any.
    async fn find_active_by_user_id(&self, user_id: &UserId)
        -> Result<Option<Season>, DomainError>;

    /// Update an existing season.
    ///
    /// # Errors
    ///
    /// - `SeasonNotFound` if the season doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, season: &Season) -> Result<(), DomainError>;

    /// Delete a season.
    ///
    /// # Errors
    ///
    /// - `SeasonNotFound` if the season doesn't exist
    async fn delete(&self, id: &SeasonId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn SeasonRepository) {}
    }
}
