//! Area of focus repository port.

use crate::domain::area_of_focus::AreaOfFocus;
use crate::domain::foundation::{AreaOfFocusId, DomainError, PillarId, UserId};
use async_trait::async_trait;

/// Repository port for areas of focus.
///
/// List queries return active areas ordered by name ascending.
#[async_trait]
pub trait AreaOfFocusRepository: Send + Sync {
    /// Save a new area.
    async fn create(&self, area: &AreaOfFocus) -> Result<(), DomainError>;

    /// Find an area by its ID, active or not.
    async fn find_by_id(&self, id: &AreaOfFocusId) -> Result<Option<AreaOfFocus>, DomainError>;

    /// Active areas under a pillar, predefined and user-created.
    async fn find_by_pillar_id(&self, pillar_id: &PillarId)
        -> Result<Vec<AreaOfFocus>, DomainError>;

    /// Active predefined areas under a pillar.
    async fn find_predefined_by_pillar_id(
        &self,
        pillar_id: &PillarId,
    ) -> Result<Vec<AreaOfFocus>, DomainError>;

    /// Active areas created by a user.
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<AreaOfFocus>, DomainError>;

    /// Active areas a user may select: predefined plus their own.
    async fn find_accessible(&self, user_id: &UserId) -> Result<Vec<AreaOfFocus>, DomainError>;

    /// Every active area.
    async fn find_all_active(&self) -> Result<Vec<AreaOfFocus>, DomainError>;

    /// Update an existing area.
    ///
    /// # Errors
    ///
    /// - `AreaOfFocusNotFound` if the area doesn't exist
    async fn update(&self, area: &AreaOfFocus) -> Result<(), DomainError>;
}
