//! Pillar repository port (read-only).
//!
//! Pillars are system-seeded; no create or delete is exposed.

use crate::domain::foundation::{DomainError, PillarId};
use crate::domain::pillar::{Pillar, PillarName};
use async_trait::async_trait;

/// Lookup port for the five system pillars.
#[async_trait]
pub trait PillarRepository: Send + Sync {
    /// Find a pillar by its ID.
    async fn find_by_id(&self, id: &PillarId) -> Result<Option<Pillar>, DomainError>;

    /// Find a pillar by its fixed name.
    async fn find_by_name(&self, name: PillarName) -> Result<Option<Pillar>, DomainError>;

    /// All active pillars ordered by sort_order ascending.
    async fn find_all_active(&self) -> Result<Vec<Pillar>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pillar_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn PillarRepository) {}
    }
}
