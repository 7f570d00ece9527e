//! Exercise library port (read-only).

use crate::domain::exercise::Exercise;
use crate::domain::foundation::DomainError;
use async_trait::async_trait;

/// Read-only access to the exercise library.
///
/// Muscle group and equipment filters are case-insensitive exact matches.
#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// Every exercise, ordered by name.
    async fn find_all(&self) -> Result<Vec<Exercise>, DomainError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Exercise>, DomainError>;

    async fn find_by_muscle_group(&self, muscle_group: &str)
        -> Result<Vec<Exercise>, DomainError>;

    async fn find_by_equipment(&self, equipment: &str) -> Result<Vec<Exercise>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exercise_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ExerciseRepository) {}
    }
}
