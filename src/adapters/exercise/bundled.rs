//! Bundled exercise library.
//!
//! The dataset is embedded in the binary via `include_str!` and parsed once
//! on first use.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::debug;

use crate::domain::exercise::Exercise;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::ExerciseRepository;

static BUNDLED: Lazy<Result<Arc<Vec<Exercise>>, String>> = Lazy::new(|| {
    parse_dataset(include_str!("../../../data/exercises.json"))
        .map(Arc::new)
        .map_err(|e| e.message)
});

fn parse_dataset(json: &str) -> Result<Vec<Exercise>, DomainError> {
    let mut exercises: Vec<Exercise> = serde_json::from_str(json).map_err(|e| {
        DomainError::new(
            ErrorCode::InternalError,
            format!("Failed to parse exercise dataset: {}", e),
        )
    })?;
    for exercise in &exercises {
        exercise.validate().map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Invalid exercise '{}': {}", exercise.id, e),
            )
        })?;
    }
    exercises.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(exercises)
}

/// Read-only, in-memory exercise library.
#[derive(Debug, Clone)]
pub struct BundledExerciseRepository {
    exercises: Arc<Vec<Exercise>>,
}

impl BundledExerciseRepository {
    /// Loads the dataset compiled into the binary.
    ///
    /// # Errors
    ///
    /// - `InternalError` if the bundled JSON is malformed
    pub fn load() -> Result<Self, DomainError> {
        match &*BUNDLED {
            Ok(exercises) => {
                debug!(count = exercises.len(), "Exercise library loaded");
                Ok(Self {
                    exercises: Arc::clone(exercises),
                })
            }
            Err(message) => Err(DomainError::new(ErrorCode::InternalError, message.clone())),
        }
    }

    /// Builds a library from caller-supplied JSON.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        Ok(Self {
            exercises: Arc::new(parse_dataset(json)?),
        })
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    fn filter<F>(&self, keep: F) -> Vec<Exercise>
    where
        F: Fn(&Exercise) -> bool,
    {
        self.exercises.iter().filter(|e| keep(e)).cloned().collect()
    }
}

#[async_trait]
impl ExerciseRepository for BundledExerciseRepository {
    async fn find_all(&self) -> Result<Vec<Exercise>, DomainError> {
        Ok(self.exercises.as_ref().clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Exercise>, DomainError> {
        Ok(self.exercises.iter().find(|e| e.id == id).cloned())
    }

    async fn find_by_muscle_group(
        &self,
        muscle_group: &str,
    ) -> Result<Vec<Exercise>, DomainError> {
        Ok(self.filter(|e| e.targets_muscle_group(muscle_group)))
    }

    async fn find_by_equipment(&self, equipment: &str) -> Result<Vec<Exercise>, DomainError> {
        Ok(self.filter(|e| e.uses_equipment(equipment)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_dataset_parses() {
        let repo = BundledExerciseRepository::load().unwrap();
        assert!(!repo.is_empty());
    }

    #[tokio::test]
    async fn filters_are_case_insensitive_exact_matches() {
        let repo = BundledExerciseRepository::load().unwrap();

        let barbell = repo.find_by_equipment("BARBELL").await.unwrap();
        assert!(!barbell.is_empty());
        assert!(barbell.iter().all(|e| e.equipment.as_deref() == Some("barbell")));

        let quads = repo.find_by_muscle_group("Quadriceps").await.unwrap();
        assert!(quads.iter().any(|e| e.id == "barbell_back_squat"));
        assert!(repo.find_by_muscle_group("quad").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_by_id_and_all_sorted_by_name() {
        let repo = BundledExerciseRepository::load().unwrap();
        let plank = repo.find_by_id("plank").await.unwrap().unwrap();
        assert_eq!(plank.name, "Plank");
        assert!(repo.find_by_id("missing").await.unwrap().is_none());

        let all = repo.find_all().await.unwrap();
        let mut names: Vec<&str> = all.iter().map(|e| e.name.as_str()).collect();
        let original = names.clone();
        names.sort();
        assert_eq!(names, original);
    }

    #[test]
    fn malformed_dataset_is_an_internal_error() {
        let err = BundledExerciseRepository::from_json("{not json").unwrap_err();
        assert_eq!(err.code, ErrorCode::InternalError);

        let err = BundledExerciseRepository::from_json(
            r#"[{"id": "x", "name": "X", "muscle_groups": []}]"#,
        )
        .unwrap_err();
        assert!(err.message.contains("Invalid exercise"));
    }
}
