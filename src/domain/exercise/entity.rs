//! Exercise library entry.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{rules, ValidationError};

/// Difficulty label attached to library exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseLevel {
    Beginner,
    Intermediate,
    Expert,
}

/// A read-only reference exercise.
///
/// Identified by the dataset's string key, not a UUID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub level: Option<ExerciseLevel>,
    #[serde(default)]
    pub equipment: Option<String>,
    pub muscle_groups: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

impl Exercise {
    /// Checks the fields every dataset entry must carry.
    pub fn validate(&self) -> Result<(), ValidationError> {
        rules::require_text("id", &self.id, rules::MAX_NAME_LENGTH)?;
        rules::require_text("name", &self.name, rules::MAX_REFERENCE_LENGTH)?;
        if self.muscle_groups.is_empty() {
            return Err(ValidationError::empty_field("muscle_groups"));
        }
        Ok(())
    }

    /// Case-insensitive exact match against any targeted muscle group.
    pub fn targets_muscle_group(&self, muscle_group: &str) -> bool {
        self.muscle_groups
            .iter()
            .any(|m| m.eq_ignore_ascii_case(muscle_group.trim()))
    }

    /// Case-insensitive exact match on equipment.
    pub fn uses_equipment(&self, equipment: &str) -> bool {
        self.equipment
            .as_deref()
            .is_some_and(|e| e.eq_ignore_ascii_case(equipment.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squat() -> Exercise {
        Exercise {
            id: "barbell_back_squat".to_string(),
            name: "Barbell Back Squat".to_string(),
            category: Some("strength".to_string()),
            level: Some(ExerciseLevel::Intermediate),
            equipment: Some("Barbell".to_string()),
            muscle_groups: vec!["quadriceps".to_string(), "glutes".to_string()],
            instructions: vec![],
        }
    }

    #[test]
    fn muscle_group_match_ignores_case_but_not_substrings() {
        let ex = squat();
        assert!(ex.targets_muscle_group("Quadriceps"));
        assert!(ex.targets_muscle_group("GLUTES"));
        assert!(!ex.targets_muscle_group("quad"));
    }

    #[test]
    fn equipment_match_ignores_case() {
        let ex = squat();
        assert!(ex.uses_equipment("barbell"));
        assert!(!ex.uses_equipment("dumbbell"));

        let bodyweight = Exercise {
            equipment: None,
            ..squat()
        };
        assert!(!bodyweight.uses_equipment("barbell"));
    }

    #[test]
    fn validate_requires_muscle_groups() {
        assert!(squat().validate().is_ok());
        let bare = Exercise {
            muscle_groups: vec![],
            ..squat()
        };
        assert!(bare.validate().is_err());
    }
}
