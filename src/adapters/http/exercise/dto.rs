use serde::Deserialize;

/// Optional filters for `GET /api/exercises`.
///
/// When both are given an exercise must match both.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExerciseQuery {
    pub muscle_group: Option<String>,
    pub equipment: Option<String>,
}
