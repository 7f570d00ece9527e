//! HTTP handlers for the exercise library.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::handle_season_error;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::exercise::Exercise;
use crate::domain::season::SeasonError;
use crate::ports::ExerciseRepository;

use super::dto::ExerciseQuery;

#[derive(Clone)]
pub struct ExerciseHandlers {
    exercises: Arc<dyn ExerciseRepository>,
}

impl ExerciseHandlers {
    pub fn new(exercises: Arc<dyn ExerciseRepository>) -> Self {
        Self { exercises }
    }

    async fn search(&self, query: ExerciseQuery) -> Result<Vec<Exercise>, DomainError> {
        match (query.muscle_group, query.equipment) {
            (Some(muscle_group), Some(equipment)) => Ok(self
                .exercises
                .find_by_muscle_group(&muscle_group)
                .await?
                .into_iter()
                .filter(|e| e.uses_equipment(&equipment))
                .collect()),
            (Some(muscle_group), None) => self.exercises.find_by_muscle_group(&muscle_group).await,
            (None, Some(equipment)) => self.exercises.find_by_equipment(&equipment).await,
            (None, None) => self.exercises.find_all().await,
        }
    }
}

/// GET /api/exercises?muscle_group=&equipment=
pub async fn list_exercises(
    State(handlers): State<ExerciseHandlers>,
    Query(query): Query<ExerciseQuery>,
) -> Response {
    match handlers.search(query).await {
        Ok(exercises) => (StatusCode::OK, Json(exercises)).into_response(),
        Err(e) => handle_season_error(e.into()),
    }
}

/// GET /api/exercises/:id
pub async fn get_exercise(
    State(handlers): State<ExerciseHandlers>,
    Path(exercise_id): Path<String>,
) -> Response {
    match handlers.exercises.find_by_id(&exercise_id).await {
        Ok(Some(exercise)) => (StatusCode::OK, Json(exercise)).into_response(),
        Ok(None) => handle_season_error(SeasonError::not_found(
            ErrorCode::ExerciseNotFound,
            "Exercise",
            &exercise_id,
        )),
        Err(e) => handle_season_error(e.into()),
    }
}
