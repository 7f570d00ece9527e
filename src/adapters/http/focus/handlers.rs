//! HTTP handlers for the read-only pillar catalog.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{handle_season_error, parse_id};
use crate::application::SeasonFocusService;
use crate::domain::foundation::PillarId;

#[derive(Clone)]
pub struct FocusHandlers {
    focus: Arc<SeasonFocusService>,
}

impl FocusHandlers {
    pub fn new(focus: Arc<SeasonFocusService>) -> Self {
        Self { focus }
    }
}

/// GET /api/focus/pillars - Every active pillar with its predefined areas
pub async fn list_pillars(State(handlers): State<FocusHandlers>) -> Response {
    match handlers.focus.get_pillars_with_areas().await {
        Ok(pillars) => (StatusCode::OK, Json(pillars)).into_response(),
        Err(e) => handle_season_error(e),
    }
}

/// GET /api/focus/pillars/:id
pub async fn get_pillar(
    State(handlers): State<FocusHandlers>,
    Path(pillar_id): Path<String>,
) -> Response {
    let pillar_id = match parse_id::<PillarId>(&pillar_id, "pillar") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.focus.get_pillar_with_areas(&pillar_id).await {
        Ok(pillar) => (StatusCode::OK, Json(pillar)).into_response(),
        Err(e) => handle_season_error(e),
    }
}

/// GET /api/focus/areas
pub async fn list_areas(State(handlers): State<FocusHandlers>) -> Response {
    match handlers.focus.get_all_areas().await {
        Ok(areas) => (StatusCode::OK, Json(areas)).into_response(),
        Err(e) => handle_season_error(e),
    }
}
