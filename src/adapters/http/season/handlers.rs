//! HTTP handlers for season creation and lifecycle endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{handle_season_error, parse_id};
use crate::application::{
    AddAreaOfFocusCommand, AddMetricCommand, CreateDraftSeasonCommand, SeasonCreationService,
    SeasonLifecycleService, UpdateMetricGoalCommand, UpdateSeasonMetadataCommand,
};
use crate::domain::foundation::{
    PillarId, SeasonAreaMetricId, SeasonId, SeasonPillarAreaId, Timestamp, UserId,
};
use crate::domain::season::{Season, SeasonError};

use super::dto::{
    AddAreaRequest, AddMetricRequest, CreateSeasonRequest, CreatedResponse, SeasonResponse,
    SetThemeRequest, TransitionRequest, UpdateGoalRequest, UpdateSeasonRequest, UserQuery,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SeasonHandlers {
    creation: Arc<SeasonCreationService>,
    lifecycle: Arc<SeasonLifecycleService>,
}

impl SeasonHandlers {
    pub fn new(
        creation: Arc<SeasonCreationService>,
        lifecycle: Arc<SeasonLifecycleService>,
    ) -> Self {
        Self {
            creation,
            lifecycle,
        }
    }
}

fn season_response(result: Result<Season, SeasonError>) -> Response {
    match result {
        Ok(season) => (StatusCode::OK, Json(SeasonResponse::from(season))).into_response(),
        Err(e) => handle_season_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Creation
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/seasons - Create a draft season with the Health pillar attached
pub async fn create_season(
    State(handlers): State<SeasonHandlers>,
    Json(req): Json<CreateSeasonRequest>,
) -> Response {
    let cmd = CreateDraftSeasonCommand {
        user_id: req.user_id,
        name: req.name,
        duration_weeks: req.duration_weeks,
    };

    match handlers.creation.create_draft_season(cmd).await {
        Ok(view) => (StatusCode::CREATED, Json(view)).into_response(),
        Err(e) => handle_season_error(e),
    }
}

/// GET /api/seasons/:id - Fully expanded season
pub async fn get_season(
    State(handlers): State<SeasonHandlers>,
    Path(season_id): Path<String>,
) -> Response {
    let season_id = match parse_id::<SeasonId>(&season_id, "season") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.creation.get_season_creation_view(&season_id).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => handle_season_error(e),
    }
}

/// PUT /api/seasons/:id/pillars/:pillar_id/theme
pub async fn set_pillar_theme(
    State(handlers): State<SeasonHandlers>,
    Path((season_id, pillar_id)): Path<(String, String)>,
    Json(req): Json<SetThemeRequest>,
) -> Response {
    let season_id = match parse_id::<SeasonId>(&season_id, "season") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let pillar_id = match parse_id::<PillarId>(&pillar_id, "pillar") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .creation
        .set_pillar_theme(&season_id, &pillar_id, &req.theme)
        .await
    {
        Ok(season_pillar) => (StatusCode::OK, Json(season_pillar)).into_response(),
        Err(e) => handle_season_error(e),
    }
}

/// POST /api/seasons/areas - Attach an area of focus to a season pillar
pub async fn add_area(
    State(handlers): State<SeasonHandlers>,
    Json(req): Json<AddAreaRequest>,
) -> Response {
    let cmd = AddAreaOfFocusCommand {
        season_pillar_id: req.season_pillar_id,
        area_of_focus_id: req.area_of_focus_id,
    };

    match handlers.creation.add_area_of_focus_to_season_pillar(cmd).await {
        Ok(area) => (StatusCode::CREATED, Json(CreatedResponse::new(area.id()))).into_response(),
        Err(e) => handle_season_error(e),
    }
}

/// DELETE /api/seasons/areas/:id
pub async fn remove_area(
    State(handlers): State<SeasonHandlers>,
    Path(area_id): Path<String>,
) -> Response {
    let area_id = match parse_id::<SeasonPillarAreaId>(&area_id, "season area") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .creation
        .remove_area_of_focus_from_season_pillar(&area_id)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_season_error(e),
    }
}

/// POST /api/seasons/metrics - Attach a metric, optionally creating its goal
pub async fn add_metric(
    State(handlers): State<SeasonHandlers>,
    Json(req): Json<AddMetricRequest>,
) -> Response {
    let cmd = AddMetricCommand {
        season_pillar_area_id: req.season_pillar_area_id,
        metric_id: req.metric_id,
        baseline: req.baseline.map(Into::into),
        target: req.target.map(Into::into),
    };

    match handlers.creation.add_metric_to_season_area(cmd).await {
        Ok(result) => {
            let mut response = CreatedResponse::new(result.season_area_metric.id());
            response.goal_id = result.goal.map(|g| g.id().to_string());
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_season_error(e),
    }
}

/// DELETE /api/seasons/metrics/:id
pub async fn remove_metric(
    State(handlers): State<SeasonHandlers>,
    Path(metric_id): Path<String>,
) -> Response {
    let metric_id = match parse_id::<SeasonAreaMetricId>(&metric_id, "season metric") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.creation.remove_metric_from_season_area(&metric_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_season_error(e),
    }
}

/// PUT /api/seasons/metrics/:id/goal - Set or replace a metric goal
pub async fn update_goal(
    State(handlers): State<SeasonHandlers>,
    Path(metric_id): Path<String>,
    Json(req): Json<UpdateGoalRequest>,
) -> Response {
    let metric_id = match parse_id::<SeasonAreaMetricId>(&metric_id, "season metric") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = UpdateMetricGoalCommand {
        season_area_metric_id: metric_id,
        goal: req.goal.into(),
        start: req.start.map(Into::into),
        target_date: req.target_date,
        notes: req.notes,
    };

    match handlers.creation.update_metric_goal(cmd).await {
        Ok(goal) => (StatusCode::OK, Json(goal)).into_response(),
        Err(e) => handle_season_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Lifecycle
// ════════════════════════════════════════════════════════════════════════════

/// PUT /api/seasons/:id - Rename or resize a draft season
pub async fn update_season(
    State(handlers): State<SeasonHandlers>,
    Path(season_id): Path<String>,
    Json(req): Json<UpdateSeasonRequest>,
) -> Response {
    let season_id = match parse_id::<SeasonId>(&season_id, "season") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = UpdateSeasonMetadataCommand {
        season_id,
        user_id: req.user_id,
        name: req.name,
        duration_weeks: req.duration_weeks,
    };
    season_response(handlers.lifecycle.update_metadata(cmd).await)
}

/// DELETE /api/seasons/:id?user_id=
pub async fn delete_season(
    State(handlers): State<SeasonHandlers>,
    Path(season_id): Path<String>,
    Query(query): Query<UserQuery>,
) -> Response {
    let season_id = match parse_id::<SeasonId>(&season_id, "season") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.lifecycle.delete(&season_id, &query.user_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_season_error(e),
    }
}

/// Parsed input shared by the lifecycle transition endpoints.
struct Transition {
    season_id: SeasonId,
    user_id: UserId,
    date: Option<Timestamp>,
}

fn parse_transition(season_id: &str, req: TransitionRequest) -> Result<Transition, Response> {
    Ok(Transition {
        season_id: parse_id(season_id, "season")?,
        user_id: req.user_id,
        date: req.date.map(Timestamp::from),
    })
}

/// POST /api/seasons/:id/start
pub async fn start_season(
    State(handlers): State<SeasonHandlers>,
    Path(season_id): Path<String>,
    Json(req): Json<TransitionRequest>,
) -> Response {
    let t = match parse_transition(&season_id, req) {
        Ok(t) => t,
        Err(response) => return response,
    };
    season_response(handlers.lifecycle.start(&t.season_id, &t.user_id, t.date).await)
}

/// POST /api/seasons/:id/pause
pub async fn pause_season(
    State(handlers): State<SeasonHandlers>,
    Path(season_id): Path<String>,
    Json(req): Json<TransitionRequest>,
) -> Response {
    let t = match parse_transition(&season_id, req) {
        Ok(t) => t,
        Err(response) => return response,
    };
    season_response(handlers.lifecycle.pause(&t.season_id, &t.user_id).await)
}

/// POST /api/seasons/:id/resume
pub async fn resume_season(
    State(handlers): State<SeasonHandlers>,
    Path(season_id): Path<String>,
    Json(req): Json<TransitionRequest>,
) -> Response {
    let t = match parse_transition(&season_id, req) {
        Ok(t) => t,
        Err(response) => return response,
    };
    season_response(handlers.lifecycle.resume(&t.season_id, &t.user_id).await)
}

/// POST /api/seasons/:id/complete
pub async fn complete_season(
    State(handlers): State<SeasonHandlers>,
    Path(season_id): Path<String>,
    Json(req): Json<TransitionRequest>,
) -> Response {
    let t = match parse_transition(&season_id, req) {
        Ok(t) => t,
        Err(response) => return response,
    };
    season_response(
        handlers
            .lifecycle
            .complete(&t.season_id, &t.user_id, t.date)
            .await,
    )
}

/// POST /api/seasons/:id/cancel
pub async fn cancel_season(
    State(handlers): State<SeasonHandlers>,
    Path(season_id): Path<String>,
    Json(req): Json<TransitionRequest>,
) -> Response {
    let t = match parse_transition(&season_id, req) {
        Ok(t) => t,
        Err(response) => return response,
    };
    season_response(handlers.lifecycle.cancel(&t.season_id, &t.user_id).await)
}

/// POST /api/seasons/:id/archive
pub async fn archive_season(
    State(handlers): State<SeasonHandlers>,
    Path(season_id): Path<String>,
    Json(req): Json<TransitionRequest>,
) -> Response {
    let t = match parse_transition(&season_id, req) {
        Ok(t) => t,
        Err(response) => return response,
    };
    season_response(handlers.lifecycle.archive(&t.season_id, &t.user_id).await)
}
