//! HTTP handlers for progress logging.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{handle_season_error, parse_id};
use crate::application::{LogProgressCommand, ProgressLogService, UpdateProgressLogCommand};
use crate::domain::foundation::{ProgressLogId, Timestamp};

use super::dto::{DeleteProgressQuery, LogProgressRequest, ProgressQuery, UpdateProgressRequest};

#[derive(Clone)]
pub struct ProgressHandlers {
    progress: Arc<ProgressLogService>,
}

impl ProgressHandlers {
    pub fn new(progress: Arc<ProgressLogService>) -> Self {
        Self { progress }
    }
}

/// POST /api/progress - Record a manual value
pub async fn log_progress(
    State(handlers): State<ProgressHandlers>,
    Json(req): Json<LogProgressRequest>,
) -> Response {
    let cmd = LogProgressCommand {
        season_id: req.season_id,
        metric_id: req.metric_id,
        user_id: req.user_id,
        value: req.value,
        unit: req.unit,
        logged_at: req.logged_at.map(Timestamp::from),
        notes: req.notes,
    };

    match handlers.progress.log_progress(cmd).await {
        Ok(log) => (StatusCode::CREATED, Json(log)).into_response(),
        Err(e) => handle_season_error(e),
    }
}

/// GET /api/progress?season_id=&metric_id= - Newest entries first
pub async fn list_progress(
    State(handlers): State<ProgressHandlers>,
    Query(query): Query<ProgressQuery>,
) -> Response {
    match handlers
        .progress
        .list_progress(&query.season_id, &query.metric_id)
        .await
    {
        Ok(logs) => (StatusCode::OK, Json(logs)).into_response(),
        Err(e) => handle_season_error(e),
    }
}

/// PUT /api/progress/:id
pub async fn update_progress(
    State(handlers): State<ProgressHandlers>,
    Path(log_id): Path<String>,
    Json(req): Json<UpdateProgressRequest>,
) -> Response {
    let log_id = match parse_id::<ProgressLogId>(&log_id, "progress log") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = UpdateProgressLogCommand {
        log_id,
        user_id: req.user_id,
        value: req.value,
        unit: req.unit,
        logged_at: req.logged_at.map(Timestamp::from),
        notes: req.notes,
    };

    match handlers.progress.update_progress_log(cmd).await {
        Ok(log) => (StatusCode::OK, Json(log)).into_response(),
        Err(e) => handle_season_error(e),
    }
}

/// DELETE /api/progress/:id?user_id=
pub async fn delete_progress(
    State(handlers): State<ProgressHandlers>,
    Path(log_id): Path<String>,
    Query(query): Query<DeleteProgressQuery>,
) -> Response {
    let log_id = match parse_id::<ProgressLogId>(&log_id, "progress log") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .progress
        .delete_progress_log(&log_id, &query.user_id)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_season_error(e),
    }
}
