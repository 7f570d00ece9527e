//! JSON error bodies and the `SeasonError` to status code mapping.

use std::str::FromStr;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::season::SeasonError;

/// Error body returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            field: None,
        }
    }
}

/// Response for a malformed path or query parameter.
pub fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(message))).into_response()
}

/// Parses a path id, producing the 400 response on failure.
pub fn parse_id<T: FromStr>(raw: &str, label: &str) -> Result<T, Response> {
    raw.parse::<T>()
        .map_err(|_| bad_request(format!("Invalid {label} ID")))
}

pub fn status_for(error: &SeasonError) -> StatusCode {
    match error {
        SeasonError::NotFound { .. } => StatusCode::NOT_FOUND,
        SeasonError::Forbidden(_) => StatusCode::FORBIDDEN,
        SeasonError::InvalidState(_) | SeasonError::Conflict { .. } => StatusCode::CONFLICT,
        SeasonError::ValidationFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        SeasonError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn handle_season_error(error: SeasonError) -> Response {
    let status = status_for(&error);
    let field = match &error {
        SeasonError::ValidationFailed { field, .. } => Some(field.clone()),
        _ => None,
    };
    let body = ErrorResponse {
        code: error.code().to_string(),
        message: error.message(),
        field,
    };
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn not_found_maps_to_404() {
        let error = SeasonError::not_found(ErrorCode::SeasonNotFound, "Season", "s-1");
        assert_eq!(handle_season_error(error).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn state_and_conflict_map_to_409() {
        assert_eq!(
            status_for(&SeasonError::invalid_state("Cannot archive season in status DRAFT")),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&SeasonError::conflict(ErrorCode::AlreadyExists, "dup")),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn validation_maps_to_422() {
        let error = SeasonError::validation("name", "cannot be empty");
        assert_eq!(
            handle_season_error(error).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn forbidden_and_infrastructure() {
        assert_eq!(
            status_for(&SeasonError::forbidden("not yours")),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(&SeasonError::infrastructure("db down")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
