//! Season-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors returned by the season application services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeasonError {
    /// A season, pillar, area, metric, goal or log was not found.
    NotFound { code: ErrorCode, message: String },
    /// User is not allowed to touch the resource.
    Forbidden(String),
    /// Lifecycle precondition failed.
    InvalidState(String),
    /// Duplicate association, second active season or immutable entry.
    Conflict { code: ErrorCode, message: String },
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Storage or other infrastructure error.
    Infrastructure(String),
}

impl SeasonError {
    pub fn not_found(code: ErrorCode, what: &str, id: impl std::fmt::Display) -> Self {
        SeasonError::NotFound {
            code,
            message: format!("{} not found: {}", what, id),
        }
    }
    pub fn forbidden(message: impl Into<String>) -> Self {
        SeasonError::Forbidden(message.into())
    }
    pub fn invalid_state(message: impl Into<String>) -> Self {
        SeasonError::InvalidState(message.into())
    }
    pub fn conflict(code: ErrorCode, message: impl Into<String>) -> Self {
        SeasonError::Conflict {
            code,
            message: message.into(),
        }
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SeasonError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        SeasonError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            SeasonError::NotFound { code, .. } => *code,
            SeasonError::Forbidden(_) => ErrorCode::Forbidden,
            SeasonError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            SeasonError::Conflict { code, .. } => *code,
            SeasonError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SeasonError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            SeasonError::NotFound { message, .. } => message.clone(),
            SeasonError::Forbidden(msg) => msg.clone(),
            SeasonError::InvalidState(msg) => msg.clone(),
            SeasonError::Conflict { message, .. } => message.clone(),
            SeasonError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SeasonError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SeasonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SeasonError {}

impl From<DomainError> for SeasonError {
    fn from(err: DomainError) -> Self {
        match err.code {
            code if code.is_not_found() => SeasonError::NotFound {
                code,
                message: err.message,
            },
            ErrorCode::Forbidden => SeasonError::Forbidden(err.message),
            ErrorCode::InvalidStateTransition => SeasonError::InvalidState(err.message),
            code @ (ErrorCode::AlreadyExists
            | ErrorCode::ActiveSeasonExists
            | ErrorCode::ImmutableEntry) => SeasonError::Conflict {
                code,
                message: err.message,
            },
            ErrorCode::ValidationFailed => SeasonError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => SeasonError::Infrastructure(err.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ValidationError;

    #[test]
    fn not_found_codes_keep_their_entity() {
        let err: SeasonError =
            DomainError::not_found(ErrorCode::MetricNotFound, "Metric", "m-1").into();
        assert_eq!(err.code(), ErrorCode::MetricNotFound);
        assert_eq!(err.message(), "Metric not found: m-1");
    }

    #[test]
    fn validation_keeps_field_name() {
        let err: SeasonError = DomainError::from(ValidationError::empty_field("theme")).into();
        match err {
            SeasonError::ValidationFailed { field, .. } => assert_eq!(field, "theme"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn conflict_codes_are_preserved() {
        let err: SeasonError =
            DomainError::new(ErrorCode::ActiveSeasonExists, "already active").into();
        assert_eq!(err.code(), ErrorCode::ActiveSeasonExists);
        assert!(matches!(err, SeasonError::Conflict { .. }));
    }

    #[test]
    fn database_errors_become_infrastructure() {
        let err: SeasonError = DomainError::database("Failed to insert season", "duplicate key").into();
        assert_eq!(err.code(), ErrorCode::DatabaseError);
        assert!(err.message().contains("duplicate key"));
    }
}
