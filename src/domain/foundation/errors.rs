//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' must be {max} characters or less, got {actual}")]
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },

    #[error("Field '{field}' uses reserved value '{value}'")]
    Reserved { field: String, value: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates a too-long validation error.
    pub fn too_long(field: impl Into<String>, max: usize, actual: usize) -> Self {
        ValidationError::TooLong {
            field: field.into(),
            max,
            actual,
        }
    }

    /// Creates a reserved value validation error.
    pub fn reserved(field: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationError::Reserved {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::Reserved { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,

    // Not found errors
    SeasonNotFound,
    PillarNotFound,
    AreaOfFocusNotFound,
    MetricNotFound,
    MetricGoalNotFound,
    ProgressLogNotFound,
    SeasonPillarNotFound,
    SeasonPillarAreaNotFound,
    SeasonAreaMetricNotFound,
    ExerciseNotFound,

    // State errors
    InvalidStateTransition,
    AlreadyExists,
    ActiveSeasonExists,
    ImmutableEntry,

    // Authorization errors
    Forbidden,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl ErrorCode {
    /// Returns true for the not-found family of codes.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ErrorCode::SeasonNotFound
                | ErrorCode::PillarNotFound
                | ErrorCode::AreaOfFocusNotFound
                | ErrorCode::MetricNotFound
                | ErrorCode::MetricGoalNotFound
                | ErrorCode::ProgressLogNotFound
                | ErrorCode::SeasonPillarNotFound
                | ErrorCode::SeasonPillarAreaNotFound
                | ErrorCode::SeasonAreaMetricNotFound
                | ErrorCode::ExerciseNotFound
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::SeasonNotFound => "SEASON_NOT_FOUND",
            ErrorCode::PillarNotFound => "PILLAR_NOT_FOUND",
            ErrorCode::AreaOfFocusNotFound => "AREA_OF_FOCUS_NOT_FOUND",
            ErrorCode::MetricNotFound => "METRIC_NOT_FOUND",
            ErrorCode::MetricGoalNotFound => "METRIC_GOAL_NOT_FOUND",
            ErrorCode::ProgressLogNotFound => "PROGRESS_LOG_NOT_FOUND",
            ErrorCode::SeasonPillarNotFound => "SEASON_PILLAR_NOT_FOUND",
            ErrorCode::SeasonPillarAreaNotFound => "SEASON_PILLAR_AREA_NOT_FOUND",
            ErrorCode::SeasonAreaMetricNotFound => "SEASON_AREA_METRIC_NOT_FOUND",
            ErrorCode::ExerciseNotFound => "EXERCISE_NOT_FOUND",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::AlreadyExists => "ALREADY_EXISTS",
            ErrorCode::ActiveSeasonExists => "ACTIVE_SEASON_EXISTS",
            ErrorCode::ImmutableEntry => "IMMUTABLE_ENTRY",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field.into())
    }

    /// Creates a "not found: {id}" error with the given code.
    pub fn not_found(code: ErrorCode, what: &str, id: impl fmt::Display) -> Self {
        Self::new(code, format!("{} not found: {}", what, id)).with_detail("id", id.to_string())
    }

    /// Creates a database error wrapping the store's own message.
    pub fn database(context: &str, err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::DatabaseError, format!("{}: {}", context, err))
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_string();
        DomainError::validation(field, err.to_string())
    }
}
