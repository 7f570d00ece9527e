//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, field rules and error types
//! that form the vocabulary of the Seasons domain.

mod errors;
mod ids;
mod ownership;
pub mod rules;
mod sort_order;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    is_canonical_uuid, parse_canonical_uuid, AreaOfFocusId, MetricGoalId, MetricId, PillarId,
    ProgressLogId, SeasonAreaMetricId, SeasonId, SeasonPillarAreaId, SeasonPillarId, UserId,
};
pub use ownership::OwnedByUser;
pub use sort_order::SortOrder;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
