//! Strongly-typed identifier value objects.
//!
//! Every identifier wraps a UUID. Parsing from text only accepts the
//! canonical hyphenated 8-4-4-4-12 hex form; braced, URN and simple forms
//! are rejected the same way as empty or malformed input.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Returns true if `s` is a UUID in canonical 8-4-4-4-12 hex form.
pub fn is_canonical_uuid(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 36 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| match i {
        8 | 13 | 18 | 23 => *b == b'-',
        _ => b.is_ascii_hexdigit(),
    })
}

/// Parses a canonical UUID string, reporting failures against `field`.
pub fn parse_canonical_uuid(field: &str, s: &str) -> Result<Uuid, ValidationError> {
    if s.trim().is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if !is_canonical_uuid(s) {
        return Err(ValidationError::invalid_format(
            field,
            format!("'{}' is not a canonical UUID", s),
        ));
    }
    Uuid::parse_str(s).map_err(|e| ValidationError::invalid_format(field, e.to_string()))
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parses a canonical UUID string.
            pub fn parse(s: &str) -> Result<Self, ValidationError> {
                parse_canonical_uuid($field, s).map(Self)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::parse(&s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0.to_string()
            }
        }
    };
}

define_id!(
    /// Identifier of an authenticated user.
    UserId,
    "user_id"
);
define_id!(
    /// Identifier of a system pillar.
    PillarId,
    "pillar_id"
);
define_id!(
    /// Identifier of an area of focus.
    AreaOfFocusId,
    "area_of_focus_id"
);
define_id!(
    /// Identifier of a metric definition.
    MetricId,
    "metric_id"
);
define_id!(
    /// Identifier of a metric goal.
    MetricGoalId,
    "metric_goal_id"
);
define_id!(
    /// Identifier of a progress log entry.
    ProgressLogId,
    "progress_log_id"
);
define_id!(
    /// Identifier of a season.
    SeasonId,
    "season_id"
);
define_id!(
    /// Identifier of a pillar attached to a season.
    SeasonPillarId,
    "season_pillar_id"
);
define_id!(
    /// Identifier of an area attached to a season pillar.
    SeasonPillarAreaId,
    "season_pillar_area_id"
);
define_id!(
    /// Identifier of a metric tracked within a season area.
    SeasonAreaMetricId,
    "season_area_metric_id"
);
