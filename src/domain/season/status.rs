//! SeasonStatus enum for tracking the lifecycle of a season.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Lifecycle status of a season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeasonStatus {
    #[default]
    Draft,
    Active,
    Paused,
    Completed,
    Cancelled,
    Archived,
}

impl SeasonStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonStatus::Draft => "DRAFT",
            SeasonStatus::Active => "ACTIVE",
            SeasonStatus::Paused => "PAUSED",
            SeasonStatus::Completed => "COMPLETED",
            SeasonStatus::Cancelled => "CANCELLED",
            SeasonStatus::Archived => "ARCHIVED",
        }
    }

    /// Returns true while the season's name and duration may change.
    pub fn is_editable(&self) -> bool {
        matches!(self, SeasonStatus::Draft)
    }
}

impl StateMachine for SeasonStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Valid transitions:
    /// - Draft -> Active | Cancelled
    /// - Active -> Paused | Completed | Cancelled
    /// - Paused -> Active | Completed | Cancelled
    /// - Completed -> Archived
    /// - Cancelled -> Archived
    /// - Archived -> Cancelled
    fn valid_transitions(&self) -> Vec<Self> {
        use SeasonStatus::*;
        match self {
            Draft => vec![Active, Cancelled],
            Active => vec![Paused, Completed, Cancelled],
            Paused => vec![Active, Completed, Cancelled],
            Completed => vec![Archived],
            Cancelled => vec![Archived],
            Archived => vec![Cancelled],
        }
    }
}

impl fmt::Display for SeasonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SeasonStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(SeasonStatus::Draft),
            "ACTIVE" => Ok(SeasonStatus::Active),
            "PAUSED" => Ok(SeasonStatus::Paused),
            "COMPLETED" => Ok(SeasonStatus::Completed),
            "CANCELLED" => Ok(SeasonStatus::Cancelled),
            "ARCHIVED" => Ok(SeasonStatus::Archived),
            _ => Err(ValidationError::invalid_format(
                "status",
                format!("unknown season status '{}'", s),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_draft() {
        assert_eq!(SeasonStatus::default(), SeasonStatus::Draft);
        assert!(SeasonStatus::Draft.is_editable());
        assert!(!SeasonStatus::Active.is_editable());
    }

    #[test]
    fn draft_cannot_skip_to_completed_or_archived() {
        assert!(!SeasonStatus::Draft.can_transition_to(&SeasonStatus::Completed));
        assert!(!SeasonStatus::Draft.can_transition_to(&SeasonStatus::Archived));
    }

    #[test]
    fn completed_can_only_be_archived() {
        assert_eq!(
            SeasonStatus::Completed.valid_transitions(),
            vec![SeasonStatus::Archived]
        );
        assert!(SeasonStatus::Completed
            .transition_to(SeasonStatus::Cancelled)
            .is_err());
    }

    #[test]
    fn serializes_to_screaming_case() {
        assert_eq!(
            serde_json::to_string(&SeasonStatus::Cancelled).unwrap(),
            "\"CANCELLED\""
        );
        assert_eq!("PAUSED".parse::<SeasonStatus>().unwrap(), SeasonStatus::Paused);
        assert!("paused".parse::<SeasonStatus>().is_err());
    }
}
