//! Pillar entity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    rules, DomainError, PillarId, SortOrder, Timestamp, ValidationError,
};

/// Maximum length for a pillar's display name.
pub const MAX_DISPLAY_NAME_LENGTH: usize = 50;

/// The five system pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PillarName {
    HealthAndFitness,
    Wealth,
    Family,
    HeadGame,
    Career,
}

impl PillarName {
    /// All pillars in their default display order.
    pub const ALL: [PillarName; 5] = [
        PillarName::HealthAndFitness,
        PillarName::Wealth,
        PillarName::Family,
        PillarName::HeadGame,
        PillarName::Career,
    ];

    /// Stable storage key.
    pub fn as_str(&self) -> &'static str {
        match self {
            PillarName::HealthAndFitness => "health_and_fitness",
            PillarName::Wealth => "wealth",
            PillarName::Family => "family",
            PillarName::HeadGame => "head_game",
            PillarName::Career => "career",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            PillarName::HealthAndFitness => "Health & Fitness",
            PillarName::Wealth => "Wealth",
            PillarName::Family => "Family",
            PillarName::HeadGame => "Head Game",
            PillarName::Career => "Career",
        }
    }
}

impl fmt::Display for PillarName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PillarName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PillarName::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("pillar_name", format!("unknown pillar '{}'", s))
            })
    }
}

/// A system-managed life domain.
///
/// # Invariants
///
/// - `display_name` is 1-50 characters
/// - `sort_order` >= 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pillar {
    id: PillarId,
    name: PillarName,
    display_name: String,
    description: Option<String>,
    sort_order: SortOrder,
    is_active: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Pillar {
    /// Creates a new active pillar.
    pub fn new(
        id: PillarId,
        name: PillarName,
        display_name: impl Into<String>,
        description: Option<String>,
        sort_order: SortOrder,
    ) -> Result<Self, DomainError> {
        let now = Timestamp::now();
        Self::reconstitute(
            id,
            name,
            display_name.into(),
            description,
            sort_order,
            true,
            now,
            now,
        )
    }

    /// Rebuilds a pillar from storage, re-checking every invariant.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: PillarId,
        name: PillarName,
        display_name: String,
        description: Option<String>,
        sort_order: SortOrder,
        is_active: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Result<Self, DomainError> {
        rules::require_text("display_name", &display_name, MAX_DISPLAY_NAME_LENGTH)?;
        Ok(Self {
            id,
            name,
            display_name,
            description,
            sort_order,
            is_active,
            created_at,
            updated_at,
        })
    }

    pub fn id(&self) -> &PillarId {
        &self.id
    }

    pub fn name(&self) -> PillarName {
        self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Returns a deactivated copy.
    pub fn deactivate(&self) -> Self {
        Self {
            is_active: false,
            updated_at: Timestamp::now(),
            ..self.clone()
        }
    }

    /// Returns a reactivated copy.
    pub fn activate(&self) -> Self {
        Self {
            is_active: true,
            updated_at: Timestamp::now(),
            ..self.clone()
        }
    }

    /// Returns a copy with new display properties.
    pub fn update_display(
        &self,
        display_name: impl Into<String>,
        description: Option<String>,
        sort_order: SortOrder,
    ) -> Result<Self, DomainError> {
        let display_name = display_name.into();
        rules::require_text("display_name", &display_name, MAX_DISPLAY_NAME_LENGTH)?;
        Ok(Self {
            display_name,
            description,
            sort_order,
            updated_at: Timestamp::now(),
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn health() -> Pillar {
        Pillar::new(
            PillarId::new(),
            PillarName::HealthAndFitness,
            "Health & Fitness",
            Some("Body and energy".to_string()),
            SortOrder::FIRST,
        )
        .unwrap()
    }

    #[test]
    fn new_pillar_is_active_and_keeps_fields() {
        let pillar = health();
        assert!(pillar.is_active());
        assert_eq!(pillar.name(), PillarName::HealthAndFitness);
        assert_eq!(pillar.display_name(), "Health & Fitness");
        assert_eq!(pillar.description(), Some("Body and energy"));
        assert_eq!(pillar.sort_order(), SortOrder::FIRST);
    }

    #[test]
    fn rejects_empty_display_name() {
        let result = Pillar::new(
            PillarId::new(),
            PillarName::Wealth,
            " ",
            None,
            SortOrder::FIRST,
        );
        assert_eq!(result.unwrap_err().code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn rejects_display_name_over_fifty_chars() {
        let result = Pillar::new(
            PillarId::new(),
            PillarName::Wealth,
            "w".repeat(MAX_DISPLAY_NAME_LENGTH + 1),
            None,
            SortOrder::FIRST,
        );
        assert!(result.is_err());
    }

    #[test]
    fn deactivate_leaves_original_untouched() {
        let pillar = health();
        let inactive = pillar.deactivate();
        assert!(pillar.is_active());
        assert!(!inactive.is_active());
        assert_eq!(inactive.id(), pillar.id());
        assert!(inactive.updated_at() >= pillar.updated_at());
        assert!(inactive.activate().is_active());
    }

    #[test]
    fn update_display_changes_only_display_fields() {
        let pillar = health();
        let updated = pillar
            .update_display("Health", None, SortOrder::try_new(3).unwrap())
            .unwrap();
        assert_eq!(updated.display_name(), "Health");
        assert_eq!(updated.description(), None);
        assert_eq!(updated.sort_order().value(), 3);
        assert_eq!(updated.name(), pillar.name());
        assert_eq!(pillar.display_name(), "Health & Fitness");
    }

    #[test]
    fn pillar_name_parses_storage_keys() {
        for name in PillarName::ALL {
            assert_eq!(name.as_str().parse::<PillarName>().unwrap(), name);
        }
        assert!("fitness".parse::<PillarName>().is_err());
    }
}
