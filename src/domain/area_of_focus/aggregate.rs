//! AreaOfFocus entity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    rules, AreaOfFocusId, DomainError, OwnedByUser, PillarId, Timestamp, UserId, ValidationError,
};

/// Who defined an area of focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AreaOfFocusType {
    Predefined,
    UserCreated,
}

impl AreaOfFocusType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AreaOfFocusType::Predefined => "PREDEFINED",
            AreaOfFocusType::UserCreated => "USER_CREATED",
        }
    }
}

impl fmt::Display for AreaOfFocusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AreaOfFocusType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PREDEFINED" => Ok(AreaOfFocusType::Predefined),
            "USER_CREATED" => Ok(AreaOfFocusType::UserCreated),
            _ => Err(ValidationError::invalid_format(
                "area_type",
                format!("unknown area type '{}'", s),
            )),
        }
    }
}

/// A sub-goal category within a pillar.
///
/// # Invariants
///
/// - `name` is 1-100 characters and not a reserved word
/// - `user_id` is `None` exactly when `area_type` is `Predefined`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaOfFocus {
    id: AreaOfFocusId,
    name: String,
    description: Option<String>,
    pillar_id: PillarId,
    user_id: Option<UserId>,
    area_type: AreaOfFocusType,
    is_active: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl AreaOfFocus {
    /// Creates a system-owned area shared by every user.
    pub fn predefined(
        id: AreaOfFocusId,
        pillar_id: PillarId,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, DomainError> {
        let now = Timestamp::now();
        Self::reconstitute(
            id,
            name.into(),
            description,
            pillar_id,
            None,
            AreaOfFocusType::Predefined,
            true,
            now,
            now,
        )
    }

    /// Creates an area owned by `user_id`.
    pub fn user_created(
        id: AreaOfFocusId,
        pillar_id: PillarId,
        user_id: UserId,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, DomainError> {
        let now = Timestamp::now();
        Self::reconstitute(
            id,
            name.into(),
            description,
            pillar_id,
            Some(user_id),
            AreaOfFocusType::UserCreated,
            true,
            now,
            now,
        )
    }

    /// Rebuilds an area from storage, re-checking every invariant.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: AreaOfFocusId,
        name: String,
        description: Option<String>,
        pillar_id: PillarId,
        user_id: Option<UserId>,
        area_type: AreaOfFocusType,
        is_active: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Result<Self, DomainError> {
        rules::require_name("name", &name)?;
        Self::validate_ownership(area_type, user_id.as_ref())?;
        Ok(Self {
            id,
            name,
            description,
            pillar_id,
            user_id,
            area_type,
            is_active,
            created_at,
            updated_at,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the area ID.
    pub fn id(&self) -> &AreaOfFocusId {
        &self.id
    }

    /// Returns the area name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the optional description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the pillar this area sits under.
    pub fn pillar_id(&self) -> &PillarId {
        &self.pillar_id
    }

    /// Returns the owning user for user-created areas.
    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    /// Returns who defined this area.
    pub fn area_type(&self) -> AreaOfFocusType {
        self.area_type
    }

    /// Returns true for predefined areas.
    pub fn is_predefined(&self) -> bool {
        self.area_type == AreaOfFocusType::Predefined
    }

    /// Returns whether the area is selectable.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns when the area was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the area was last updated.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations (each returns a new instance)
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns a deactivated copy.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if `acting_user` does not own the area
    pub fn deactivate(&self, acting_user: Option<&UserId>) -> Result<Self, DomainError> {
        self.check_acting_user(acting_user)?;
        Ok(Self {
            is_active: false,
            updated_at: Timestamp::now(),
            ..self.clone()
        })
    }

    /// Returns a reactivated copy.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if `acting_user` does not own the area
    pub fn activate(&self, acting_user: Option<&UserId>) -> Result<Self, DomainError> {
        self.check_acting_user(acting_user)?;
        Ok(Self {
            is_active: true,
            updated_at: Timestamp::now(),
            ..self.clone()
        })
    }

    /// Returns a copy with a new name and description.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if `acting_user` does not own the area
    /// - `ValidationFailed` if the name breaks the naming rules
    pub fn update_metadata(
        &self,
        name: impl Into<String>,
        description: Option<String>,
        acting_user: Option<&UserId>,
    ) -> Result<Self, DomainError> {
        self.check_acting_user(acting_user)?;
        let name = name.into();
        rules::require_name("name", &name)?;
        Ok(Self {
            name,
            description,
            updated_at: Timestamp::now(),
            ..self.clone()
        })
    }

    fn validate_ownership(
        area_type: AreaOfFocusType,
        user_id: Option<&UserId>,
    ) -> Result<(), ValidationError> {
        match (area_type, user_id) {
            (AreaOfFocusType::Predefined, None) | (AreaOfFocusType::UserCreated, Some(_)) => Ok(()),
            (AreaOfFocusType::Predefined, Some(_)) => Err(ValidationError::invalid_format(
                "user_id",
                "predefined areas cannot have an owner",
            )),
            (AreaOfFocusType::UserCreated, None) => Err(ValidationError::invalid_format(
                "user_id",
                "user-created areas require an owner",
            )),
        }
    }
}

impl OwnedByUser for AreaOfFocus {
    fn owner_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }
}
