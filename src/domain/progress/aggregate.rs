//! MetricProgressLog entity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    rules, DomainError, ErrorCode, MetricId, OwnedByUser, ProgressLogId, SeasonId, Timestamp,
    UserId, ValidationError,
};
use crate::domain::metric::Unit;

/// How a progress entry was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    Manual,
    AppCalculated,
    Imported,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Manual => "MANUAL",
            EntryType::AppCalculated => "APP_CALCULATED",
            EntryType::Imported => "IMPORTED",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MANUAL" => Ok(EntryType::Manual),
            "APP_CALCULATED" => Ok(EntryType::AppCalculated),
            "IMPORTED" => Ok(EntryType::Imported),
            _ => Err(ValidationError::invalid_format(
                "entry_type",
                format!("unknown entry type '{}'", s),
            )),
        }
    }
}

/// A single measured value.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub value: f64,
    pub unit: Unit,
    /// Value expressed in the metric's default unit.
    pub canonical_value: f64,
    pub logged_at: Timestamp,
    pub notes: Option<String>,
}

impl Measurement {
    fn validate(&self) -> Result<(), ValidationError> {
        if !self.value.is_finite() {
            return Err(ValidationError::invalid_format("value", "must be a finite number"));
        }
        if !self.canonical_value.is_finite() {
            return Err(ValidationError::invalid_format(
                "canonical_value",
                "must be a finite number",
            ));
        }
        if self.logged_at.is_after(&Timestamp::now()) {
            return Err(ValidationError::invalid_format(
                "logged_at",
                "cannot be in the future",
            ));
        }
        rules::limit_optional("notes", self.notes.as_deref(), rules::MAX_NOTES_LENGTH)
    }
}

/// A time-series value recorded for a metric during a season.
///
/// # Invariants
///
/// - `logged_at` is not in the future
/// - `source_reference` is set exactly when `entry_type` is `AppCalculated`
/// - only `Manual` entries can be changed, and only by their owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricProgressLog {
    id: ProgressLogId,
    season_id: SeasonId,
    metric_id: MetricId,
    user_id: UserId,
    value: f64,
    unit: Unit,
    canonical_value: f64,
    logged_at: Timestamp,
    entry_type: EntryType,
    source_reference: Option<String>,
    notes: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl MetricProgressLog {
    /// Creates a user-entered log.
    pub fn manual(
        id: ProgressLogId,
        season_id: SeasonId,
        metric_id: MetricId,
        user_id: UserId,
        measurement: Measurement,
    ) -> Result<Self, DomainError> {
        let now = Timestamp::now();
        Self::reconstitute(
            id,
            season_id,
            metric_id,
            user_id,
            measurement,
            EntryType::Manual,
            None,
            now,
            now,
        )
    }

    /// Rebuilds a log from storage, re-checking every invariant.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ProgressLogId,
        season_id: SeasonId,
        metric_id: MetricId,
        user_id: UserId,
        measurement: Measurement,
        entry_type: EntryType,
        source_reference: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Result<Self, DomainError> {
        measurement.validate()?;
        match (entry_type, source_reference.as_deref()) {
            (EntryType::AppCalculated, Some(reference)) => {
                rules::require_text("source_reference", reference, rules::MAX_REFERENCE_LENGTH)?
            }
            (EntryType::AppCalculated, None) => {
                return Err(ValidationError::empty_field("source_reference").into())
            }
            (_, Some(_)) => {
                return Err(ValidationError::invalid_format(
                    "source_reference",
                    "only app-calculated entries carry a source reference",
                )
                .into())
            }
            (_, None) => {}
        }

        let Measurement {
            value,
            unit,
            canonical_value,
            logged_at,
            notes,
        } = measurement;

        Ok(Self {
            id,
            season_id,
            metric_id,
            user_id,
            value,
            unit,
            canonical_value,
            logged_at,
            entry_type,
            source_reference,
            notes,
            created_at,
            updated_at,
        })
    }

    pub fn id(&self) -> &ProgressLogId {
        &self.id
    }

    pub fn season_id(&self) -> &SeasonId {
        &self.season_id
    }

    pub fn metric_id(&self) -> &MetricId {
        &self.metric_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn canonical_value(&self) -> f64 {
        self.canonical_value
    }

    pub fn logged_at(&self) -> &Timestamp {
        &self.logged_at
    }

    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    pub fn source_reference(&self) -> Option<&str> {
        self.source_reference.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Returns the recorded measurement.
    pub fn measurement(&self) -> Measurement {
        Measurement {
            value: self.value,
            unit: self.unit,
            canonical_value: self.canonical_value,
            logged_at: self.logged_at,
            notes: self.notes.clone(),
        }
    }

    /// Returns true if `user_id` may change or delete this entry.
    pub fn is_mutable_by(&self, user_id: &UserId) -> bool {
        self.entry_type == EntryType::Manual && self.belongs_to_user(user_id)
    }

    /// Fails unless `user_id` may change or delete this entry.
    ///
    /// # Errors
    ///
    /// - `ImmutableEntry` for app-calculated and imported entries
    /// - `Forbidden` if `user_id` is not the owner
    pub fn ensure_mutable_by(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.entry_type != EntryType::Manual {
            return Err(DomainError::new(
                ErrorCode::ImmutableEntry,
                format!("{} progress entries cannot be modified", self.entry_type),
            )
            .with_detail("entry_type", self.entry_type.as_str()));
        }
        self.check_ownership(user_id)
    }

    /// Returns a copy with a replaced measurement.
    pub fn update(&self, measurement: Measurement, acting_user: &UserId) -> Result<Self, DomainError> {
        self.ensure_mutable_by(acting_user)?;
        measurement.validate()?;
        Ok(Self {
            value: measurement.value,
            unit: measurement.unit,
            canonical_value: measurement.canonical_value,
            logged_at: measurement.logged_at,
            notes: measurement.notes,
            updated_at: Timestamp::now(),
            ..self.clone()
        })
    }
}

impl OwnedByUser for MetricProgressLog {
    fn owner_id(&self) -> Option<&UserId> {
        Some(&self.user_id)
    }
}
