//! Metric entity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::unit::{self, DataType, Unit, UnitType};
use crate::domain::foundation::{
    rules, DomainError, MetricId, OwnedByUser, Timestamp, UserId, ValidationError,
};

/// Who defined a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricType {
    Predefined,
    UserCreated,
    AppCalculated,
}

impl MetricType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Predefined => "PREDEFINED",
            MetricType::UserCreated => "USER_CREATED",
            MetricType::AppCalculated => "APP_CALCULATED",
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MetricType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PREDEFINED" => Ok(MetricType::Predefined),
            "USER_CREATED" => Ok(MetricType::UserCreated),
            "APP_CALCULATED" => Ok(MetricType::AppCalculated),
            _ => Err(ValidationError::invalid_format(
                "metric_type",
                format!("unknown metric type '{}'", s),
            )),
        }
    }
}

/// Measurement properties shared by every metric constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricDefinition {
    pub name: String,
    pub description: Option<String>,
    pub unit_type: UnitType,
    pub default_unit: Unit,
    pub alternative_units: Vec<Unit>,
    pub data_type: DataType,
}

impl MetricDefinition {
    pub fn new(name: impl Into<String>, unit_type: UnitType, default_unit: Unit) -> Self {
        Self {
            name: name.into(),
            description: None,
            unit_type,
            default_unit,
            alternative_units: Vec::new(),
            data_type: DataType::Decimal,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_alternative_units(mut self, units: impl IntoIterator<Item = Unit>) -> Self {
        self.alternative_units = units.into_iter().collect();
        self
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }
}

/// A measurable quantity tracked inside an area of focus.
///
/// # Invariants
///
/// - `name` is 1-100 characters and not a reserved word
/// - `default_unit` and every alternative unit belong to `unit_type`
/// - `alternative_units` holds no duplicates and never the default unit
/// - `user_id` is set exactly when `metric_type` is `UserCreated`
/// - `calculation_method` is set exactly when `metric_type` is `AppCalculated`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    id: MetricId,
    name: String,
    description: Option<String>,
    unit_type: UnitType,
    default_unit: Unit,
    alternative_units: Vec<Unit>,
    data_type: DataType,
    metric_type: MetricType,
    user_id: Option<UserId>,
    calculation_method: Option<String>,
    is_active: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Metric {
    /// Creates a system-owned metric.
    pub fn predefined(id: MetricId, definition: MetricDefinition) -> Result<Self, DomainError> {
        Self::create(id, definition, MetricType::Predefined, None, None)
    }

    /// Creates a metric owned by `user_id`.
    pub fn user_created(
        id: MetricId,
        user_id: UserId,
        definition: MetricDefinition,
    ) -> Result<Self, DomainError> {
        Self::create(id, definition, MetricType::UserCreated, Some(user_id), None)
    }

    /// Creates a metric the app derives from other data.
    pub fn app_calculated(
        id: MetricId,
        definition: MetricDefinition,
        calculation_method: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Self::create(
            id,
            definition,
            MetricType::AppCalculated,
            None,
            Some(calculation_method.into()),
        )
    }

    fn create(
        id: MetricId,
        definition: MetricDefinition,
        metric_type: MetricType,
        user_id: Option<UserId>,
        calculation_method: Option<String>,
    ) -> Result<Self, DomainError> {
        let now = Timestamp::now();
        Self::reconstitute(
            id,
            definition,
            metric_type,
            user_id,
            calculation_method,
            true,
            now,
            now,
        )
    }

    /// Rebuilds a metric from storage, re-checking every invariant.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: MetricId,
        definition: MetricDefinition,
        metric_type: MetricType,
        user_id: Option<UserId>,
        calculation_method: Option<String>,
        is_active: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Result<Self, DomainError> {
        rules::require_name("name", &definition.name)?;
        Self::validate_units(
            definition.unit_type,
            definition.default_unit,
            &definition.alternative_units,
        )?;
        Self::validate_type(metric_type, user_id.as_ref(), calculation_method.as_deref())?;

        let MetricDefinition {
            name,
            description,
            unit_type,
            default_unit,
            alternative_units,
            data_type,
        } = definition;

        Ok(Self {
            id,
            name,
            description,
            unit_type,
            default_unit,
            alternative_units,
            data_type,
            metric_type,
            user_id,
            calculation_method,
            is_active,
            created_at,
            updated_at,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &MetricId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn unit_type(&self) -> UnitType {
        self.unit_type
    }

    pub fn default_unit(&self) -> Unit {
        self.default_unit
    }

    pub fn alternative_units(&self) -> &[Unit] {
        &self.alternative_units
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn metric_type(&self) -> MetricType {
        self.metric_type
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn calculation_method(&self) -> Option<&str> {
        self.calculation_method.as_deref()
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

    /// Returns the measurement properties as a reusable definition.
    pub fn definition(&self) -> MetricDefinition {
        MetricDefinition {
            name: self.name.clone(),
            description: self.description.clone(),
            unit_type: self.unit_type,
            default_unit: self.default_unit,
            alternative_units: self.alternative_units.clone(),
            data_type: self.data_type,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Units
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns true if values may be entered in `unit`.
    pub fn supports_unit(&self, unit: Unit) -> bool {
        unit == self.default_unit || self.alternative_units.contains(&unit)
    }

    /// Expresses `value` (entered in `from`) in the metric's default unit.
    ///
    /// Pairs without a conversion rule pass through unchanged.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if `from` is not supported by this metric
    pub fn convert_to_default_unit(&self, value: f64, from: Unit) -> Result<f64, DomainError> {
        if !self.supports_unit(from) {
            return Err(DomainError::validation(
                "unit",
                format!("Unit '{}' is not supported by metric '{}'", from, self.name),
            ));
        }
        if from == self.default_unit {
            return Ok(value);
        }
        Ok(unit::convert(value, from, self.default_unit))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations (each returns a new instance)
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns a deactivated copy.
    pub fn deactivate(&self, acting_user: Option<&UserId>) -> Result<Self, DomainError> {
        self.check_acting_user(acting_user)?;
        Ok(Self {
            is_active: false,
            updated_at: Timestamp::now(),
            ..self.clone()
        })
    }

    /// Returns a reactivated copy.
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
    /// - `Forbidden` if `acting_user` does not own the metric
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

    fn validate_units(
        unit_type: UnitType,
        default_unit: Unit,
        alternative_units: &[Unit],
    ) -> Result<(), ValidationError> {
        if !unit_type.is_compatible(default_unit) {
            return Err(ValidationError::invalid_format(
                "default_unit",
                format!("'{}' is not a {} unit", default_unit, unit_type),
            ));
        }
        for (index, alt) in alternative_units.iter().enumerate() {
            if *alt == default_unit {
                return Err(ValidationError::invalid_format(
                    "alternative_units",
                    "must not contain the default unit",
                ));
            }
            if !unit_type.is_compatible(*alt) {
                return Err(ValidationError::invalid_format(
                    "alternative_units",
                    format!("'{}' is not a {} unit", alt, unit_type),
                ));
            }
            if alternative_units[..index].contains(alt) {
                return Err(ValidationError::invalid_format(
                    "alternative_units",
                    format!("'{}' is listed twice", alt),
                ));
            }
        }
        Ok(())
    }

    fn validate_type(
        metric_type: MetricType,
        user_id: Option<&UserId>,
        calculation_method: Option<&str>,
    ) -> Result<(), ValidationError> {
        match (metric_type, user_id) {
            (MetricType::UserCreated, None) => {
                return Err(ValidationError::invalid_format(
                    "user_id",
                    "user-created metrics require an owner",
                ))
            }
            (MetricType::Predefined | MetricType::AppCalculated, Some(_)) => {
                return Err(ValidationError::invalid_format(
                    "user_id",
                    format!("{} metrics cannot have an owner", metric_type),
                ))
            }
            _ => {}
        }
        match (metric_type, calculation_method) {
            (MetricType::AppCalculated, Some(method)) => {
                rules::require_text("calculation_method", method, rules::MAX_REFERENCE_LENGTH)
            }
            (MetricType::AppCalculated, None) => {
                Err(ValidationError::empty_field("calculation_method"))
            }
            (_, Some(_)) => Err(ValidationError::invalid_format(
                "calculation_method",
                "only app-calculated metrics have a calculation method",
            )),
            (_, None) => Ok(()),
        }
    }
}

impl OwnedByUser for Metric {
    fn owner_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }
}
