//! Measurement units and the static conversion table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Family of units a metric is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitType {
    Weight,
    Distance,
    Time,
    Reps,
    Percentage,
    Other,
}

impl UnitType {
    /// Units that may be used with this unit type.
    pub fn compatible_units(&self) -> &'static [Unit] {
        match self {
            UnitType::Weight => &[Unit::Kg, Unit::Lbs],
            UnitType::Distance => &[Unit::Cm, Unit::Inches, Unit::Meters, Unit::Km, Unit::Miles],
            UnitType::Time => &[Unit::Seconds, Unit::Minutes, Unit::Hours],
            UnitType::Reps => &[Unit::Count],
            UnitType::Percentage => &[Unit::PercentValue],
            UnitType::Other => &[Unit::Count, Unit::CustomUnit],
        }
    }

    /// Returns true if `unit` belongs to this unit type.
    pub fn is_compatible(&self, unit: Unit) -> bool {
        self.compatible_units().contains(&unit)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitType::Weight => "WEIGHT",
            UnitType::Distance => "DISTANCE",
            UnitType::Time => "TIME",
            UnitType::Reps => "REPS",
            UnitType::Percentage => "PERCENTAGE",
            UnitType::Other => "OTHER",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UnitType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WEIGHT" => Ok(UnitType::Weight),
            "DISTANCE" => Ok(UnitType::Distance),
            "TIME" => Ok(UnitType::Time),
            "REPS" => Ok(UnitType::Reps),
            "PERCENTAGE" => Ok(UnitType::Percentage),
            "OTHER" => Ok(UnitType::Other),
            _ => Err(ValidationError::invalid_format(
                "unit_type",
                format!("unknown unit type '{}'", s),
            )),
        }
    }
}

/// A concrete measurement unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Kg,
    Lbs,
    Cm,
    Inches,
    Meters,
    Km,
    Miles,
    Seconds,
    Minutes,
    Hours,
    Count,
    PercentValue,
    CustomUnit,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::Lbs => "lbs",
            Unit::Cm => "cm",
            Unit::Inches => "inches",
            Unit::Meters => "meters",
            Unit::Km => "km",
            Unit::Miles => "miles",
            Unit::Seconds => "seconds",
            Unit::Minutes => "minutes",
            Unit::Hours => "hours",
            Unit::Count => "count",
            Unit::PercentValue => "percent_value",
            Unit::CustomUnit => "custom_unit",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Unit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ALL: [Unit; 13] = [
            Unit::Kg,
            Unit::Lbs,
            Unit::Cm,
            Unit::Inches,
            Unit::Meters,
            Unit::Km,
            Unit::Miles,
            Unit::Seconds,
            Unit::Minutes,
            Unit::Hours,
            Unit::Count,
            Unit::PercentValue,
            Unit::CustomUnit,
        ];
        ALL.into_iter()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_format("unit", format!("unknown unit '{}'", s)))
    }
}

/// Whether metric values are whole numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    Decimal,
    Integer,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Decimal => "DECIMAL",
            DataType::Integer => "INTEGER",
        }
    }
}

impl FromStr for DataType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DECIMAL" => Ok(DataType::Decimal),
            "INTEGER" => Ok(DataType::Integer),
            _ => Err(ValidationError::invalid_format(
                "data_type",
                format!("unknown data type '{}'", s),
            )),
        }
    }
}

const KG_TO_LBS: f64 = 2.20462;
const KM_TO_MILES: f64 = 0.621371;
const CM_TO_INCHES: f64 = 0.393701;
const MINUTES_TO_SECONDS: f64 = 60.0;
const HOURS_TO_MINUTES: f64 = 60.0;

/// Converts `value` from one unit to another using the fixed rule table.
///
/// Pairs without a rule (meters and km, hours and seconds, ...) return the
/// value unchanged.
pub fn convert(value: f64, from: Unit, to: Unit) -> f64 {
    match (from, to) {
        (Unit::Kg, Unit::Lbs) => value * KG_TO_LBS,
        (Unit::Lbs, Unit::Kg) => value / KG_TO_LBS,
        (Unit::Km, Unit::Miles) => value * KM_TO_MILES,
        (Unit::Miles, Unit::Km) => value / KM_TO_MILES,
        (Unit::Cm, Unit::Inches) => value * CM_TO_INCHES,
        (Unit::Inches, Unit::Cm) => value / CM_TO_INCHES,
        (Unit::Minutes, Unit::Seconds) => value * MINUTES_TO_SECONDS,
        (Unit::Seconds, Unit::Minutes) => value / MINUTES_TO_SECONDS,
        (Unit::Hours, Unit::Minutes) => value * HOURS_TO_MINUTES,
        (Unit::Minutes, Unit::Hours) => value / HOURS_TO_MINUTES,
        _ => value,
    }
}

/// Returns true when `convert` has a rule for the pair.
pub fn has_conversion_rule(from: Unit, to: Unit) -> bool {
    matches!(
        (from, to),
        (Unit::Kg, Unit::Lbs)
            | (Unit::Lbs, Unit::Kg)
            | (Unit::Km, Unit::Miles)
            | (Unit::Miles, Unit::Km)
            | (Unit::Cm, Unit::Inches)
            | (Unit::Inches, Unit::Cm)
            | (Unit::Minutes, Unit::Seconds)
            | (Unit::Seconds, Unit::Minutes)
            | (Unit::Hours, Unit::Minutes)
            | (Unit::Minutes, Unit::Hours)
    )
}
