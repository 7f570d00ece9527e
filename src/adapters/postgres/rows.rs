//! Row types for sqlx query mapping.
//!
//! Each table has one explicit row struct. Conversion into the domain goes
//! through the entity's `reconstitute`, so a row with an unexpected shape
//! (unknown enum text, broken invariant) fails here instead of leaking into
//! the domain.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::area_of_focus::{AreaOfFocus, AreaOfFocusType};
use crate::domain::foundation::{
    AreaOfFocusId, DomainError, MetricGoalId, MetricId, PillarId, ProgressLogId,
    SeasonAreaMetricId, SeasonId, SeasonPillarAreaId, SeasonPillarId, SortOrder, Timestamp,
    UserId,
};
use crate::domain::goal::{GoalValues, MetricGoal};
use crate::domain::metric::{Metric, MetricDefinition, Unit};
use crate::domain::pillar::Pillar;
use crate::domain::progress::{Measurement, MetricProgressLog};
use crate::domain::season::{Season, SeasonAreaMetric, SeasonPillar, SeasonPillarArea};

#[derive(Debug, sqlx::FromRow)]
pub(super) struct PillarRow {
    id: Uuid,
    name: String,
    display_name: String,
    description: Option<String>,
    sort_order: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PillarRow> for Pillar {
    type Error = DomainError;

    fn try_from(row: PillarRow) -> Result<Self, Self::Error> {
        Pillar::reconstitute(
            PillarId::from_uuid(row.id),
            row.name.parse()?,
            row.display_name,
            row.description,
            SortOrder::try_new(row.sort_order)?,
            row.is_active,
            Timestamp::from(row.created_at),
            Timestamp::from(row.updated_at),
        )
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct AreaOfFocusRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    pillar_id: Uuid,
    user_id: Option<Uuid>,
    area_type: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AreaOfFocusRow> for AreaOfFocus {
    type Error = DomainError;

    fn try_from(row: AreaOfFocusRow) -> Result<Self, Self::Error> {
        AreaOfFocus::reconstitute(
            AreaOfFocusId::from_uuid(row.id),
            row.name,
            row.description,
            PillarId::from_uuid(row.pillar_id),
            row.user_id.map(UserId::from_uuid),
            row.area_type.parse::<AreaOfFocusType>()?,
            row.is_active,
            Timestamp::from(row.created_at),
            Timestamp::from(row.updated_at),
        )
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct MetricRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    unit_type: String,
    default_unit: String,
    alternative_units: Vec<String>,
    data_type: String,
    metric_type: String,
    user_id: Option<Uuid>,
    calculation_method: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MetricRow> for Metric {
    type Error = DomainError;

    fn try_from(row: MetricRow) -> Result<Self, Self::Error> {
        let alternative_units = row
            .alternative_units
            .iter()
            .map(|u| u.parse::<Unit>())
            .collect::<Result<Vec<_>, _>>()?;
        let definition = MetricDefinition {
            name: row.name,
            description: row.description,
            unit_type: row.unit_type.parse()?,
            default_unit: row.default_unit.parse()?,
            alternative_units,
            data_type: row.data_type.parse()?,
        };
        Metric::reconstitute(
            MetricId::from_uuid(row.id),
            definition,
            row.metric_type.parse()?,
            row.user_id.map(UserId::from_uuid),
            row.calculation_method,
            row.is_active,
            Timestamp::from(row.created_at),
            Timestamp::from(row.updated_at),
        )
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct SeasonRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    duration_weeks: Option<i32>,
    status: String,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SeasonRow> for Season {
    type Error = DomainError;

    fn try_from(row: SeasonRow) -> Result<Self, Self::Error> {
        Season::reconstitute(
            SeasonId::from_uuid(row.id),
            UserId::from_uuid(row.user_id),
            row.name,
            row.duration_weeks,
            row.status.parse()?,
            row.start_date.map(Timestamp::from),
            row.end_date.map(Timestamp::from),
            Timestamp::from(row.created_at),
            Timestamp::from(row.updated_at),
        )
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct SeasonPillarRow {
    id: Uuid,
    season_id: Uuid,
    pillar_id: Uuid,
    theme: String,
    sort_order: i32,
    created_at: DateTime<Utc>,
}

impl TryFrom<SeasonPillarRow> for SeasonPillar {
    type Error = DomainError;

    fn try_from(row: SeasonPillarRow) -> Result<Self, Self::Error> {
        SeasonPillar::reconstitute(
            SeasonPillarId::from_uuid(row.id),
            SeasonId::from_uuid(row.season_id),
            PillarId::from_uuid(row.pillar_id),
            row.theme,
            SortOrder::try_new(row.sort_order)?,
            Timestamp::from(row.created_at),
        )
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct SeasonPillarAreaRow {
    id: Uuid,
    season_pillar_id: Uuid,
    area_of_focus_id: Uuid,
    sort_order: i32,
    created_at: DateTime<Utc>,
}

impl TryFrom<SeasonPillarAreaRow> for SeasonPillarArea {
    type Error = DomainError;

    fn try_from(row: SeasonPillarAreaRow) -> Result<Self, Self::Error> {
        Ok(SeasonPillarArea::reconstitute(
            SeasonPillarAreaId::from_uuid(row.id),
            SeasonPillarId::from_uuid(row.season_pillar_id),
            AreaOfFocusId::from_uuid(row.area_of_focus_id),
            SortOrder::try_new(row.sort_order)?,
            Timestamp::from(row.created_at),
        ))
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct SeasonAreaMetricRow {
    id: Uuid,
    season_pillar_area_id: Uuid,
    metric_id: Uuid,
    sort_order: i32,
    created_at: DateTime<Utc>,
}

impl TryFrom<SeasonAreaMetricRow> for SeasonAreaMetric {
    type Error = DomainError;

    fn try_from(row: SeasonAreaMetricRow) -> Result<Self, Self::Error> {
        Ok(SeasonAreaMetric::reconstitute(
            SeasonAreaMetricId::from_uuid(row.id),
            SeasonPillarAreaId::from_uuid(row.season_pillar_area_id),
            MetricId::from_uuid(row.metric_id),
            SortOrder::try_new(row.sort_order)?,
            Timestamp::from(row.created_at),
        ))
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct MetricGoalRow {
    id: Uuid,
    season_area_metric_id: Uuid,
    goal_value: f64,
    goal_unit: String,
    canonical_value: f64,
    start_value: Option<f64>,
    start_unit: Option<String>,
    target_date: Option<NaiveDate>,
    is_achieved: bool,
    achieved_at: Option<DateTime<Utc>>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MetricGoalRow> for MetricGoal {
    type Error = DomainError;

    fn try_from(row: MetricGoalRow) -> Result<Self, Self::Error> {
        if row.is_achieved != row.achieved_at.is_some() {
            return Err(DomainError::validation(
                "achieved_at",
                format!("Goal {} has is_achieved={} without matching achieved_at", row.id, row.is_achieved),
            ));
        }
        let start_unit = row
            .start_unit
            .as_deref()
            .map(str::parse::<Unit>)
            .transpose()?;
        let values = GoalValues {
            goal_value: row.goal_value,
            goal_unit: row.goal_unit.parse()?,
            canonical_value: row.canonical_value,
            start_value: row.start_value,
            start_unit,
            target_date: row.target_date,
            notes: row.notes,
        };
        MetricGoal::reconstitute(
            MetricGoalId::from_uuid(row.id),
            SeasonAreaMetricId::from_uuid(row.season_area_metric_id),
            values,
            row.achieved_at.map(Timestamp::from),
            Timestamp::from(row.created_at),
            Timestamp::from(row.updated_at),
        )
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct ProgressLogRow {
    id: Uuid,
    season_id: Uuid,
    metric_id: Uuid,
    user_id: Uuid,
    value: f64,
    unit: String,
    canonical_value: f64,
    logged_at: DateTime<Utc>,
    entry_type: String,
    source_reference: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProgressLogRow> for MetricProgressLog {
    type Error = DomainError;

    fn try_from(row: ProgressLogRow) -> Result<Self, Self::Error> {
        let measurement = Measurement {
            value: row.value,
            unit: row.unit.parse()?,
            canonical_value: row.canonical_value,
            logged_at: Timestamp::from(row.logged_at),
            notes: row.notes,
        };
        MetricProgressLog::reconstitute(
            ProgressLogId::from_uuid(row.id),
            SeasonId::from_uuid(row.season_id),
            MetricId::from_uuid(row.metric_id),
            UserId::from_uuid(row.user_id),
            measurement,
            row.entry_type.parse()?,
            row.source_reference,
            Timestamp::from(row.created_at),
            Timestamp::from(row.updated_at),
        )
    }
}

/// Converts a batch of rows, failing on the first bad one.
pub(super) fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, DomainError>
where
    T: TryFrom<R, Error = DomainError>,
{
    rows.into_iter().map(T::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::metric::{MetricType, UnitType};
    use crate::domain::season::SeasonStatus;

    fn season_row(status: &str, start: Option<DateTime<Utc>>) -> SeasonRow {
        let now = Utc::now();
        SeasonRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Summer Cut".to_string(),
            duration_weeks: Some(12),
            status: status.to_string(),
            start_date: start,
            end_date: start.map(|s| s + chrono::Duration::weeks(12)),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn season_row_converts_with_parsed_status() {
        let season = Season::try_from(season_row("ACTIVE", Some(Utc::now()))).unwrap();
        assert_eq!(season.status(), SeasonStatus::Active);
        assert_eq!(season.duration_weeks(), Some(12));
    }

    #[test]
    fn season_row_with_unknown_status_is_rejected() {
        let err = Season::try_from(season_row("RUNNING", None)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn active_season_row_without_start_is_rejected() {
        assert!(Season::try_from(season_row("ACTIVE", None)).is_err());
    }

    #[test]
    fn metric_row_parses_alternative_units() {
        let now = Utc::now();
        let row = MetricRow {
            id: Uuid::new_v4(),
            name: "Body Weight".to_string(),
            description: None,
            unit_type: "WEIGHT".to_string(),
            default_unit: "kg".to_string(),
            alternative_units: vec!["lbs".to_string()],
            data_type: "DECIMAL".to_string(),
            metric_type: "PREDEFINED".to_string(),
            user_id: None,
            calculation_method: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let metric = Metric::try_from(row).unwrap();
        assert_eq!(metric.unit_type(), UnitType::Weight);
        assert_eq!(metric.alternative_units(), &[Unit::Lbs]);
        assert_eq!(metric.metric_type(), MetricType::Predefined);
    }

    #[test]
    fn goal_row_with_inconsistent_achievement_is_rejected() {
        let now = Utc::now();
        let row = MetricGoalRow {
            id: Uuid::new_v4(),
            season_area_metric_id: Uuid::new_v4(),
            goal_value: 80.0,
            goal_unit: "kg".to_string(),
            canonical_value: 80.0,
            start_value: None,
            start_unit: None,
            target_date: None,
            is_achieved: true,
            achieved_at: None,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        let err = MetricGoal::try_from(row).unwrap_err();
        assert_eq!(err.details.get("field").map(String::as_str), Some("achieved_at"));
    }

    #[test]
    fn batch_conversion_fails_on_first_bad_row() {
        let rows = vec![season_row("DRAFT", None), season_row("BOGUS", None)];
        let result: Result<Vec<Season>, _> = convert_all(rows);
        assert!(result.is_err());
    }
}
