//! HTTP DTOs for season endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{GoalTarget, MeasuredValue};
use crate::domain::foundation::{
    AreaOfFocusId, MetricId, SeasonId, SeasonPillarAreaId, SeasonPillarId, UserId,
};
use crate::domain::metric::Unit;
use crate::domain::season::{Season, SeasonStatus};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSeasonRequest {
    pub user_id: UserId,
    pub name: String,
    #[serde(default)]
    pub duration_weeks: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSeasonRequest {
    pub user_id: UserId,
    pub name: String,
    #[serde(default)]
    pub duration_weeks: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetThemeRequest {
    pub theme: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddAreaRequest {
    pub season_pillar_id: SeasonPillarId,
    pub area_of_focus_id: AreaOfFocusId,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MeasuredValueDto {
    pub value: f64,
    pub unit: Unit,
}

impl From<MeasuredValueDto> for MeasuredValue {
    fn from(dto: MeasuredValueDto) -> Self {
        Self {
            value: dto.value,
            unit: dto.unit,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GoalTargetDto {
    pub value: f64,
    pub unit: Unit,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
}

impl From<GoalTargetDto> for GoalTarget {
    fn from(dto: GoalTargetDto) -> Self {
        Self {
            value: dto.value,
            unit: dto.unit,
            target_date: dto.target_date,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddMetricRequest {
    pub season_pillar_area_id: SeasonPillarAreaId,
    pub metric_id: MetricId,
    #[serde(default)]
    pub baseline: Option<MeasuredValueDto>,
    #[serde(default)]
    pub target: Option<GoalTargetDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGoalRequest {
    pub goal: MeasuredValueDto,
    #[serde(default)]
    pub start: Option<MeasuredValueDto>,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of the lifecycle endpoints.
///
/// `date` is the start date for `start` and the end date for `complete`;
/// other transitions ignore it.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionRequest {
    pub user_id: UserId,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserQuery {
    pub user_id: UserId,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Season summary returned by lifecycle endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonResponse {
    pub id: SeasonId,
    pub user_id: UserId,
    pub name: String,
    pub duration_weeks: Option<i32>,
    pub status: SeasonStatus,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub updated_at: String,
}

impl From<Season> for SeasonResponse {
    fn from(season: Season) -> Self {
        Self {
            id: *season.id(),
            user_id: *season.user_id(),
            name: season.name().to_string(),
            duration_weeks: season.duration_weeks(),
            status: season.status(),
            start_date: season.start_date().map(|t| t.to_rfc3339()),
            end_date: season.end_date().map(|t| t.to_rfc3339()),
            updated_at: season.updated_at().to_rfc3339(),
        }
    }
}

/// Ids created by the add-area and add-metric endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<String>,
}

impl CreatedResponse {
    pub fn new(id: impl ToString) -> Self {
        Self {
            id: id.to_string(),
            goal_id: None,
        }
    }
}
