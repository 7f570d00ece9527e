//! HTTP DTOs for progress endpoints.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::foundation::{MetricId, SeasonId, UserId};
use crate::domain::metric::Unit;

#[derive(Debug, Clone, Deserialize)]
pub struct LogProgressRequest {
    pub season_id: SeasonId,
    pub metric_id: MetricId,
    pub user_id: UserId,
    pub value: f64,
    pub unit: Unit,
    #[serde(default)]
    pub logged_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Replacement values for a manual entry. Omitting `logged_at` keeps the original time.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProgressRequest {
    pub user_id: UserId,
    pub value: f64,
    pub unit: Unit,
    #[serde(default)]
    pub logged_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgressQuery {
    pub season_id: SeasonId,
    pub metric_id: MetricId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteProgressQuery {
    pub user_id: UserId,
}
