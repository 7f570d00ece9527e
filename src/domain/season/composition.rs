//! Association rows forming a season's composition tree.
//!
//! Season -> SeasonPillar -> SeasonPillarArea -> SeasonAreaMetric -> MetricGoal

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    rules, AreaOfFocusId, DomainError, MetricId, PillarId, SeasonAreaMetricId, SeasonId,
    SeasonPillarAreaId, SeasonPillarId, SortOrder, Timestamp,
};

/// Maximum length for a pillar theme.
pub const MAX_THEME_LENGTH: usize = rules::MAX_NAME_LENGTH;

/// A pillar attached to a season, with the season's theme for it.
///
/// The theme is empty until the user sets one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonPillar {
    id: SeasonPillarId,
    season_id: SeasonId,
    pillar_id: PillarId,
    theme: String,
    sort_order: SortOrder,
    created_at: Timestamp,
}

impl SeasonPillar {
    pub fn new(
        id: SeasonPillarId,
        season_id: SeasonId,
        pillar_id: PillarId,
        sort_order: SortOrder,
    ) -> Self {
        Self {
            id,
            season_id,
            pillar_id,
            theme: String::new(),
            sort_order,
            created_at: Timestamp::now(),
        }
    }

    pub fn reconstitute(
        id: SeasonPillarId,
        season_id: SeasonId,
        pillar_id: PillarId,
        theme: String,
        sort_order: SortOrder,
        created_at: Timestamp,
    ) -> Result<Self, DomainError> {
        let len = theme.chars().count();
        if len > MAX_THEME_LENGTH {
            return Err(DomainError::validation(
                "theme",
                format!("Theme must be {} characters or less, got {}", MAX_THEME_LENGTH, len),
            ));
        }
        Ok(Self {
            id,
            season_id,
            pillar_id,
            theme,
            sort_order,
            created_at,
        })
    }

    pub fn id(&self) -> &SeasonPillarId {
        &self.id
    }

    pub fn season_id(&self) -> &SeasonId {
        &self.season_id
    }

    pub fn pillar_id(&self) -> &PillarId {
        &self.pillar_id
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns a copy with a non-empty theme.
    pub fn with_theme(&self, theme: impl Into<String>) -> Result<Self, DomainError> {
        let theme = theme.into();
        rules::require_text("theme", &theme, MAX_THEME_LENGTH)?;
        Ok(Self {
            theme,
            ..self.clone()
        })
    }
}

/// An area of focus selected under a season pillar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonPillarArea {
    id: SeasonPillarAreaId,
    season_pillar_id: SeasonPillarId,
    area_of_focus_id: AreaOfFocusId,
    sort_order: SortOrder,
    created_at: Timestamp,
}

impl SeasonPillarArea {
    pub fn new(
        id: SeasonPillarAreaId,
        season_pillar_id: SeasonPillarId,
        area_of_focus_id: AreaOfFocusId,
        sort_order: SortOrder,
    ) -> Self {
        Self::reconstitute(id, season_pillar_id, area_of_focus_id, sort_order, Timestamp::now())
    }

    pub fn reconstitute(
        id: SeasonPillarAreaId,
        season_pillar_id: SeasonPillarId,
        area_of_focus_id: AreaOfFocusId,
        sort_order: SortOrder,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            season_pillar_id,
            area_of_focus_id,
            sort_order,
            created_at,
        }
    }

    pub fn id(&self) -> &SeasonPillarAreaId {
        &self.id
    }

    pub fn season_pillar_id(&self) -> &SeasonPillarId {
        &self.season_pillar_id
    }

    pub fn area_of_focus_id(&self) -> &AreaOfFocusId {
        &self.area_of_focus_id
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

/// A metric tracked inside a season pillar area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonAreaMetric {
    id: SeasonAreaMetricId,
    season_pillar_area_id: SeasonPillarAreaId,
    metric_id: MetricId,
    sort_order: SortOrder,
    created_at: Timestamp,
}

impl SeasonAreaMetric {
    pub fn new(
        id: SeasonAreaMetricId,
        season_pillar_area_id: SeasonPillarAreaId,
        metric_id: MetricId,
        sort_order: SortOrder,
    ) -> Self {
        Self::reconstitute(id, season_pillar_area_id, metric_id, sort_order, Timestamp::now())
    }

    pub fn reconstitute(
        id: SeasonAreaMetricId,
        season_pillar_area_id: SeasonPillarAreaId,
        metric_id: MetricId,
        sort_order: SortOrder,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            season_pillar_area_id,
            metric_id,
            sort_order,
            created_at,
        }
    }

    pub fn id(&self) -> &SeasonAreaMetricId {
        &self.id
    }

    pub fn season_pillar_area_id(&self) -> &SeasonPillarAreaId {
        &self.season_pillar_area_id
    }

    pub fn metric_id(&self) -> &MetricId {
        &self.metric_id
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}
