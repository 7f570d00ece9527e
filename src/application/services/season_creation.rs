//! SeasonCreationService - assembles the season composition tree.
//!
//! Every operation is a sequence of awaited repository calls. Uniqueness of
//! associations is checked here with a read before the insert; the stores
//! only back this up with their own constraints.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use super::storage_failure;
use crate::domain::area_of_focus::AreaOfFocus;
use crate::domain::foundation::{
    AreaOfFocusId, ErrorCode, MetricGoalId, MetricId, PillarId, SeasonAreaMetricId, SeasonId,
    SeasonPillarAreaId, SeasonPillarId, SortOrder, UserId,
};
use crate::domain::goal::{GoalValues, MetricGoal};
use crate::domain::metric::{Metric, Unit};
use crate::domain::pillar::{Pillar, PillarName};
use crate::domain::season::{
    Season, SeasonAreaMetric, SeasonError, SeasonPillar, SeasonPillarArea,
};
use crate::ports::{
    AreaOfFocusRepository, MetricGoalRepository, MetricRepository, PillarRepository,
    SeasonCompositionRepository, SeasonRepository,
};

/// Command to create a draft season.
#[derive(Debug, Clone)]
pub struct CreateDraftSeasonCommand {
    pub user_id: UserId,
    pub name: String,
    pub duration_weeks: Option<i32>,
}

/// Command to attach an area of focus to a season pillar.
#[derive(Debug, Clone)]
pub struct AddAreaOfFocusCommand {
    pub season_pillar_id: SeasonPillarId,
    pub area_of_focus_id: AreaOfFocusId,
}

/// A value in a specific unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasuredValue {
    pub value: f64,
    pub unit: Unit,
}

/// Goal target supplied when a metric is added.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalTarget {
    pub value: f64,
    pub unit: Unit,
    pub target_date: Option<NaiveDate>,
}

/// Command to attach a metric to a season area, optionally with a goal.
#[derive(Debug, Clone)]
pub struct AddMetricCommand {
    pub season_pillar_area_id: SeasonPillarAreaId,
    pub metric_id: MetricId,
    pub baseline: Option<MeasuredValue>,
    pub target: Option<GoalTarget>,
}

/// Result of adding a metric.
#[derive(Debug, Clone)]
pub struct AddMetricResult {
    pub season_area_metric: SeasonAreaMetric,
    pub goal: Option<MetricGoal>,
}

/// Command to set or replace the goal of a season metric.
#[derive(Debug, Clone)]
pub struct UpdateMetricGoalCommand {
    pub season_area_metric_id: SeasonAreaMetricId,
    pub goal: MeasuredValue,
    pub start: Option<MeasuredValue>,
    pub target_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Fully expanded season for the creation screens.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonCreationView {
    pub season: Season,
    pub pillars: Vec<SeasonPillarView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeasonPillarView {
    pub season_pillar: SeasonPillar,
    pub pillar: Pillar,
    pub areas: Vec<SeasonAreaView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeasonAreaView {
    pub season_pillar_area: SeasonPillarArea,
    pub area_of_focus: AreaOfFocus,
    pub metrics: Vec<SeasonMetricView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeasonMetricView {
    pub season_area_metric: SeasonAreaMetric,
    pub metric: Metric,
    pub goal: Option<MetricGoal>,
}

/// Service that builds and edits the season composition tree.
pub struct SeasonCreationService {
    seasons: Arc<dyn SeasonRepository>,
    pillars: Arc<dyn PillarRepository>,
    areas: Arc<dyn AreaOfFocusRepository>,
    metrics: Arc<dyn MetricRepository>,
    composition: Arc<dyn SeasonCompositionRepository>,
    goals: Arc<dyn MetricGoalRepository>,
}

impl SeasonCreationService {
    pub fn new(
        seasons: Arc<dyn SeasonRepository>,
        pillars: Arc<dyn PillarRepository>,
        areas: Arc<dyn AreaOfFocusRepository>,
        metrics: Arc<dyn MetricRepository>,
        composition: Arc<dyn SeasonCompositionRepository>,
        goals: Arc<dyn MetricGoalRepository>,
    ) -> Self {
        Self {
            seasons,
            pillars,
            areas,
            metrics,
            composition,
            goals,
        }
    }

    /// Creates a draft season with the Health & Fitness pillar attached.
    ///
    /// # Errors
    ///
    /// - `Conflict(ActiveSeasonExists)` if the user already has an active season
    /// - `ValidationFailed` for an invalid name or duration
    /// - `NotFound(PillarNotFound)` if the system pillar is missing
    pub async fn create_draft_season(
        &self,
        cmd: CreateDraftSeasonCommand,
    ) -> Result<SeasonCreationView, SeasonError> {
        // Read-then-write: two concurrent calls can both pass this check.
        if let Some(active) = self
            .seasons
            .find_active_by_user_id(&cmd.user_id)
            .await
            .map_err(storage_failure("find active season"))?
        {
            return Err(SeasonError::conflict(
                ErrorCode::ActiveSeasonExists,
                format!("User already has an active season: {}", active.name()),
            ));
        }

        let season = Season::new(SeasonId::new(), cmd.user_id, cmd.name, cmd.duration_weeks)?;

        let health = self
            .pillars
            .find_by_name(PillarName::HealthAndFitness)
            .await
            .map_err(storage_failure("find health pillar"))?
            .ok_or_else(|| {
                SeasonError::not_found(
                    ErrorCode::PillarNotFound,
                    "Pillar",
                    PillarName::HealthAndFitness.as_str(),
                )
            })?;

        self.seasons
            .create(&season)
            .await
            .map_err(storage_failure("create season"))?;

        let season_pillar =
            SeasonPillar::new(SeasonPillarId::new(), *season.id(), *health.id(), SortOrder::FIRST);
        self.composition
            .create_season_pillar(&season_pillar)
            .await
            .map_err(storage_failure("attach health pillar"))?;

        info!(
            season_id = %season.id(),
            user_id = %season.user_id(),
            "Draft season created"
        );

        self.get_season_creation_view(season.id()).await
    }

    /// Sets the theme of the season pillar for `pillar_id`.
    ///
    /// # Errors
    ///
    /// - `NotFound(SeasonPillarNotFound)` if the pillar is not part of the season
    /// - `ValidationFailed` for an empty or over-long theme
    pub async fn set_pillar_theme(
        &self,
        season_id: &SeasonId,
        pillar_id: &PillarId,
        theme: &str,
    ) -> Result<SeasonPillar, SeasonError> {
        let season_pillar = self
            .composition
            .find_season_pillars(season_id)
            .await
            .map_err(storage_failure("list season pillars"))?
            .into_iter()
            .find(|sp| sp.pillar_id() == pillar_id)
            .ok_or_else(|| {
                SeasonError::not_found(
                    ErrorCode::SeasonPillarNotFound,
                    "Season pillar",
                    format!("{}/{}", season_id, pillar_id),
                )
            })?;

        let themed = season_pillar.with_theme(theme)?;
        self.composition
            .update_season_pillar(&themed)
            .await
            .map_err(storage_failure("update season pillar"))?;

        self.composition
            .find_season_pillar_by_id(themed.id())
            .await
            .map_err(storage_failure("reload season pillar"))?
            .ok_or_else(|| {
                SeasonError::not_found(ErrorCode::SeasonPillarNotFound, "Season pillar", themed.id())
            })
    }

    /// Attaches an area of focus to a season pillar at the next sort position.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the season pillar or the area doesn't exist
    /// - `Conflict(AlreadyExists)` if the area is already attached
    pub async fn add_area_of_focus_to_season_pillar(
        &self,
        cmd: AddAreaOfFocusCommand,
    ) -> Result<SeasonPillarArea, SeasonError> {
        self.composition
            .find_season_pillar_by_id(&cmd.season_pillar_id)
            .await
            .map_err(storage_failure("find season pillar"))?
            .ok_or_else(|| {
                SeasonError::not_found(
                    ErrorCode::SeasonPillarNotFound,
                    "Season pillar",
                    cmd.season_pillar_id,
                )
            })?;

        self.areas
            .find_by_id(&cmd.area_of_focus_id)
            .await
            .map_err(storage_failure("find area of focus"))?
            .ok_or_else(|| {
                SeasonError::not_found(
                    ErrorCode::AreaOfFocusNotFound,
                    "Area of focus",
                    cmd.area_of_focus_id,
                )
            })?;

        let existing = self
            .composition
            .find_season_pillar_areas(&cmd.season_pillar_id)
            .await
            .map_err(storage_failure("list season pillar areas"))?;

        if existing
            .iter()
            .any(|spa| spa.area_of_focus_id() == &cmd.area_of_focus_id)
        {
            return Err(SeasonError::conflict(
                ErrorCode::AlreadyExists,
                "Area of focus already added to this pillar",
            ));
        }

        let row = SeasonPillarArea::new(
            SeasonPillarAreaId::new(),
            cmd.season_pillar_id,
            cmd.area_of_focus_id,
            SortOrder::next_after(existing.iter().map(|spa| spa.sort_order())),
        );
        self.composition
            .create_season_pillar_area(&row)
            .await
            .map_err(storage_failure("create season pillar area"))?;

        info!(
            season_pillar_area_id = %row.id(),
            area_of_focus_id = %row.area_of_focus_id(),
            "Area of focus added to season pillar"
        );
        Ok(row)
    }

    /// Attaches a metric to a season area and creates its goal when a
    /// baseline or target is supplied.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the season area or the metric doesn't exist
    /// - `Conflict(AlreadyExists)` if the metric is already tracked in the area
    pub async fn add_metric_to_season_area(
        &self,
        cmd: AddMetricCommand,
    ) -> Result<AddMetricResult, SeasonError> {
        self.composition
            .find_season_pillar_area_by_id(&cmd.season_pillar_area_id)
            .await
            .map_err(storage_failure("find season pillar area"))?
            .ok_or_else(|| {
                SeasonError::not_found(
                    ErrorCode::SeasonPillarAreaNotFound,
                    "Season pillar area",
                    cmd.season_pillar_area_id,
                )
            })?;

        let metric = self
            .metrics
            .find_by_id(&cmd.metric_id)
            .await
            .map_err(storage_failure("find metric"))?
            .ok_or_else(|| SeasonError::not_found(ErrorCode::MetricNotFound, "Metric", cmd.metric_id))?;

        let existing = self
            .composition
            .find_season_area_metrics(&cmd.season_pillar_area_id)
            .await
            .map_err(storage_failure("list season area metrics"))?;

        if existing.iter().any(|sam| sam.metric_id() == &cmd.metric_id) {
            return Err(SeasonError::conflict(
                ErrorCode::AlreadyExists,
                "Already tracking this metric in this area",
            ));
        }

        let row = SeasonAreaMetric::new(
            SeasonAreaMetricId::new(),
            cmd.season_pillar_area_id,
            cmd.metric_id,
            SortOrder::next_after(existing.iter().map(|sam| sam.sort_order())),
        );
        self.composition
            .create_season_area_metric(&row)
            .await
            .map_err(storage_failure("create season area metric"))?;

        let goal = match initial_goal_values(&metric, cmd.baseline, cmd.target) {
            Some(values) => {
                let goal = MetricGoal::new(MetricGoalId::new(), *row.id(), values)?;
                self.goals
                    .create(&goal)
                    .await
                    .map_err(storage_failure("create metric goal"))?;
                Some(goal)
            }
            None => None,
        };

        info!(
            season_area_metric_id = %row.id(),
            metric_id = %row.metric_id(),
            has_goal = goal.is_some(),
            "Metric added to season area"
        );
        Ok(AddMetricResult {
            season_area_metric: row,
            goal,
        })
    }

    /// Loads the whole tree below a season.
    ///
    /// Pillars, areas and metrics that no longer resolve are skipped with a
    /// warning instead of failing the read.
    ///
    /// # Errors
    ///
    /// - `NotFound(SeasonNotFound)` if the season doesn't exist
    pub async fn get_season_creation_view(
        &self,
        season_id: &SeasonId,
    ) -> Result<SeasonCreationView, SeasonError> {
        let season = self
            .seasons
            .find_by_id(season_id)
            .await
            .map_err(storage_failure("find season"))?
            .ok_or_else(|| SeasonError::not_found(ErrorCode::SeasonNotFound, "Season", season_id))?;

        let season_pillars = self
            .composition
            .find_season_pillars(season_id)
            .await
            .map_err(storage_failure("list season pillars"))?;

        let mut pillars = Vec::with_capacity(season_pillars.len());
        for season_pillar in season_pillars {
            let Some(pillar) = self
                .pillars
                .find_by_id(season_pillar.pillar_id())
                .await
                .map_err(storage_failure("find pillar"))?
            else {
                warn!(pillar_id = %season_pillar.pillar_id(), "Pillar missing from season view");
                continue;
            };
            let areas = self.area_views(season_pillar.id()).await?;
            pillars.push(SeasonPillarView {
                season_pillar,
                pillar,
                areas,
            });
        }

        Ok(SeasonCreationView { season, pillars })
    }

    async fn area_views(
        &self,
        season_pillar_id: &SeasonPillarId,
    ) -> Result<Vec<SeasonAreaView>, SeasonError> {
        let rows = self
            .composition
            .find_season_pillar_areas(season_pillar_id)
            .await
            .map_err(storage_failure("list season pillar areas"))?;

        let mut views = Vec::with_capacity(rows.len());
        for season_pillar_area in rows {
            let Some(area_of_focus) = self
                .areas
                .find_by_id(season_pillar_area.area_of_focus_id())
                .await
                .map_err(storage_failure("find area of focus"))?
            else {
                warn!(
                    area_of_focus_id = %season_pillar_area.area_of_focus_id(),
                    "Area of focus missing from season view"
                );
                continue;
            };
            let metrics = self.metric_views(season_pillar_area.id()).await?;
            views.push(SeasonAreaView {
                season_pillar_area,
                area_of_focus,
                metrics,
            });
        }
        Ok(views)
    }

    async fn metric_views(
        &self,
        season_pillar_area_id: &SeasonPillarAreaId,
    ) -> Result<Vec<SeasonMetricView>, SeasonError> {
        let rows = self
            .composition
            .find_season_area_metrics(season_pillar_area_id)
            .await
            .map_err(storage_failure("list season area metrics"))?;

        let mut views = Vec::with_capacity(rows.len());
        for season_area_metric in rows {
            let Some(metric) = self
                .metrics
                .find_by_id(season_area_metric.metric_id())
                .await
                .map_err(storage_failure("find metric"))?
            else {
                warn!(metric_id = %season_area_metric.metric_id(), "Metric missing from season view");
                continue;
            };
            let goal = self
                .goals
                .find_by_season_area_metric_id(season_area_metric.id())
                .await
                .map_err(storage_failure("find metric goal"))?;
            views.push(SeasonMetricView {
                season_area_metric,
                metric,
                goal,
            });
        }
        Ok(views)
    }

    /// Detaches an area from its season pillar along with its metrics and goals.
    pub async fn remove_area_of_focus_from_season_pillar(
        &self,
        season_pillar_area_id: &SeasonPillarAreaId,
    ) -> Result<(), SeasonError> {
        self.composition
            .delete_season_pillar_area(season_pillar_area_id)
            .await
            .map_err(storage_failure("delete season pillar area"))?;

        info!(season_pillar_area_id = %season_pillar_area_id, "Area of focus removed from season pillar");
        Ok(())
    }

    /// Detaches a metric from its season area along with its goal.
    pub async fn remove_metric_from_season_area(
        &self,
        season_area_metric_id: &SeasonAreaMetricId,
    ) -> Result<(), SeasonError> {
        self.composition
            .delete_season_area_metric(season_area_metric_id)
            .await
            .map_err(storage_failure("delete season area metric"))?;

        info!(season_area_metric_id = %season_area_metric_id, "Metric removed from season area");
        Ok(())
    }

    /// Replaces the goal of a season metric, creating it if none exists.
    ///
    /// Achievement state of an existing goal is kept.
    ///
    /// # Errors
    ///
    /// - `NotFound(SeasonAreaMetricNotFound)` if the season metric doesn't exist
    /// - `ValidationFailed` for invalid goal values
    pub async fn update_metric_goal(
        &self,
        cmd: UpdateMetricGoalCommand,
    ) -> Result<MetricGoal, SeasonError> {
        self.composition
            .find_season_area_metric_by_id(&cmd.season_area_metric_id)
            .await
            .map_err(storage_failure("find season area metric"))?
            .ok_or_else(|| {
                SeasonError::not_found(
                    ErrorCode::SeasonAreaMetricNotFound,
                    "Season area metric",
                    cmd.season_area_metric_id,
                )
            })?;

        let mut values = GoalValues::new(cmd.goal.value, cmd.goal.unit);
        if let Some(start) = cmd.start {
            values = values.with_start(start.value, start.unit);
        }
        if let Some(date) = cmd.target_date {
            values = values.with_target_date(date);
        }
        if let Some(notes) = cmd.notes {
            values = values.with_notes(notes);
        }

        let existing = self
            .goals
            .find_by_season_area_metric_id(&cmd.season_area_metric_id)
            .await
            .map_err(storage_failure("find metric goal"))?;

        let goal = match existing {
            Some(goal) => {
                let updated = goal.update(values)?;
                self.goals
                    .update(&updated)
                    .await
                    .map_err(storage_failure("update metric goal"))?;
                updated
            }
            None => {
                let created = MetricGoal::new(MetricGoalId::new(), cmd.season_area_metric_id, values)?;
                self.goals
                    .create(&created)
                    .await
                    .map_err(storage_failure("create metric goal"))?;
                created
            }
        };

        info!(metric_goal_id = %goal.id(), "Metric goal updated");
        Ok(goal)
    }

    /// Whether a season may be started. Always false until training phases exist.
    pub fn validate_season_can_start(&self, _season_id: &SeasonId) -> bool {
        false
    }
}

/// Goal values for a newly added metric: target first, then baseline, then zero.
///
/// The canonical value is the raw goal value; no unit conversion is applied.
fn initial_goal_values(
    metric: &Metric,
    baseline: Option<MeasuredValue>,
    target: Option<GoalTarget>,
) -> Option<GoalValues> {
    if baseline.is_none() && target.is_none() {
        return None;
    }
    let goal_value = target
        .map(|t| t.value)
        .or(baseline.map(|b| b.value))
        .unwrap_or(0.0);
    let goal_unit = target
        .map(|t| t.unit)
        .or(baseline.map(|b| b.unit))
        .unwrap_or_else(|| metric.default_unit());
    let mut values = GoalValues::new(goal_value, goal_unit);
    if let Some(b) = baseline {
        values = values.with_start(b.value, b.unit);
    }
    if let Some(date) = target.and_then(|t| t.target_date) {
        values = values.with_target_date(date);
    }
    Some(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        seed, InMemoryAreaOfFocusRepository, InMemoryMetricGoalRepository,
        InMemoryMetricRepository, InMemoryPillarRepository, InMemorySeasonCompositionRepository,
        InMemorySeasonRepository,
    };
    use crate::domain::foundation::{DomainError, Timestamp};
    use crate::domain::pillar::PillarName;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Fixture {
        service: SeasonCreationService,
        seasons: Arc<InMemorySeasonRepository>,
        areas: Arc<InMemoryAreaOfFocusRepository>,
        metrics: Arc<InMemoryMetricRepository>,
        goals: Arc<InMemoryMetricGoalRepository>,
    }

    fn fixture() -> Fixture {
        let seasons = Arc::new(InMemorySeasonRepository::new());
        let pillars = Arc::new(InMemoryPillarRepository::seeded().unwrap());
        let areas = Arc::new(InMemoryAreaOfFocusRepository::seeded().unwrap());
        let metrics = Arc::new(InMemoryMetricRepository::seeded().unwrap());
        let goals = Arc::new(InMemoryMetricGoalRepository::new());
        let composition = Arc::new(InMemorySeasonCompositionRepository::new(goals.clone()));
        let service = SeasonCreationService::new(
            seasons.clone(),
            pillars,
            areas.clone(),
            metrics.clone(),
            composition,
            goals.clone(),
        );
        Fixture {
            service,
            seasons,
            areas,
            metrics,
            goals,
        }
    }

    fn create_cmd(user_id: UserId, name: &str) -> CreateDraftSeasonCommand {
        CreateDraftSeasonCommand {
            user_id,
            name: name.to_string(),
            duration_weeks: Some(12),
        }
    }

    async fn area_named(fx: &Fixture, name: &str) -> AreaOfFocus {
        fx.areas
            .find_all_active()
            .await
            .unwrap()
            .into_iter()
            .find(|a| a.name() == name)
            .unwrap()
    }

    async fn metric_named(fx: &Fixture, name: &str) -> Metric {
        fx.metrics
            .find_all_active()
            .await
            .unwrap()
            .into_iter()
            .find(|m| m.name() == name)
            .unwrap()
    }

    #[tokio::test]
    async fn draft_season_gets_health_pillar_at_first_position() {
        let fx = fixture();
        let view = fx
            .service
            .create_draft_season(create_cmd(UserId::new(), "Summer Cut"))
            .await
            .unwrap();

        assert_eq!(view.season.name(), "Summer Cut");
        assert_eq!(view.pillars.len(), 1);
        let health = &view.pillars[0];
        assert_eq!(health.pillar.name(), PillarName::HealthAndFitness);
        assert_eq!(health.season_pillar.sort_order(), SortOrder::FIRST);
        assert_eq!(health.season_pillar.theme(), "");
        assert!(health.areas.is_empty());
    }

    #[tokio::test]
    async fn second_season_is_rejected_while_one_is_active() {
        let fx = fixture();
        let user = UserId::new();
        let view = fx
            .service
            .create_draft_season(create_cmd(user, "Spring"))
            .await
            .unwrap();
        let active = view.season.start(Some(Timestamp::now())).unwrap();
        fx.seasons.update(&active).await.unwrap();

        let err = fx
            .service
            .create_draft_season(create_cmd(user, "Summer"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ActiveSeasonExists);
    }

    #[tokio::test]
    async fn drafts_do_not_block_new_seasons() {
        let fx = fixture();
        let user = UserId::new();
        fx.service
            .create_draft_season(create_cmd(user, "One"))
            .await
            .unwrap();
        assert!(fx
            .service
            .create_draft_season(create_cmd(user, "Two"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn invalid_name_creates_nothing() {
        let fx = fixture();
        let err = fx
            .service
            .create_draft_season(create_cmd(UserId::new(), "   "))
            .await
            .unwrap_err();
        assert!(matches!(err, SeasonError::ValidationFailed { .. }));
        assert!(fx.seasons.is_empty().await);
    }

    #[tokio::test]
    async fn pillar_theme_is_set_and_reloaded() {
        let fx = fixture();
        let view = fx
            .service
            .create_draft_season(create_cmd(UserId::new(), "Cut"))
            .await
            .unwrap();
        let health = seed::pillar_id(PillarName::HealthAndFitness);

        let themed = fx
            .service
            .set_pillar_theme(view.season.id(), &health, "Get lean")
            .await
            .unwrap();
        assert_eq!(themed.theme(), "Get lean");

        let err = fx
            .service
            .set_pillar_theme(view.season.id(), &health, "")
            .await
            .unwrap_err();
        assert!(matches!(err, SeasonError::ValidationFailed { .. }));
    }

    #[tokio::test]
    async fn theme_for_unattached_pillar_is_not_found() {
        let fx = fixture();
        let view = fx
            .service
            .create_draft_season(create_cmd(UserId::new(), "Cut"))
            .await
            .unwrap();
        let err = fx
            .service
            .set_pillar_theme(view.season.id(), &seed::pillar_id(PillarName::Wealth), "Save")
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::SeasonPillarNotFound);
    }

    #[tokio::test]
    async fn areas_get_increasing_sort_orders_and_reject_duplicates() {
        let fx = fixture();
        let view = fx
            .service
            .create_draft_season(create_cmd(UserId::new(), "Cut"))
            .await
            .unwrap();
        let sp_id = *view.pillars[0].season_pillar.id();
        let strength = area_named(&fx, "Strength").await;
        let cardio = area_named(&fx, "Cardio").await;

        let first = fx
            .service
            .add_area_of_focus_to_season_pillar(AddAreaOfFocusCommand {
                season_pillar_id: sp_id,
                area_of_focus_id: *strength.id(),
            })
            .await
            .unwrap();
        let second = fx
            .service
            .add_area_of_focus_to_season_pillar(AddAreaOfFocusCommand {
                season_pillar_id: sp_id,
                area_of_focus_id: *cardio.id(),
            })
            .await
            .unwrap();
        assert_eq!(first.sort_order().value(), 0);
        assert_eq!(second.sort_order().value(), 1);

        let err = fx
            .service
            .add_area_of_focus_to_season_pillar(AddAreaOfFocusCommand {
                season_pillar_id: sp_id,
                area_of_focus_id: *strength.id(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::AlreadyExists);
    }

    #[tokio::test]
    async fn unknown_area_is_not_found() {
        let fx = fixture();
        let view = fx
            .service
            .create_draft_season(create_cmd(UserId::new(), "Cut"))
            .await
            .unwrap();
        let err = fx
            .service
            .add_area_of_focus_to_season_pillar(AddAreaOfFocusCommand {
                season_pillar_id: *view.pillars[0].season_pillar.id(),
                area_of_focus_id: AreaOfFocusId::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::AreaOfFocusNotFound);
    }

    async fn season_with_area(fx: &Fixture) -> (SeasonId, SeasonPillarAreaId) {
        let view = fx
            .service
            .create_draft_season(create_cmd(UserId::new(), "Cut"))
            .await
            .unwrap();
        let strength = area_named(fx, "Strength").await;
        let spa = fx
            .service
            .add_area_of_focus_to_season_pillar(AddAreaOfFocusCommand {
                season_pillar_id: *view.pillars[0].season_pillar.id(),
                area_of_focus_id: *strength.id(),
            })
            .await
            .unwrap();
        (*view.season.id(), *spa.id())
    }

    #[tokio::test]
    async fn metric_goal_prefers_target_over_baseline() {
        let fx = fixture();
        let (_, spa_id) = season_with_area(&fx).await;
        let weight = metric_named(&fx, "Body Weight").await;

        let result = fx
            .service
            .add_metric_to_season_area(AddMetricCommand {
                season_pillar_area_id: spa_id,
                metric_id: *weight.id(),
                baseline: Some(MeasuredValue {
                    value: 80.0,
                    unit: Unit::Kg,
                }),
                target: Some(GoalTarget {
                    value: 75.0,
                    unit: Unit::Kg,
                    target_date: NaiveDate::from_ymd_opt(2024, 6, 1),
                }),
            })
            .await
            .unwrap();

        let goal = result.goal.unwrap();
        assert_eq!(goal.goal_value(), 75.0);
        assert_eq!(goal.canonical_value(), 75.0);
        assert_eq!(goal.start_value(), Some(80.0));
        assert_eq!(goal.target_date(), NaiveDate::from_ymd_opt(2024, 6, 1));
        assert!(!goal.is_achieved());
    }

    #[tokio::test]
    async fn baseline_alone_becomes_the_goal() {
        let fx = fixture();
        let (_, spa_id) = season_with_area(&fx).await;
        let weight = metric_named(&fx, "Body Weight").await;

        let result = fx
            .service
            .add_metric_to_season_area(AddMetricCommand {
                season_pillar_area_id: spa_id,
                metric_id: *weight.id(),
                baseline: Some(MeasuredValue {
                    value: 176.0,
                    unit: Unit::Lbs,
                }),
                target: None,
            })
            .await
            .unwrap();

        let goal = result.goal.unwrap();
        assert_eq!(goal.goal_value(), 176.0);
        assert_eq!(goal.goal_unit(), Unit::Lbs);
        // Stored as entered, not converted to kg.
        assert_eq!(goal.canonical_value(), 176.0);
    }

    #[tokio::test]
    async fn metric_without_values_has_no_goal_and_duplicates_conflict() {
        let fx = fixture();
        let (_, spa_id) = season_with_area(&fx).await;
        let bench = metric_named(&fx, "Bench Press 1RM").await;
        let cmd = AddMetricCommand {
            season_pillar_area_id: spa_id,
            metric_id: *bench.id(),
            baseline: None,
            target: None,
        };

        let result = fx.service.add_metric_to_season_area(cmd.clone()).await.unwrap();
        assert!(result.goal.is_none());
        assert!(fx.goals.is_empty().await);

        let err = fx.service.add_metric_to_season_area(cmd).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::AlreadyExists);
    }

    #[tokio::test]
    async fn removing_an_area_removes_its_metrics_and_goals() {
        let fx = fixture();
        let (season_id, spa_id) = season_with_area(&fx).await;
        let weight = metric_named(&fx, "Body Weight").await;
        fx.service
            .add_metric_to_season_area(AddMetricCommand {
                season_pillar_area_id: spa_id,
                metric_id: *weight.id(),
                baseline: None,
                target: Some(GoalTarget {
                    value: 75.0,
                    unit: Unit::Kg,
                    target_date: None,
                }),
            })
            .await
            .unwrap();

        fx.service
            .remove_area_of_focus_from_season_pillar(&spa_id)
            .await
            .unwrap();

        let view = fx.service.get_season_creation_view(&season_id).await.unwrap();
        assert!(view.pillars[0].areas.is_empty());
        assert!(fx.goals.is_empty().await);
    }

    #[tokio::test]
    async fn removing_a_missing_metric_is_not_found() {
        let fx = fixture();
        let err = fx
            .service
            .remove_metric_from_season_area(&SeasonAreaMetricId::new())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::SeasonAreaMetricNotFound);
    }

    #[tokio::test]
    async fn update_metric_goal_creates_then_replaces() {
        let fx = fixture();
        let (_, spa_id) = season_with_area(&fx).await;
        let weight = metric_named(&fx, "Body Weight").await;
        let sam = fx
            .service
            .add_metric_to_season_area(AddMetricCommand {
                season_pillar_area_id: spa_id,
                metric_id: *weight.id(),
                baseline: None,
                target: None,
            })
            .await
            .unwrap()
            .season_area_metric;

        let cmd = UpdateMetricGoalCommand {
            season_area_metric_id: *sam.id(),
            goal: MeasuredValue {
                value: 78.0,
                unit: Unit::Kg,
            },
            start: None,
            target_date: None,
            notes: None,
        };
        let created = fx.service.update_metric_goal(cmd.clone()).await.unwrap();
        assert_eq!(created.goal_value(), 78.0);

        let replaced = fx
            .service
            .update_metric_goal(UpdateMetricGoalCommand {
                goal: MeasuredValue {
                    value: 74.0,
                    unit: Unit::Kg,
                },
                notes: Some("stretch".to_string()),
                ..cmd
            })
            .await
            .unwrap();
        assert_eq!(replaced.id(), created.id());
        assert_eq!(replaced.goal_value(), 74.0);
        assert_eq!(fx.goals.len().await, 1);
    }

    #[tokio::test]
    async fn missing_season_view_is_not_found() {
        let fx = fixture();
        let err = fx
            .service
            .get_season_creation_view(&SeasonId::new())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::SeasonNotFound);
    }

    #[tokio::test]
    async fn seasons_can_never_start_yet() {
        let fx = fixture();
        assert!(!fx.service.validate_season_can_start(&SeasonId::new()));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Failure propagation
    // ─────────────────────────────────────────────────────────────────────

    struct FailingSeasonRepository {
        calls: Mutex<Vec<&'static str>>,
    }

    #[async_trait]
    impl SeasonRepository for FailingSeasonRepository {
        async fn create(&self, _season: &Season) -> Result<(), DomainError> {
            self.calls.lock().unwrap().push("create");
            Err(DomainError::database(
                "Failed to insert season",
                "duplicate key value violates unique constraint",
            ))
        }
        async fn find_by_id(&self, _id: &SeasonId) -> Result<Option<Season>, DomainError> {
            Ok(None)
        }
        async fn find_by_user_id(&self, _user_id: &UserId) -> Result<Vec<Season>, DomainError> {
            Ok(vec![])
        }
        async fn find_active_by_user_id(
            &self,
            _user_id: &UserId,
        ) -> Result<Option<Season>, DomainError> {
            self.calls.lock().unwrap().push("find_active");
            Ok(None)
        }
        async fn update(&self, _season: &Season) -> Result<(), DomainError> {
            Ok(())
        }
        async fn delete(&self, _id: &SeasonId) -> Result<(), DomainError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn store_errors_surface_unwrapped_as_infrastructure() {
        let seasons = Arc::new(FailingSeasonRepository {
            calls: Mutex::new(vec![]),
        });
        let goals = Arc::new(InMemoryMetricGoalRepository::new());
        let service = SeasonCreationService::new(
            seasons.clone(),
            Arc::new(InMemoryPillarRepository::seeded().unwrap()),
            Arc::new(InMemoryAreaOfFocusRepository::seeded().unwrap()),
            Arc::new(InMemoryMetricRepository::seeded().unwrap()),
            Arc::new(InMemorySeasonCompositionRepository::new(goals.clone())),
            goals,
        );

        let err = service
            .create_draft_season(create_cmd(UserId::new(), "Dup"))
            .await
            .unwrap_err();
        match err {
            SeasonError::Infrastructure(msg) => assert!(msg.contains("duplicate key")),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(*seasons.calls.lock().unwrap(), vec!["find_active", "create"]);
    }
}
