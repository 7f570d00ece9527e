//! MetricGoal entity and progress calculation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    rules, DomainError, MetricGoalId, SeasonAreaMetricId, Timestamp, ValidationError,
};
use crate::domain::metric::Unit;

/// Values for a goal, as entered by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalValues {
    pub goal_value: f64,
    pub goal_unit: Unit,
    /// Goal expressed in the metric's default unit.
    pub canonical_value: f64,
    pub start_value: Option<f64>,
    pub start_unit: Option<Unit>,
    pub target_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl GoalValues {
    /// Goal with no baseline, date or notes; canonical equals the goal value.
    pub fn new(goal_value: f64, goal_unit: Unit) -> Self {
        Self {
            goal_value,
            goal_unit,
            canonical_value: goal_value,
            start_value: None,
            start_unit: None,
            target_date: None,
            notes: None,
        }
    }

    pub fn with_start(mut self, value: f64, unit: Unit) -> Self {
        self.start_value = Some(value);
        self.start_unit = Some(unit);
        self
    }

    pub fn with_target_date(mut self, date: NaiveDate) -> Self {
        self.target_date = Some(date);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_finite("goal_value", self.goal_value)?;
        require_finite("canonical_value", self.canonical_value)?;
        match (self.start_value, self.start_unit) {
            (Some(value), Some(_)) => require_finite("start_value", value)?,
            (None, None) => {}
            (Some(_), None) => {
                return Err(ValidationError::invalid_format(
                    "start_unit",
                    "start value and start unit must be set together",
                ))
            }
            (None, Some(_)) => {
                return Err(ValidationError::invalid_format(
                    "start_value",
                    "start value and start unit must be set together",
                ))
            }
        }
        rules::limit_optional("notes", self.notes.as_deref(), rules::MAX_NOTES_LENGTH)
    }
}

fn require_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::invalid_format(field, "must be a finite number"))
    }
}

/// A target value for one metric inside a season area.
///
/// # Invariants
///
/// - start value and start unit are both set or both absent
/// - `achieved_at` is set exactly when `is_achieved` is true
/// - `notes` is at most 500 characters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricGoal {
    id: MetricGoalId,
    season_area_metric_id: SeasonAreaMetricId,
    goal_value: f64,
    goal_unit: Unit,
    canonical_value: f64,
    start_value: Option<f64>,
    start_unit: Option<Unit>,
    target_date: Option<NaiveDate>,
    is_achieved: bool,
    achieved_at: Option<Timestamp>,
    notes: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl MetricGoal {
    /// Creates an open (not achieved) goal.
    pub fn new(
        id: MetricGoalId,
        season_area_metric_id: SeasonAreaMetricId,
        values: GoalValues,
    ) -> Result<Self, DomainError> {
        let now = Timestamp::now();
        Self::reconstitute(id, season_area_metric_id, values, None, now, now)
    }

    /// Rebuilds a goal from storage, re-checking every invariant.
    ///
    /// `achieved_at` carries both the achieved flag and its time.
    pub fn reconstitute(
        id: MetricGoalId,
        season_area_metric_id: SeasonAreaMetricId,
        values: GoalValues,
        achieved_at: Option<Timestamp>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Result<Self, DomainError> {
        values.validate()?;
        let GoalValues {
            goal_value,
            goal_unit,
            canonical_value,
            start_value,
            start_unit,
            target_date,
            notes,
        } = values;
        Ok(Self {
            id,
            season_area_metric_id,
            goal_value,
            goal_unit,
            canonical_value,
            start_value,
            start_unit,
            target_date,
            is_achieved: achieved_at.is_some(),
            achieved_at,
            notes,
            created_at,
            updated_at,
        })
    }

    pub fn id(&self) -> &MetricGoalId {
        &self.id
    }

    pub fn season_area_metric_id(&self) -> &SeasonAreaMetricId {
        &self.season_area_metric_id
    }

    pub fn goal_value(&self) -> f64 {
        self.goal_value
    }

    pub fn goal_unit(&self) -> Unit {
        self.goal_unit
    }

    pub fn canonical_value(&self) -> f64 {
        self.canonical_value
    }

    pub fn start_value(&self) -> Option<f64> {
        self.start_value
    }

    pub fn start_unit(&self) -> Option<Unit> {
        self.start_unit
    }

    pub fn target_date(&self) -> Option<NaiveDate> {
        self.target_date
    }

    pub fn is_achieved(&self) -> bool {
        self.is_achieved
    }

    pub fn achieved_at(&self) -> Option<&Timestamp> {
        self.achieved_at.as_ref()
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

    /// Returns the goal's editable values.
    pub fn values(&self) -> GoalValues {
        GoalValues {
            goal_value: self.goal_value,
            goal_unit: self.goal_unit,
            canonical_value: self.canonical_value,
            start_value: self.start_value,
            start_unit: self.start_unit,
            target_date: self.target_date,
            notes: self.notes.clone(),
        }
    }

    /// Fraction of the way from start to goal, in `[0, 1]`.
    pub fn calculate_progress(&self, canonical_current_value: f64) -> f64 {
        let goal = self.canonical_value;
        match self.start_value {
            Some(start) => {
                let total = (goal - start).abs();
                if total == 0.0 {
                    return if self.is_achieved { 1.0 } else { 0.0 };
                }
                ((canonical_current_value - start).abs() / total).clamp(0.0, 1.0)
            }
            None => {
                if goal == 0.0 {
                    return 0.0;
                }
                ((goal.abs() - (goal - canonical_current_value).abs()) / goal.abs()).max(0.0)
            }
        }
    }

    /// Returns true if `canonical_current_value` meets the goal.
    ///
    /// With a start value the direction follows start -> goal; without one
    /// the goal is treated as a minimum.
    pub fn is_achieved_by(&self, canonical_current_value: f64) -> bool {
        match self.start_value {
            Some(start) if self.canonical_value <= start => {
                canonical_current_value <= self.canonical_value
            }
            _ => canonical_current_value >= self.canonical_value,
        }
    }

    /// Returns a copy with replaced values; achievement state is kept.
    pub fn update(&self, values: GoalValues) -> Result<Self, DomainError> {
        values.validate()?;
        Ok(Self {
            goal_value: values.goal_value,
            goal_unit: values.goal_unit,
            canonical_value: values.canonical_value,
            start_value: values.start_value,
            start_unit: values.start_unit,
            target_date: values.target_date,
            notes: values.notes,
            updated_at: Timestamp::now(),
            ..self.clone()
        })
    }

    /// Returns an achieved copy stamped with `at` (default now).
    pub fn mark_achieved(&self, at: Option<Timestamp>) -> Self {
        let now = Timestamp::now();
        Self {
            is_achieved: true,
            achieved_at: Some(at.unwrap_or(now)),
            updated_at: now,
            ..self.clone()
        }
    }

    /// Returns a copy with achievement cleared.
    pub fn mark_not_achieved(&self) -> Self {
        Self {
            is_achieved: false,
            achieved_at: None,
            updated_at: Timestamp::now(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn cut(start: f64, goal: f64) -> MetricGoal {
        MetricGoal::new(
            MetricGoalId::new(),
            SeasonAreaMetricId::new(),
            GoalValues::new(goal, Unit::Kg).with_start(start, Unit::Kg),
        )
        .unwrap()
    }

    #[test]
    fn new_goal_keeps_values_and_is_open() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let goal = MetricGoal::new(
            MetricGoalId::new(),
            SeasonAreaMetricId::new(),
            GoalValues::new(75.0, Unit::Kg)
                .with_start(80.0, Unit::Kg)
                .with_target_date(date)
                .with_notes("summer"),
        )
        .unwrap();
        assert_eq!(goal.goal_value(), 75.0);
        assert_eq!(goal.canonical_value(), 75.0);
        assert_eq!(goal.start_value(), Some(80.0));
        assert_eq!(goal.start_unit(), Some(Unit::Kg));
        assert_eq!(goal.target_date(), Some(date));
        assert_eq!(goal.notes(), Some("summer"));
        assert!(!goal.is_achieved());
        assert!(goal.achieved_at().is_none());
    }

    #[test]
    fn decrease_goal_progress_is_halfway() {
        let goal = cut(90.0, 80.0);
        assert_eq!(goal.calculate_progress(85.0), 0.5);
        assert!(goal.is_achieved_by(80.0));
        assert!(!goal.is_achieved_by(85.0));
    }

    #[test]
    fn progress_clamps_past_the_goal() {
        let goal = cut(90.0, 80.0);
        assert_eq!(goal.calculate_progress(70.0), 1.0);
    }

    #[test]
    fn zero_distance_depends_on_achievement() {
        let goal = cut(80.0, 80.0);
        assert_eq!(goal.calculate_progress(80.0), 0.0);
        assert_eq!(goal.mark_achieved(None).calculate_progress(80.0), 1.0);
    }

    #[test]
    fn progress_without_start_measures_closeness() {
        let goal = MetricGoal::new(
            MetricGoalId::new(),
            SeasonAreaMetricId::new(),
            GoalValues::new(100.0, Unit::Count),
        )
        .unwrap();
        assert_eq!(goal.calculate_progress(75.0), 0.75);
        assert_eq!(goal.calculate_progress(300.0), 0.0);
        assert!(goal.is_achieved_by(100.0));
        assert!(!goal.is_achieved_by(99.0));
    }

    #[test]
    fn zero_goal_without_start_has_no_progress() {
        let goal = MetricGoal::new(
            MetricGoalId::new(),
            SeasonAreaMetricId::new(),
            GoalValues::new(0.0, Unit::Count),
        )
        .unwrap();
        assert_eq!(goal.calculate_progress(5.0), 0.0);
    }

    #[test]
    fn increase_goal_direction() {
        let goal = cut(60.0, 70.0);
        assert!(goal.is_achieved_by(71.0));
        assert!(!goal.is_achieved_by(65.0));
    }

    #[test]
    fn start_value_and_unit_go_together() {
        let mut values = GoalValues::new(75.0, Unit::Kg);
        values.start_value = Some(80.0);
        let err = MetricGoal::new(MetricGoalId::new(), SeasonAreaMetricId::new(), values)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field"), Some(&"start_unit".to_string()));
    }

    #[test]
    fn rejects_long_notes_and_nan() {
        let long = GoalValues::new(1.0, Unit::Kg).with_notes("n".repeat(501));
        assert!(MetricGoal::new(MetricGoalId::new(), SeasonAreaMetricId::new(), long).is_err());
        let nan = GoalValues::new(f64::NAN, Unit::Kg);
        assert!(MetricGoal::new(MetricGoalId::new(), SeasonAreaMetricId::new(), nan).is_err());
    }

    #[test]
    fn achievement_round_trip_keeps_original() {
        let goal = cut(90.0, 80.0);
        let achieved = goal.mark_achieved(None);
        assert!(achieved.is_achieved());
        assert!(achieved.achieved_at().is_some());
        assert!(!goal.is_achieved());

        let reopened = achieved.mark_not_achieved();
        assert!(!reopened.is_achieved());
        assert!(reopened.achieved_at().is_none());
    }

    #[test]
    fn update_replaces_values_only() {
        let goal = cut(90.0, 80.0).mark_achieved(None);
        let updated = goal.update(GoalValues::new(78.0, Unit::Kg)).unwrap();
        assert_eq!(updated.goal_value(), 78.0);
        assert_eq!(updated.start_value(), None);
        assert!(updated.is_achieved());
        assert_eq!(updated.id(), goal.id());
        assert_eq!(goal.goal_value(), 80.0);
    }
}
