//! Season aggregate entity.
//!
//! A season is a user's time-boxed goal-tracking period. It owns the
//! composition tree (pillars, areas, metrics) only by reference: the rows
//! live in the composition repository.

use serde::{Deserialize, Serialize};

use super::SeasonStatus;
use crate::domain::foundation::{
    rules, DomainError, ErrorCode, OwnedByUser, SeasonId, StateMachine, Timestamp, UserId,
    ValidationError,
};

/// Shortest allowed season, in weeks.
pub const MIN_DURATION_WEEKS: i32 = 1;

/// Longest allowed season, in weeks.
pub const MAX_DURATION_WEEKS: i32 = 52;

/// Season aggregate.
///
/// # Invariants
///
/// - `name` is 1-100 characters and not a reserved word
/// - `duration_weeks`, when set, is 1-52
/// - `Active` requires `start_date`; `Completed` requires `end_date`
/// - when both dates are set, `start_date < end_date`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    id: SeasonId,
    user_id: UserId,
    name: String,
    duration_weeks: Option<i32>,
    status: SeasonStatus,
    start_date: Option<Timestamp>,
    end_date: Option<Timestamp>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Season {
    /// Creates a new draft season.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the name or duration is invalid
    pub fn new(
        id: SeasonId,
        user_id: UserId,
        name: impl Into<String>,
        duration_weeks: Option<i32>,
    ) -> Result<Self, DomainError> {
        let now = Timestamp::now();
        Self::reconstitute(
            id,
            user_id,
            name.into(),
            duration_weeks,
            SeasonStatus::Draft,
            None,
            None,
            now,
            now,
        )
    }

    /// Rebuilds a season from storage, re-checking every invariant.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SeasonId,
        user_id: UserId,
        name: String,
        duration_weeks: Option<i32>,
        status: SeasonStatus,
        start_date: Option<Timestamp>,
        end_date: Option<Timestamp>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Result<Self, DomainError> {
        rules::require_name("name", &name)?;
        validate_duration(duration_weeks)?;
        validate_dates(status, start_date.as_ref(), end_date.as_ref())?;
        Ok(Self {
            id,
            user_id,
            name,
            duration_weeks,
            status,
            start_date,
            end_date,
            created_at,
            updated_at,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SeasonId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration_weeks(&self) -> Option<i32> {
        self.duration_weeks
    }

    pub fn status(&self) -> SeasonStatus {
        self.status
    }

    pub fn start_date(&self) -> Option<&Timestamp> {
        self.start_date.as_ref()
    }

    pub fn end_date(&self) -> Option<&Timestamp> {
        self.end_date.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn is_active(&self) -> bool {
        self.status == SeasonStatus::Active
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle (each returns a new instance)
    // ─────────────────────────────────────────────────────────────────────────

    /// Starts a draft season at `start_date` (default now).
    ///
    /// With a duration, the end date is `start + 7 * duration_weeks` days.
    pub fn start(&self, start_date: Option<Timestamp>) -> Result<Self, DomainError> {
        self.require_status("start", &[SeasonStatus::Draft])?;
        let status = self.status.transition_to(SeasonStatus::Active)?;
        let start = start_date.unwrap_or_else(Timestamp::now);
        let end = match self.duration_weeks {
            Some(weeks) => Some(start.add_weeks(i64::from(weeks))),
            None => self.end_date,
        };
        validate_dates(status, Some(&start), end.as_ref())?;
        Ok(Self {
            status,
            start_date: Some(start),
            end_date: end,
            updated_at: Timestamp::now(),
            ..self.clone()
        })
    }

    /// Pauses an active season.
    pub fn pause(&self) -> Result<Self, DomainError> {
        self.require_status("pause", &[SeasonStatus::Active])?;
        self.with_status(SeasonStatus::Paused)
    }

    /// Resumes a paused season.
    pub fn resume(&self) -> Result<Self, DomainError> {
        self.require_status("resume", &[SeasonStatus::Paused])?;
        self.with_status(SeasonStatus::Active)
    }

    /// Completes an active or paused season at `end_date` (default now).
    pub fn complete(&self, end_date: Option<Timestamp>) -> Result<Self, DomainError> {
        self.require_status("complete", &[SeasonStatus::Active, SeasonStatus::Paused])?;
        let status = self.status.transition_to(SeasonStatus::Completed)?;
        let end = end_date.unwrap_or_else(Timestamp::now);
        validate_dates(status, self.start_date.as_ref(), Some(&end))?;
        Ok(Self {
            status,
            end_date: Some(end),
            updated_at: Timestamp::now(),
            ..self.clone()
        })
    }

    /// Cancels the season; a cancelled season is returned unchanged.
    pub fn cancel(&self) -> Result<Self, DomainError> {
        if self.status == SeasonStatus::Cancelled {
            return Ok(self.clone());
        }
        self.with_status(SeasonStatus::Cancelled)
    }

    /// Archives a completed or cancelled season.
    pub fn archive(&self) -> Result<Self, DomainError> {
        self.require_status(
            "archive",
            &[SeasonStatus::Completed, SeasonStatus::Cancelled],
        )?;
        self.with_status(SeasonStatus::Archived)
    }

    /// Returns a copy with a new name and duration.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the season is a draft
    /// - `Forbidden` if `acting_user` does not own the season
    /// - `ValidationFailed` for an invalid name or duration
    pub fn update_metadata(
        &self,
        name: impl Into<String>,
        duration_weeks: Option<i32>,
        acting_user: Option<&UserId>,
    ) -> Result<Self, DomainError> {
        self.require_status("update", &[SeasonStatus::Draft])?;
        self.check_acting_user(acting_user)?;
        let name = name.into();
        rules::require_name("name", &name)?;
        validate_duration(duration_weeks)?;
        Ok(Self {
            name,
            duration_weeks,
            updated_at: Timestamp::now(),
            ..self.clone()
        })
    }

    fn with_status(&self, target: SeasonStatus) -> Result<Self, DomainError> {
        let status = self.status.transition_to(target)?;
        Ok(Self {
            status,
            updated_at: Timestamp::now(),
            ..self.clone()
        })
    }

    fn require_status(&self, action: &str, allowed: &[SeasonStatus]) -> Result<(), DomainError> {
        if allowed.contains(&self.status) {
            return Ok(());
        }
        Err(DomainError::new(
            ErrorCode::InvalidStateTransition,
            format!("Cannot {} season in status {}", action, self.status),
        )
        .with_detail("current_status", self.status.as_str()))
    }
}

impl OwnedByUser for Season {
    fn owner_id(&self) -> Option<&UserId> {
        Some(&self.user_id)
    }
}

fn validate_duration(duration_weeks: Option<i32>) -> Result<(), ValidationError> {
    match duration_weeks {
        Some(weeks) if !(MIN_DURATION_WEEKS..=MAX_DURATION_WEEKS).contains(&weeks) => {
            Err(ValidationError::out_of_range(
                "duration_weeks",
                i64::from(MIN_DURATION_WEEKS),
                i64::from(MAX_DURATION_WEEKS),
                i64::from(weeks),
            ))
        }
        _ => Ok(()),
    }
}

fn validate_dates(
    status: SeasonStatus,
    start_date: Option<&Timestamp>,
    end_date: Option<&Timestamp>,
) -> Result<(), ValidationError> {
    if status == SeasonStatus::Active && start_date.is_none() {
        return Err(ValidationError::empty_field("start_date"));
    }
    if status == SeasonStatus::Completed && end_date.is_none() {
        return Err(ValidationError::empty_field("end_date"));
    }
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if !start.is_before(end) {
            return Err(ValidationError::invalid_format(
                "end_date",
                "must be after start_date",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};

    fn at(s: &str) -> Timestamp {
        Timestamp::from_datetime(DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc))
    }

    fn summer_cut() -> Season {
        Season::new(SeasonId::new(), UserId::new(), "Summer Cut", Some(12)).unwrap()
    }

    fn assert_state_error(result: Result<Season, DomainError>, current: &str) {
        let err = result.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert!(err.message.contains(current), "message: {}", err.message);
    }

    #[test]
    fn new_season_is_draft_without_dates() {
        let season = summer_cut();
        assert_eq!(season.status(), SeasonStatus::Draft);
        assert_eq!(season.name(), "Summer Cut");
        assert_eq!(season.duration_weeks(), Some(12));
        assert!(season.start_date().is_none());
        assert!(season.end_date().is_none());
    }

    #[test]
    fn rejects_bad_names_and_durations() {
        for (name, weeks) in [("", Some(4)), ("Default", Some(4)), ("Bulk", Some(0)), ("Bulk", Some(53))] {
            assert!(Season::new(SeasonId::new(), UserId::new(), name, weeks).is_err());
        }
        assert!(Season::new(SeasonId::new(), UserId::new(), "Bulk", None).is_ok());
    }

    #[test]
    fn start_computes_end_from_duration() {
        let d = at("2024-03-01T00:00:00Z");
        let started = summer_cut().start(Some(d)).unwrap();
        assert_eq!(started.status(), SeasonStatus::Active);
        assert_eq!(started.start_date(), Some(&d));
        assert_eq!(
            started.end_date().unwrap().duration_since(&d),
            Duration::days(84)
        );
    }

    #[test]
    fn start_without_duration_leaves_end_open() {
        let season = Season::new(SeasonId::new(), UserId::new(), "Open", None).unwrap();
        let started = season.start(None).unwrap();
        assert!(started.start_date().is_some());
        assert!(started.end_date().is_none());
    }

    #[test]
    fn start_on_non_draft_names_current_status() {
        let active = summer_cut().start(None).unwrap();
        assert_state_error(active.start(None), "ACTIVE");
        let paused = active.pause().unwrap();
        assert_state_error(paused.start(None), "PAUSED");
    }

    #[test]
    fn pause_resume_complete_flow() {
        let start = Timestamp::now().add_days(-10);
        let active = summer_cut().start(Some(start)).unwrap();
        let paused = active.pause().unwrap();
        assert_eq!(paused.status(), SeasonStatus::Paused);
        let resumed = paused.resume().unwrap();
        assert_eq!(resumed.status(), SeasonStatus::Active);
        let done = resumed.complete(None).unwrap();
        assert_eq!(done.status(), SeasonStatus::Completed);
        assert!(done.end_date().unwrap().is_after(&start));
        assert_eq!(active.status(), SeasonStatus::Active);
    }

    #[test]
    fn complete_before_start_is_rejected() {
        let start = at("2024-03-01T00:00:00Z");
        let active = summer_cut().start(Some(start)).unwrap();
        assert!(active.complete(Some(start.add_days(-1))).is_err());
    }

    #[test]
    fn archive_requires_finished_season() {
        assert_state_error(summer_cut().archive(), "DRAFT");
        let cancelled = summer_cut().cancel().unwrap();
        assert_eq!(cancelled.archive().unwrap().status(), SeasonStatus::Archived);
    }

    #[test]
    fn cancel_is_idempotent_and_blocked_after_completion() {
        let cancelled = summer_cut().cancel().unwrap();
        let again = cancelled.cancel().unwrap();
        assert_eq!(again, cancelled);

        let start = Timestamp::now().add_days(-1);
        let done = summer_cut()
            .start(Some(start))
            .unwrap()
            .complete(None)
            .unwrap();
        assert_state_error(done.cancel(), "COMPLETED");
    }

    #[test]
    fn update_metadata_only_in_draft_and_by_owner() {
        let season = summer_cut();
        let owner = *season.user_id();
        let renamed = season
            .update_metadata("Winter Bulk", Some(16), Some(&owner))
            .unwrap();
        assert_eq!(renamed.name(), "Winter Bulk");
        assert_eq!(renamed.duration_weeks(), Some(16));
        assert_eq!(season.name(), "Summer Cut");

        let err = season
            .update_metadata("Mine", None, Some(&UserId::new()))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);

        let active = season.start(None).unwrap();
        assert_state_error(active.update_metadata("Late", None, None), "ACTIVE");
    }

    #[test]
    fn reconstitute_enforces_date_invariants() {
        let now = Timestamp::now();
        let active_without_start = Season::reconstitute(
            SeasonId::new(),
            UserId::new(),
            "Cut".to_string(),
            None,
            SeasonStatus::Active,
            None,
            None,
            now,
            now,
        );
        assert!(active_without_start.is_err());

        let reversed = Season::reconstitute(
            SeasonId::new(),
            UserId::new(),
            "Cut".to_string(),
            None,
            SeasonStatus::Draft,
            Some(now),
            Some(now.add_days(-1)),
            now,
            now,
        );
        assert!(reversed.is_err());
    }
}
