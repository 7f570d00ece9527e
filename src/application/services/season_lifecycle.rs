//! SeasonLifecycleService - persisted season status transitions.
//!
//! Each operation loads the season, checks that the acting user owns it,
//! applies the pure transition and writes the result back.

use std::sync::Arc;

use tracing::info;

use super::storage_failure;
use crate::domain::foundation::{DomainError, ErrorCode, OwnedByUser, SeasonId, Timestamp, UserId};
use crate::domain::season::{Season, SeasonError};
use crate::ports::{MetricProgressLogRepository, SeasonCompositionRepository, SeasonRepository};

/// Command to rename a draft season or change its duration.
#[derive(Debug, Clone)]
pub struct UpdateSeasonMetadataCommand {
    pub season_id: SeasonId,
    pub user_id: UserId,
    pub name: String,
    pub duration_weeks: Option<i32>,
}

pub struct SeasonLifecycleService {
    seasons: Arc<dyn SeasonRepository>,
    composition: Arc<dyn SeasonCompositionRepository>,
    progress_logs: Arc<dyn MetricProgressLogRepository>,
}

impl SeasonLifecycleService {
    pub fn new(
        seasons: Arc<dyn SeasonRepository>,
        composition: Arc<dyn SeasonCompositionRepository>,
        progress_logs: Arc<dyn MetricProgressLogRepository>,
    ) -> Self {
        Self {
            seasons,
            composition,
            progress_logs,
        }
    }

    /// Starts a draft season.
    ///
    /// # Errors
    ///
    /// - `Conflict(ActiveSeasonExists)` if another season of the user is active
    /// - `InvalidState` unless the season is a draft
    pub async fn start(
        &self,
        season_id: &SeasonId,
        user_id: &UserId,
        start_date: Option<Timestamp>,
    ) -> Result<Season, SeasonError> {
        let season = self.load_owned(season_id, user_id).await?;
        self.ensure_no_other_active(&season).await?;
        self.persist("start", season.start(start_date)?).await
    }

    pub async fn pause(&self, season_id: &SeasonId, user_id: &UserId) -> Result<Season, SeasonError> {
        self.transition(season_id, user_id, "pause", Season::pause).await
    }

    /// Resumes a paused season.
    ///
    /// # Errors
    ///
    /// - `Conflict(ActiveSeasonExists)` if another season of the user became active meanwhile
    /// - `InvalidState` unless the season is paused
    pub async fn resume(&self, season_id: &SeasonId, user_id: &UserId) -> Result<Season, SeasonError> {
        let season = self.load_owned(season_id, user_id).await?;
        self.ensure_no_other_active(&season).await?;
        self.persist("resume", season.resume()?).await
    }

    pub async fn complete(
        &self,
        season_id: &SeasonId,
        user_id: &UserId,
        end_date: Option<Timestamp>,
    ) -> Result<Season, SeasonError> {
        self.transition(season_id, user_id, "complete", |s| s.complete(end_date))
            .await
    }

    /// Cancels a season. Cancelling a cancelled season succeeds unchanged.
    pub async fn cancel(&self, season_id: &SeasonId, user_id: &UserId) -> Result<Season, SeasonError> {
        self.transition(season_id, user_id, "cancel", Season::cancel).await
    }

    pub async fn archive(&self, season_id: &SeasonId, user_id: &UserId) -> Result<Season, SeasonError> {
        self.transition(season_id, user_id, "archive", Season::archive).await
    }

    /// Renames a draft season or changes its duration.
    pub async fn update_metadata(
        &self,
        cmd: UpdateSeasonMetadataCommand,
    ) -> Result<Season, SeasonError> {
        let user_id = cmd.user_id;
        self.transition(&cmd.season_id, &user_id, "update", move |s| {
            s.update_metadata(cmd.name, cmd.duration_weeks, Some(&user_id))
        })
        .await
    }

    /// Deletes a season together with its composition tree and progress logs.
    pub async fn delete(&self, season_id: &SeasonId, user_id: &UserId) -> Result<(), SeasonError> {
        let season = self.load_owned(season_id, user_id).await?;

        let removed_logs = self
            .progress_logs
            .delete_by_season_id(season.id())
            .await
            .map_err(storage_failure("delete progress logs"))?;

        let season_pillars = self
            .composition
            .find_season_pillars(season.id())
            .await
            .map_err(storage_failure("list season pillars"))?;
        for season_pillar in &season_pillars {
            self.composition
                .delete_season_pillar(season_pillar.id())
                .await
                .map_err(storage_failure("delete season pillar"))?;
        }

        self.seasons
            .delete(season.id())
            .await
            .map_err(storage_failure("delete season"))?;

        info!(season_id = %season.id(), removed_logs, "Season deleted");
        Ok(())
    }

    /// A user may have at most one active season; `season` itself doesn't count.
    async fn ensure_no_other_active(&self, season: &Season) -> Result<(), SeasonError> {
        let active = self
            .seasons
            .find_active_by_user_id(season.user_id())
            .await
            .map_err(storage_failure("find active season"))?;
        match active {
            Some(active) if active.id() != season.id() => Err(SeasonError::conflict(
                ErrorCode::ActiveSeasonExists,
                format!("User already has an active season: {}", active.name()),
            )),
            _ => Ok(()),
        }
    }

    async fn load_owned(&self, season_id: &SeasonId, user_id: &UserId) -> Result<Season, SeasonError> {
        let season = self
            .seasons
            .find_by_id(season_id)
            .await
            .map_err(storage_failure("find season"))?
            .ok_or_else(|| SeasonError::not_found(ErrorCode::SeasonNotFound, "Season", season_id))?;
        season.check_ownership(user_id)?;
        Ok(season)
    }

    async fn transition<F>(
        &self,
        season_id: &SeasonId,
        user_id: &UserId,
        action: &'static str,
        apply: F,
    ) -> Result<Season, SeasonError>
    where
        F: FnOnce(&Season) -> Result<Season, DomainError>,
    {
        let season = self.load_owned(season_id, user_id).await?;
        let next = apply(&season)?;
        self.persist(action, next).await
    }

    async fn persist(&self, action: &'static str, season: Season) -> Result<Season, SeasonError> {
        self.seasons
            .update(&season)
            .await
            .map_err(storage_failure("update season"))?;

        info!(
            season_id = %season.id(),
            action,
            status = season.status().as_str(),
            "Season transitioned"
        );
        Ok(season)
    }
}
