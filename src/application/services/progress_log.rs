//! ProgressLogService - records progress values for season metrics.
//!
//! Values are stored as entered and also converted to the metric's default
//! unit so entries logged in different units compare directly.

use std::sync::Arc;

use tracing::info;

use super::storage_failure;
use crate::domain::foundation::{
    ErrorCode, MetricId, OwnedByUser, ProgressLogId, SeasonId, Timestamp, UserId,
};
use crate::domain::metric::{Metric, Unit};
use crate::domain::progress::{Measurement, MetricProgressLog};
use crate::domain::season::SeasonError;
use crate::ports::{MetricProgressLogRepository, MetricRepository, SeasonRepository};

/// Command to record a manual progress value.
#[derive(Debug, Clone)]
pub struct LogProgressCommand {
    pub season_id: SeasonId,
    pub metric_id: MetricId,
    pub user_id: UserId,
    pub value: f64,
    pub unit: Unit,
    /// Defaults to now.
    pub logged_at: Option<Timestamp>,
    pub notes: Option<String>,
}

/// Command to correct a manual progress value.
#[derive(Debug, Clone)]
pub struct UpdateProgressLogCommand {
    pub log_id: ProgressLogId,
    pub user_id: UserId,
    pub value: f64,
    pub unit: Unit,
    pub logged_at: Option<Timestamp>,
    pub notes: Option<String>,
}

pub struct ProgressLogService {
    logs: Arc<dyn MetricProgressLogRepository>,
    metrics: Arc<dyn MetricRepository>,
    seasons: Arc<dyn SeasonRepository>,
}

impl ProgressLogService {
    pub fn new(
        logs: Arc<dyn MetricProgressLogRepository>,
        metrics: Arc<dyn MetricRepository>,
        seasons: Arc<dyn SeasonRepository>,
    ) -> Self {
        Self {
            logs,
            metrics,
            seasons,
        }
    }

    /// Records a manual entry for a season the user owns.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the season or metric doesn't exist
    /// - `Forbidden` if the user doesn't own the season
    /// - `ValidationFailed` if the unit isn't supported by the metric
    pub async fn log_progress(
        &self,
        cmd: LogProgressCommand,
    ) -> Result<MetricProgressLog, SeasonError> {
        let season = self
            .seasons
            .find_by_id(&cmd.season_id)
            .await
            .map_err(storage_failure("find season"))?
            .ok_or_else(|| SeasonError::not_found(ErrorCode::SeasonNotFound, "Season", cmd.season_id))?;
        season.check_ownership(&cmd.user_id)?;

        let metric = self.load_metric(&cmd.metric_id).await?;
        let measurement = measure(&metric, cmd.value, cmd.unit, cmd.logged_at, cmd.notes)?;

        let log = MetricProgressLog::manual(
            ProgressLogId::new(),
            cmd.season_id,
            cmd.metric_id,
            cmd.user_id,
            measurement,
        )?;
        self.logs
            .create(&log)
            .await
            .map_err(storage_failure("create progress log"))?;

        info!(
            progress_log_id = %log.id(),
            metric_id = %log.metric_id(),
            canonical_value = log.canonical_value(),
            "Progress logged"
        );
        Ok(log)
    }

    /// Replaces the value of a manual entry.
    ///
    /// # Errors
    ///
    /// - `Conflict(ImmutableEntry)` for app-calculated or imported entries
    /// - `Forbidden` if the user doesn't own the entry
    pub async fn update_progress_log(
        &self,
        cmd: UpdateProgressLogCommand,
    ) -> Result<MetricProgressLog, SeasonError> {
        let log = self.load_log(&cmd.log_id).await?;
        log.ensure_mutable_by(&cmd.user_id)?;

        let metric = self.load_metric(log.metric_id()).await?;
        let logged_at = cmd.logged_at.or(Some(*log.logged_at()));
        let measurement = measure(&metric, cmd.value, cmd.unit, logged_at, cmd.notes)?;

        let updated = log.update(measurement, &cmd.user_id)?;
        self.logs
            .update(&updated)
            .await
            .map_err(storage_failure("update progress log"))?;

        info!(progress_log_id = %updated.id(), "Progress log updated");
        Ok(updated)
    }

    /// Deletes a manual entry owned by the user.
    pub async fn delete_progress_log(
        &self,
        log_id: &ProgressLogId,
        user_id: &UserId,
    ) -> Result<(), SeasonError> {
        let log = self.load_log(log_id).await?;
        log.ensure_mutable_by(user_id)?;
        self.logs
            .delete(log_id)
            .await
            .map_err(storage_failure("delete progress log"))?;

        info!(progress_log_id = %log_id, "Progress log deleted");
        Ok(())
    }

    /// Entries for one metric in one season, newest first.
    pub async fn list_progress(
        &self,
        season_id: &SeasonId,
        metric_id: &MetricId,
    ) -> Result<Vec<MetricProgressLog>, SeasonError> {
        self.logs
            .find_by_season_and_metric(season_id, metric_id)
            .await
            .map_err(storage_failure("list progress logs"))
    }

    async fn load_metric(&self, metric_id: &MetricId) -> Result<Metric, SeasonError> {
        self.metrics
            .find_by_id(metric_id)
            .await
            .map_err(storage_failure("find metric"))?
            .ok_or_else(|| SeasonError::not_found(ErrorCode::MetricNotFound, "Metric", metric_id))
    }

    async fn load_log(&self, log_id: &ProgressLogId) -> Result<MetricProgressLog, SeasonError> {
        self.logs
            .find_by_id(log_id)
            .await
            .map_err(storage_failure("find progress log"))?
            .ok_or_else(|| {
                SeasonError::not_found(ErrorCode::ProgressLogNotFound, "Progress log", log_id)
            })
    }
}

fn measure(
    metric: &Metric,
    value: f64,
    unit: Unit,
    logged_at: Option<Timestamp>,
    notes: Option<String>,
) -> Result<Measurement, SeasonError> {
    let canonical_value = metric.convert_to_default_unit(value, unit)?;
    Ok(Measurement {
        value,
        unit,
        canonical_value,
        logged_at: logged_at.unwrap_or_else(Timestamp::now),
        notes,
    })
}
