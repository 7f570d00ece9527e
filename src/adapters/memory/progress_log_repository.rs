//! In-memory progress log repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, MetricId, ProgressLogId, SeasonId};
use crate::domain::progress::MetricProgressLog;
use crate::ports::MetricProgressLogRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryProgressLogRepository {
    logs: Arc<RwLock<HashMap<ProgressLogId, MetricProgressLog>>>,
}

impl InMemoryProgressLogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: &ProgressLogId) -> DomainError {
    DomainError::not_found(ErrorCode::ProgressLogNotFound, "Progress log", id)
}

#[async_trait]
impl MetricProgressLogRepository for InMemoryProgressLogRepository {
    async fn create(&self, log: &MetricProgressLog) -> Result<(), DomainError> {
        self.logs.write().await.insert(*log.id(), log.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ProgressLogId,
    ) -> Result<Option<MetricProgressLog>, DomainError> {
        Ok(self.logs.read().await.get(id).cloned())
    }

    async fn find_by_season_and_metric(
        &self,
        season_id: &SeasonId,
        metric_id: &MetricId,
    ) -> Result<Vec<MetricProgressLog>, DomainError> {
        let logs = self.logs.read().await;
        let mut found: Vec<MetricProgressLog> = logs
            .values()
            .filter(|l| l.season_id() == season_id && l.metric_id() == metric_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.logged_at().cmp(a.logged_at()));
        Ok(found)
    }

    async fn find_latest(
        &self,
        season_id: &SeasonId,
        metric_id: &MetricId,
    ) -> Result<Option<MetricProgressLog>, DomainError> {
        let logs = self.logs.read().await;
        Ok(logs
            .values()
            .filter(|l| l.season_id() == season_id && l.metric_id() == metric_id)
            .max_by_key(|l| *l.logged_at())
            .cloned())
    }

    async fn update(&self, log: &MetricProgressLog) -> Result<(), DomainError> {
        let mut logs = self.logs.write().await;
        match logs.get_mut(log.id()) {
            Some(stored) => {
                *stored = log.clone();
                Ok(())
            }
            None => Err(not_found(log.id())),
        }
    }

    async fn delete(&self, id: &ProgressLogId) -> Result<(), DomainError> {
        self.logs
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    async fn delete_by_season_id(&self, season_id: &SeasonId) -> Result<u64, DomainError> {
        let mut logs = self.logs.write().await;
        let before = logs.len();
        logs.retain(|_, l| l.season_id() != season_id);
        Ok((before - logs.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Timestamp, UserId};
    use crate::domain::metric::Unit;
    use crate::domain::progress::Measurement;

    fn log(season: SeasonId, metric: MetricId, days_ago: i64, value: f64) -> MetricProgressLog {
        MetricProgressLog::manual(
            ProgressLogId::new(),
            season,
            metric,
            UserId::new(),
            Measurement {
                value,
                unit: Unit::Kg,
                canonical_value: value,
                logged_at: Timestamp::now().add_days(-days_ago),
                notes: None,
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn lists_newest_first_and_finds_latest() {
        let repo = InMemoryProgressLogRepository::new();
        let (season, metric) = (SeasonId::new(), MetricId::new());
        for (days, value) in [(3, 83.0), (1, 81.0), (2, 82.0)] {
            repo.create(&log(season, metric, days, value)).await.unwrap();
        }
        repo.create(&log(SeasonId::new(), metric, 0, 99.0)).await.unwrap();

        let values: Vec<f64> = repo
            .find_by_season_and_metric(&season, &metric)
            .await
            .unwrap()
            .iter()
            .map(|l| l.value())
            .collect();
        assert_eq!(values, vec![81.0, 82.0, 83.0]);

        let latest = repo.find_latest(&season, &metric).await.unwrap().unwrap();
        assert_eq!(latest.value(), 81.0);
    }

    #[tokio::test]
    async fn delete_by_season_keeps_other_seasons() {
        let repo = InMemoryProgressLogRepository::new();
        let (doomed, kept, metric) = (SeasonId::new(), SeasonId::new(), MetricId::new());
        repo.create(&log(doomed, metric, 2, 80.0)).await.unwrap();
        repo.create(&log(doomed, metric, 1, 79.0)).await.unwrap();
        repo.create(&log(kept, metric, 1, 90.0)).await.unwrap();

        assert_eq!(repo.delete_by_season_id(&doomed).await.unwrap(), 2);
        assert!(repo
            .find_by_season_and_metric(&doomed, &metric)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            repo.find_by_season_and_metric(&kept, &metric).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn delete_missing_log_is_not_found() {
        let repo = InMemoryProgressLogRepository::new();
        let err = repo.delete(&ProgressLogId::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ProgressLogNotFound);
    }
}
