//! Application layer - services that sequence repository calls.
//!
//! Services own no persistence logic. They load entities through ports,
//! apply pure domain operations, and write the results back.

pub mod services;

pub use services::{
    AddAreaOfFocusCommand, AddMetricCommand, AddMetricResult, CreateDraftSeasonCommand,
    GoalTarget, LogProgressCommand, MeasuredValue, PillarWithAreas, ProgressLogService,
    ReferenceData, SeasonAreaView, SeasonCreationService, SeasonCreationView,
    SeasonFocusService, SeasonLifecycleService, SeasonMetricView, SeasonPillarView,
    UpdateMetricGoalCommand, UpdateProgressLogCommand, UpdateSeasonMetadataCommand,
};

use std::sync::Arc;

use crate::ports::Repositories;

/// Every application service, wired to one set of repositories.
#[derive(Clone)]
pub struct Services {
    pub creation: Arc<SeasonCreationService>,
    pub focus: Arc<SeasonFocusService>,
    pub lifecycle: Arc<SeasonLifecycleService>,
    pub progress: Arc<ProgressLogService>,
}

impl Services {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            creation: Arc::new(SeasonCreationService::new(
                repos.seasons.clone(),
                repos.pillars.clone(),
                repos.areas.clone(),
                repos.metrics.clone(),
                repos.composition.clone(),
                repos.goals.clone(),
            )),
            focus: Arc::new(SeasonFocusService::new(
                repos.pillars.clone(),
                repos.areas.clone(),
            )),
            lifecycle: Arc::new(SeasonLifecycleService::new(
                repos.seasons.clone(),
                repos.composition.clone(),
                repos.progress_logs.clone(),
            )),
            progress: Arc::new(ProgressLogService::new(
                repos.progress_logs.clone(),
                repos.metrics.clone(),
                repos.seasons.clone(),
            )),
        }
    }
}
