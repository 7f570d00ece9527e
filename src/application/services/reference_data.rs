//! Startup readiness check over the reference datasets.
//!
//! Requests still read the catalog and the exercise library through their
//! repositories; this only proves both can be loaded before the server binds.

use futures::try_join;
use tracing::info;

use super::season_focus::{PillarWithAreas, SeasonFocusService};
use crate::domain::exercise::Exercise;
use crate::domain::season::SeasonError;
use crate::ports::ExerciseRepository;

/// Snapshot taken by the readiness check. Not kept after startup.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub pillars: Vec<PillarWithAreas>,
    pub exercises: Vec<Exercise>,
}

impl ReferenceData {
    /// Loads the pillar overview and the exercise library concurrently.
    ///
    /// The two loads are independent; the first failure wins.
    pub async fn prefetch(
        focus: &SeasonFocusService,
        exercises: &dyn ExerciseRepository,
    ) -> Result<Self, SeasonError> {
        let (pillars, exercises) = try_join!(focus.get_pillars_with_areas(), async {
            exercises.find_all().await.map_err(SeasonError::from)
        })?;

        info!(
            pillars = pillars.len(),
            exercises = exercises.len(),
            "Reference data prefetched"
        );
        Ok(Self { pillars, exercises })
    }
}
