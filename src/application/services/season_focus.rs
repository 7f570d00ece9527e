//! SeasonFocusService - read-only pillar and area aggregation for onboarding.

use std::sync::Arc;

use serde::Serialize;

use super::storage_failure;
use crate::domain::area_of_focus::AreaOfFocus;
use crate::domain::foundation::{ErrorCode, PillarId};
use crate::domain::pillar::Pillar;
use crate::domain::season::SeasonError;
use crate::ports::{AreaOfFocusRepository, PillarRepository};

/// A pillar with the predefined areas users can pick from.
#[derive(Debug, Clone, Serialize)]
pub struct PillarWithAreas {
    pub pillar: Pillar,
    pub areas: Vec<AreaOfFocus>,
}

pub struct SeasonFocusService {
    pillars: Arc<dyn PillarRepository>,
    areas: Arc<dyn AreaOfFocusRepository>,
}

impl SeasonFocusService {
    pub fn new(pillars: Arc<dyn PillarRepository>, areas: Arc<dyn AreaOfFocusRepository>) -> Self {
        Self { pillars, areas }
    }

    /// All active pillars by sort order, each with its predefined areas.
    pub async fn get_pillars_with_areas(&self) -> Result<Vec<PillarWithAreas>, SeasonError> {
        let mut pillars = self
            .pillars
            .find_all_active()
            .await
            .map_err(storage_failure("list pillars"))?;
        pillars.sort_by_key(|p| p.sort_order());

        let mut result = Vec::with_capacity(pillars.len());
        for pillar in pillars {
            let areas = self.predefined_areas(pillar.id()).await?;
            result.push(PillarWithAreas { pillar, areas });
        }
        Ok(result)
    }

    /// One pillar with its predefined areas.
    ///
    /// # Errors
    ///
    /// - `NotFound(PillarNotFound)` if the pillar doesn't exist
    pub async fn get_pillar_with_areas(
        &self,
        pillar_id: &PillarId,
    ) -> Result<PillarWithAreas, SeasonError> {
        let pillar = self
            .pillars
            .find_by_id(pillar_id)
            .await
            .map_err(storage_failure("find pillar"))?
            .ok_or_else(|| SeasonError::not_found(ErrorCode::PillarNotFound, "Pillar", pillar_id))?;
        let areas = self.predefined_areas(pillar.id()).await?;
        Ok(PillarWithAreas { pillar, areas })
    }

    /// Every active area of focus, ordered by name.
    pub async fn get_all_areas(&self) -> Result<Vec<AreaOfFocus>, SeasonError> {
        self.areas
            .find_all_active()
            .await
            .map_err(storage_failure("list areas of focus"))
    }

    async fn predefined_areas(&self, pillar_id: &PillarId) -> Result<Vec<AreaOfFocus>, SeasonError> {
        self.areas
            .find_predefined_by_pillar_id(pillar_id)
            .await
            .map_err(storage_failure("list predefined areas"))
    }
}
