use std::collections::HashMap;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::hazards::dtos::{
    HazardDetailDto, HazardMapDto, HazardSummaryDto, HazardWithProgressDto,
};
use crate::features::hazards::models::HazardQuery;
use crate::features::repairs::dtos::RepairTrackerDto;
use crate::features::repairs::RepairLifecycle;
use crate::modules::store::RecordStore;

/// Read-only hazard projections
pub struct HazardService {
    store: Arc<dyn RecordStore>,
    lifecycle: RepairLifecycle,
}

impl HazardService {
    pub fn new(store: Arc<dyn RecordStore>, lifecycle: RepairLifecycle) -> Self {
        Self { store, lifecycle }
    }

    /// Hazards left-joined with their repair trackers
    pub async fn list_with_progress(&self, query: HazardQuery) -> Result<Vec<HazardWithProgressDto>> {
        let hazards = self.store.list_hazards(query).await?;
        if hazards.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = hazards.iter().map(|h| h.id).collect();
        let mut trackers: HashMap<i64, _> = self
            .store
            .list_trackers(&ids)
            .await?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();

        tracing::debug!(
            "Merging {} hazards with {} repair trackers",
            hazards.len(),
            trackers.len()
        );

        Ok(hazards
            .into_iter()
            .map(|hazard| {
                let progress = trackers
                    .remove(&hazard.id)
                    .map(|t| RepairTrackerDto::new(t, &self.lifecycle));
                HazardWithProgressDto {
                    hazard: hazard.into(),
                    progress,
                }
            })
            .collect())
    }

    pub async fn list_summaries(&self, query: HazardQuery) -> Result<Vec<HazardSummaryDto>> {
        let hazards = self.store.list_hazards(query).await?;
        Ok(hazards.into_iter().map(HazardSummaryDto::from).collect())
    }

    /// Hazards with repair-planning fields for the map view
    pub async fn list_for_map(&self, query: HazardQuery) -> Result<Vec<HazardMapDto>> {
        let hazards = self.store.list_hazards(query).await?;
        Ok(hazards.into_iter().map(HazardMapDto::from).collect())
    }

    pub async fn get(&self, id: i64) -> Result<HazardDetailDto> {
        self.store
            .find_hazard(id)
            .await?
            .map(HazardDetailDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Hazard {} not found", id)))
    }
}
