use std::sync::Arc;

use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::repairs::dtos::{RepairTrackerDto, RepairTransitionsDto, UpdateRepairDto};
use crate::features::repairs::lifecycle::RepairLifecycle;
use crate::features::repairs::models::{RepairTracker, TrackerUpdate, UpdateOutcome};
use crate::modules::store::RecordStore;

/// Service for repair tracking and stage transitions
pub struct RepairService {
    store: Arc<dyn RecordStore>,
    lifecycle: RepairLifecycle,
}

impl RepairService {
    pub fn new(store: Arc<dyn RecordStore>, lifecycle: RepairLifecycle) -> Self {
        Self { store, lifecycle }
    }

    /// Tracker for a hazard, if one exists
    pub async fn get_tracker(&self, id: i64) -> Result<Option<RepairTrackerDto>> {
        let tracker = self.store.find_tracker(id).await?;
        Ok(tracker.map(|t| RepairTrackerDto::new(t, &self.lifecycle)))
    }

    /// Current stage and the stages a client may request next
    pub async fn transitions(&self, id: i64) -> Result<RepairTransitionsDto> {
        let tracker = self.require(id).await?;

        Ok(RepairTransitionsDto {
            id,
            current_stage: self.lifecycle.derive_stage(&tracker),
            stages: self.lifecycle.stages().to_vec(),
            allowed: self.lifecycle.allowed_next(&tracker),
            allow_skip: self.lifecycle.allows_skip(),
        })
    }

    /// Move a tracker to a later stage.
    ///
    /// Validation runs against a fresh read; the write itself is guarded so a
    /// concurrent request that got there first turns this one into a rejection
    /// instead of an overwrite.
    pub async fn advance(&self, id: i64, dto: &UpdateRepairDto) -> Result<RepairTrackerDto> {
        let requested = self.lifecycle.parse(&dto.status)?;
        let current = self.require(id).await?;

        let from = self.lifecycle.check_transition(&current, requested)?;

        let update = TrackerUpdate {
            stage: requested,
            at: Utc::now(),
            guard: self.lifecycle.guard_for(requested),
            worker_id: dto.worker_id,
            photo_url: dto.photo_url.clone(),
        };

        match self.store.update_tracker(id, &update).await? {
            UpdateOutcome::Updated(tracker) => {
                tracing::info!(
                    "Repair {} advanced: {} -> {} (worker: {:?})",
                    id,
                    from,
                    requested,
                    tracker.worker_id
                );
                Ok(RepairTrackerDto::new(tracker, &self.lifecycle))
            }
            UpdateOutcome::Missing => Err(Self::not_found(id)),
            UpdateOutcome::Conflict => {
                tracing::warn!(
                    "Repair {} changed while advancing to {}; request rejected",
                    id,
                    requested
                );
                Err(AppError::InvalidTransition(format!(
                    "Repair {} was updated concurrently; reload and try again",
                    id
                )))
            }
        }
    }

    async fn require(&self, id: i64) -> Result<RepairTracker> {
        self.store
            .find_tracker(id)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    fn not_found(id: i64) -> AppError {
        AppError::NotFound(format!("No repair entry found for hazard {}", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RepairConfig;
    use crate::features::hazards::models::{Hazard, HazardQuery};
    use crate::features::repairs::models::Stage;
    use crate::features::workers::models::Worker;
    use crate::modules::store::MemoryStore;
    use crate::shared::test_helpers::sample_hazard;
    use async_trait::async_trait;

    fn dto(status: &str) -> UpdateRepairDto {
        UpdateRepairDto {
            status: status.to_string(),
            worker_id: None,
            photo_url: None,
        }
    }

    async fn setup(config: RepairConfig) -> (Arc<MemoryStore>, RepairService, i64) {
        let store = Arc::new(MemoryStore::new());
        let hazard = store.insert_hazard(sample_hazard(None)).await;
        let service = RepairService::new(store.clone(), RepairLifecycle::new(config));
        (store, service, hazard.id)
    }

    #[tokio::test]
    async fn test_advance_sets_only_requested_stamp() {
        let (store, service, id) = setup(RepairConfig::default()).await;
        let before = Utc::now();

        let mut request = dto("assigned");
        request.worker_id = Some(7);
        let updated = service.advance(id, &request).await.unwrap();

        assert_eq!(updated.stage, Stage::Assigned);
        assert_eq!(updated.worker_id, Some(7));
        assert!(updated.team_assigned_at.unwrap() >= before);
        assert!(updated.in_progress_at.is_none());
        assert!(updated.completed_at.is_none());

        let stored = store.find_tracker(id).await.unwrap().unwrap();
        assert_eq!(stored.team_assigned_at, updated.team_assigned_at);
    }

    #[tokio::test]
    async fn test_example_sequence() {
        let (store, service, id) = setup(RepairConfig::default()).await;

        let mut assign = dto("assigned");
        assign.worker_id = Some(7);
        let assigned = service.advance(id, &assign).await.unwrap();

        let err = service.advance(id, &dto("assigned")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(ref m) if m == "Already assigned"));
        assert_eq!(
            store.find_tracker(id).await.unwrap().unwrap().team_assigned_at,
            assigned.team_assigned_at
        );

        // skipping in_progress is allowed by default
        let completed = service.advance(id, &dto("completed")).await.unwrap();
        assert_eq!(completed.stage, Stage::Completed);
        assert!(completed.in_progress_at.is_none());
        assert_eq!(completed.worker_id, Some(7));
        assert_eq!(completed.team_assigned_at, assigned.team_assigned_at);
    }

    #[tokio::test]
    async fn test_backward_request_does_not_mutate() {
        let (store, service, id) = setup(RepairConfig::default()).await;
        service.advance(id, &dto("in_progress")).await.unwrap();
        let snapshot = store.find_tracker(id).await.unwrap().unwrap();

        for status in ["reported", "assigned", "in_progress"] {
            let mut request = dto(status);
            request.worker_id = Some(99);
            let err = service.advance(id, &request).await.unwrap_err();
            assert!(matches!(err, AppError::InvalidTransition(_)), "{}", status);
        }

        assert_eq!(store.find_tracker(id).await.unwrap().unwrap(), snapshot);
    }

    #[tokio::test]
    async fn test_missing_tracker_is_not_found() {
        let (store, service, _) = setup(RepairConfig::default()).await;

        let err = service.advance(404, &dto("assigned")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(store.find_tracker(404).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_status_is_validation_error() {
        let (store, service, id) = setup(RepairConfig::default()).await;
        let snapshot = store.find_tracker(id).await.unwrap().unwrap();

        for status in ["fixed", "on_the_way"] {
            let err = service.advance(id, &dto(status)).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{}", status);
        }
        assert_eq!(store.find_tracker(id).await.unwrap().unwrap(), snapshot);
    }

    #[tokio::test]
    async fn test_sequential_policy_rejects_skips() {
        let (_, service, id) = setup(RepairConfig {
            allow_stage_skip: false,
            enable_on_the_way: true,
        })
        .await;

        let err = service.advance(id, &dto("in_progress")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));

        for status in ["assigned", "on_the_way", "in_progress", "completed"] {
            service.advance(id, &dto(status)).await.unwrap();
        }

        let transitions = service.transitions(id).await.unwrap();
        assert_eq!(transitions.current_stage, Stage::Completed);
        assert!(transitions.allowed.is_empty());
    }

    #[tokio::test]
    async fn test_stamps_only_grow_over_a_sequence() {
        let config = RepairConfig {
            allow_stage_skip: true,
            enable_on_the_way: true,
        };
        let (store, service, id) = setup(config).await;
        let lifecycle = RepairLifecycle::new(config);
        let requests = [
            "in_progress", "assigned", "on_the_way", "completed", "in_progress", "completed",
        ];

        let mut previous = store.find_tracker(id).await.unwrap().unwrap();
        for status in requests {
            let _ = service.advance(id, &dto(status)).await;
            let next = store.find_tracker(id).await.unwrap().unwrap();

            for stage in Stage::ALL {
                if let Some(at) = previous.timestamp(stage) {
                    assert_eq!(next.timestamp(stage), Some(at));
                }
            }
            assert!(lifecycle.derive_stage(&next) >= lifecycle.derive_stage(&previous));
            previous = next;
        }
        assert_eq!(lifecycle.derive_stage(&previous), Stage::Completed);
    }

    /// Store whose row changes between the read and the guarded write
    struct RacingStore {
        inner: MemoryStore,
    }

    #[async_trait]
    impl RecordStore for RacingStore {
        async fn list_hazards(&self, query: HazardQuery) -> Result<Vec<Hazard>> {
            self.inner.list_hazards(query).await
        }

        async fn find_hazard(&self, id: i64) -> Result<Option<Hazard>> {
            self.inner.find_hazard(id).await
        }

        async fn find_tracker(&self, id: i64) -> Result<Option<RepairTracker>> {
            self.inner.find_tracker(id).await
        }

        async fn list_trackers(&self, ids: &[i64]) -> Result<Vec<RepairTracker>> {
            self.inner.list_trackers(ids).await
        }

        async fn list_workers(&self) -> Result<Vec<Worker>> {
            self.inner.list_workers().await
        }

        async fn update_tracker(&self, id: i64, update: &TrackerUpdate) -> Result<UpdateOutcome> {
            // Another request completes the repair first
            let winner = TrackerUpdate {
                stage: Stage::Completed,
                at: Utc::now(),
                guard: Default::default(),
                worker_id: None,
                photo_url: None,
            };
            self.inner.update_tracker(id, &winner).await?;
            self.inner.update_tracker(id, update).await
        }
    }

    #[tokio::test]
    async fn test_lost_race_is_rejected_without_overwrite() {
        let inner = MemoryStore::new();
        let hazard = inner.insert_hazard(sample_hazard(None)).await;
        let store = Arc::new(RacingStore { inner });
        let service = RepairService::new(store.clone(), RepairLifecycle::default());

        let err = service
            .advance(hazard.id, &dto("in_progress"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(ref m) if m.contains("concurrently")));

        let tracker = store.find_tracker(hazard.id).await.unwrap().unwrap();
        assert!(tracker.completed_at.is_some());
        assert!(tracker.in_progress_at.is_none());
    }
}
