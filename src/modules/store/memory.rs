use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;

use super::RecordStore;
use crate::core::error::{AppError, Result};
use crate::features::hazards::models::{Hazard, HazardOrder, HazardQuery};
use crate::features::repairs::models::{RepairTracker, TrackerUpdate, UpdateOutcome};
use crate::features::workers::models::Worker;

/// Initial contents for a [`MemoryStore`], usually read from `SEED_FILE`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub hazards: Vec<Hazard>,
    #[serde(default)]
    pub trackers: Vec<RepairTracker>,
    #[serde(default)]
    pub workers: Vec<Worker>,
}

#[derive(Debug, Default)]
struct Tables {
    hazards: BTreeMap<i64, Hazard>,
    trackers: BTreeMap<i64, RepairTracker>,
    workers: BTreeMap<i64, Worker>,
    /// When set, every call fails with this message
    failure: Option<String>,
}

impl Tables {
    fn check_available(&self) -> Result<()> {
        match &self.failure {
            Some(msg) => Err(AppError::Store(msg.clone())),
            None => Ok(()),
        }
    }
}

/// In-process record store; one lock covers all tables
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding exactly the seeded rows
    pub fn from_seed(seed: SeedData) -> Self {
        let tables = Tables {
            hazards: seed.hazards.into_iter().map(|h| (h.id, h)).collect(),
            trackers: seed.trackers.into_iter().map(|t| (t.id, t)).collect(),
            workers: seed.workers.into_iter().map(|w| (w.id, w)).collect(),
            failure: None,
        };

        Self {
            tables: RwLock::new(tables),
        }
    }

    pub async fn from_seed_file(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::Internal(format!("Failed to read seed file {}: {}", path.display(), e))
        })?;
        let seed: SeedData = serde_json::from_str(&raw).map_err(|e| {
            AppError::Internal(format!("Invalid seed file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            "Loaded seed data: {} hazards, {} trackers, {} workers",
            seed.hazards.len(),
            seed.trackers.len(),
            seed.workers.len()
        );
        Ok(Self::from_seed(seed))
    }

    /// Insert a hazard under the next free id together with its tracker row
    #[cfg(test)]
    pub async fn insert_hazard(&self, mut hazard: Hazard) -> Hazard {
        let mut tables = self.tables.write().await;

        hazard.id = tables.hazards.keys().next_back().map_or(1, |id| id + 1);
        tables
            .trackers
            .insert(hazard.id, RepairTracker::new(hazard.id, hazard.reported_at));
        tables.hazards.insert(hazard.id, hazard.clone());
        hazard
    }

    #[cfg(test)]
    pub async fn insert_worker(&self, name: impl Into<String>) -> Worker {
        let mut tables = self.tables.write().await;

        let id = tables.workers.keys().next_back().map_or(1, |id| id + 1);
        let worker = Worker {
            id,
            name: name.into(),
        };
        tables.workers.insert(id, worker.clone());
        worker
    }

    /// Make every subsequent call fail (`Some`) or succeed again (`None`)
    #[cfg(test)]
    pub async fn set_failure(&self, failure: Option<String>) {
        self.tables.write().await.failure = failure;
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_hazards(&self, query: HazardQuery) -> Result<Vec<Hazard>> {
        let tables = self.tables.read().await;
        tables.check_available()?;

        let mut hazards: Vec<Hazard> = tables.hazards.values().cloned().collect();
        match query.order {
            HazardOrder::Risk => hazards.sort_by_key(|h| {
                (
                    h.risk_level.is_none(),
                    Reverse(h.risk_level),
                    Reverse(h.reported_at),
                    Reverse(h.id),
                )
            }),
            HazardOrder::Recent => hazards.sort_by_key(|h| (Reverse(h.reported_at), Reverse(h.id))),
        }
        hazards.truncate(usize::try_from(query.limit).unwrap_or(0));

        Ok(hazards)
    }

    async fn find_hazard(&self, id: i64) -> Result<Option<Hazard>> {
        let tables = self.tables.read().await;
        tables.check_available()?;
        Ok(tables.hazards.get(&id).cloned())
    }

    async fn find_tracker(&self, id: i64) -> Result<Option<RepairTracker>> {
        let tables = self.tables.read().await;
        tables.check_available()?;
        Ok(tables.trackers.get(&id).cloned())
    }

    async fn list_trackers(&self, ids: &[i64]) -> Result<Vec<RepairTracker>> {
        let tables = self.tables.read().await;
        tables.check_available()?;
        Ok(ids
            .iter()
            .filter_map(|id| tables.trackers.get(id).cloned())
            .collect())
    }

    async fn list_workers(&self) -> Result<Vec<Worker>> {
        let tables = self.tables.read().await;
        tables.check_available()?;

        let mut workers: Vec<Worker> = tables.workers.values().cloned().collect();
        workers.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(workers)
    }

    async fn update_tracker(&self, id: i64, update: &TrackerUpdate) -> Result<UpdateOutcome> {
        let mut tables = self.tables.write().await;
        tables.check_available()?;

        if update.stage.column().is_none() {
            return Err(AppError::Internal(format!(
                "Stage '{}' has no timestamp column",
                update.stage
            )));
        }

        let Some(tracker) = tables.trackers.get_mut(&id) else {
            return Ok(UpdateOutcome::Missing);
        };
        if !update.guard.holds(tracker) {
            return Ok(UpdateOutcome::Conflict);
        }

        tracker.stamp(update.stage, update.at);
        if let Some(worker_id) = update.worker_id {
            tracker.worker_id = Some(worker_id);
        }
        if let Some(photo_url) = &update.photo_url {
            tracker.photo_url = Some(photo_url.clone());
        }

        Ok(UpdateOutcome::Updated(tracker.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::hazards::models::RiskLevel;
    use crate::features::repairs::models::{Stage, TransitionGuard};
    use crate::shared::test_helpers::sample_hazard;
    use chrono::{Duration, Utc};

    fn query(order: HazardOrder, limit: i64) -> HazardQuery {
        HazardQuery { order, limit }
    }

    #[tokio::test]
    async fn test_insert_hazard_creates_tracker() {
        let store = MemoryStore::new();
        let hazard = store.insert_hazard(sample_hazard(Some(RiskLevel::High))).await;

        let tracker = store.find_tracker(hazard.id).await.unwrap().unwrap();
        assert_eq!(tracker, RepairTracker::new(hazard.id, hazard.reported_at));
    }

    #[tokio::test]
    async fn test_list_hazards_orders_by_risk_with_unknown_last() {
        let store = MemoryStore::new();
        let unknown = store.insert_hazard(sample_hazard(None)).await;
        let low = store.insert_hazard(sample_hazard(Some(RiskLevel::Low))).await;
        let high = store.insert_hazard(sample_hazard(Some(RiskLevel::High))).await;

        let ids: Vec<i64> = store
            .list_hazards(query(HazardOrder::Risk, 10))
            .await
            .unwrap()
            .iter()
            .map(|h| h.id)
            .collect();
        assert_eq!(ids, vec![high.id, low.id, unknown.id]);

        let limited = store.list_hazards(query(HazardOrder::Risk, 1)).await.unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn test_list_hazards_orders_by_recency() {
        let store = MemoryStore::new();
        let mut older = sample_hazard(Some(RiskLevel::High));
        older.reported_at = Utc::now() - Duration::days(3);
        let older = store.insert_hazard(older).await;
        let newer = store.insert_hazard(sample_hazard(Some(RiskLevel::Low))).await;

        let ids: Vec<i64> = store
            .list_hazards(query(HazardOrder::Recent, 10))
            .await
            .unwrap()
            .iter()
            .map(|h| h.id)
            .collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }

    #[tokio::test]
    async fn test_update_respects_guard() {
        let store = MemoryStore::new();
        let hazard = store.insert_hazard(sample_hazard(None)).await;
        let update = TrackerUpdate {
            stage: Stage::Assigned,
            at: Utc::now(),
            guard: TransitionGuard {
                unset: vec![Stage::Assigned, Stage::InProgress, Stage::Completed],
                set: None,
            },
            worker_id: Some(3),
            photo_url: None,
        };

        let first = store.update_tracker(hazard.id, &update).await.unwrap();
        assert!(matches!(first, UpdateOutcome::Updated(ref t) if t.worker_id == Some(3)));

        let second = store.update_tracker(hazard.id, &update).await.unwrap();
        assert_eq!(second, UpdateOutcome::Conflict);

        let missing = store.update_tracker(999, &update).await.unwrap();
        assert_eq!(missing, UpdateOutcome::Missing);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = MemoryStore::new();
        store.set_failure(Some("connection refused".to_string())).await;

        let err = store.list_workers().await.unwrap_err();
        assert!(matches!(err, AppError::Store(ref m) if m == "connection refused"));

        store.set_failure(None).await;
        assert!(store.list_workers().await.unwrap().is_empty());
    }

    #[test]
    fn test_seed_data_parses_partial_documents() {
        let seed: SeedData =
            serde_json::from_str(r#"{ "workers": [{ "id": 1, "name": "Ana" }] }"#).unwrap();
        assert!(seed.hazards.is_empty());
        assert_eq!(seed.workers.len(), 1);
    }

    #[tokio::test]
    async fn test_demo_seed_file_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/seed.json");
        let store = MemoryStore::from_seed_file(&path).await.unwrap();

        let tracker = store.find_tracker(1).await.unwrap().unwrap();
        assert!(tracker.team_assigned_at.is_some());
        assert_eq!(store.list_workers().await.unwrap().len(), 2);

        let missing = MemoryStore::from_seed_file(Path::new("does/not/exist.json")).await;
        assert!(matches!(missing, Err(AppError::Internal(_))));
    }
}
