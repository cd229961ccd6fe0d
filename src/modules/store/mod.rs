//! Record store abstraction over hazards, repair trackers and workers.
//!
//! Services receive an `Arc<dyn RecordStore>` and never manage connections
//! themselves. [`PgStore`] is the production backend; [`MemoryStore`] backs
//! local runs and the HTTP tests.

mod memory;
mod postgres;

pub use memory::MemoryStore;
#[cfg(test)]
pub use memory::SeedData;
pub use postgres::PgStore;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::hazards::models::{Hazard, HazardQuery};
use crate::features::repairs::models::{RepairTracker, TrackerUpdate, UpdateOutcome};
use crate::features::workers::models::Worker;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Hazards ordered and bounded by `query`
    async fn list_hazards(&self, query: HazardQuery) -> Result<Vec<Hazard>>;

    async fn find_hazard(&self, id: i64) -> Result<Option<Hazard>>;

    async fn find_tracker(&self, id: i64) -> Result<Option<RepairTracker>>;

    /// Trackers for the given ids; ids without a tracker are skipped
    async fn list_trackers(&self, ids: &[i64]) -> Result<Vec<RepairTracker>>;

    async fn list_workers(&self) -> Result<Vec<Worker>>;

    /// Stamp `update.stage` on tracker `id` if `update.guard` still holds.
    ///
    /// The guard check and the write happen as one atomic step.
    async fn update_tracker(&self, id: i64, update: &TrackerUpdate) -> Result<UpdateOutcome>;
}
