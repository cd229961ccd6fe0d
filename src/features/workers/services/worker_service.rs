use std::sync::Arc;

use crate::core::error::Result;
use crate::features::workers::dtos::WorkerResponseDto;
use crate::modules::store::RecordStore;

/// Service for worker listing
pub struct WorkerService {
    store: Arc<dyn RecordStore>,
}

impl WorkerService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// All workers, ordered by name
    pub async fn list(&self) -> Result<Vec<WorkerResponseDto>> {
        let workers = self.store.list_workers().await?;
        Ok(workers.into_iter().map(WorkerResponseDto::from).collect())
    }
}
