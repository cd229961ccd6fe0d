use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::workers::models::Worker;

/// Response DTO for a worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WorkerResponseDto {
    pub id: i64,
    pub name: String,
}

impl From<Worker> for WorkerResponseDto {
    fn from(w: Worker) -> Self {
        Self {
            id: w.id,
            name: w.name,
        }
    }
}
