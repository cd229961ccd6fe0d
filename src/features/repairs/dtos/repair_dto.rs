use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::repairs::lifecycle::RepairLifecycle;
use crate::features::repairs::models::{RepairTracker, Stage};
use crate::shared::constants::MAX_PHOTO_REF_LEN;
use crate::shared::types::EmptyObject;

/// Request DTO for advancing a repair
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateRepairDto {
    /// Requested stage: `assigned`, `on_the_way` (when enabled), `in_progress` or `completed`
    #[validate(length(min = 1, max = 32, message = "Status must be 1-32 characters"))]
    pub status: String,

    /// Worker to record on the tracker; left unchanged when absent or 0
    #[serde(default, alias = "workerRef", deserialize_with = "zero_as_none")]
    #[validate(range(min = 1, message = "Worker id must be positive"))]
    pub worker_id: Option<i64>,

    /// Repair photo reference; left unchanged when absent or empty
    #[serde(default, alias = "photoRef", deserialize_with = "empty_as_none")]
    #[validate(length(min = 1, max = MAX_PHOTO_REF_LEN, message = "Photo reference must be 1-2048 characters"))]
    pub photo_url: Option<String>,
}

fn zero_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.filter(|id| *id != 0))
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}

/// Response DTO for a repair tracker with its derived stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RepairTrackerDto {
    pub id: i64,
    pub stage: Stage,
    pub reported_at: DateTime<Utc>,
    pub team_assigned_at: Option<DateTime<Utc>>,
    pub on_the_way_at: Option<DateTime<Utc>>,
    pub in_progress_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub worker_id: Option<i64>,
    pub photo_url: Option<String>,
}

impl RepairTrackerDto {
    pub fn new(tracker: RepairTracker, lifecycle: &RepairLifecycle) -> Self {
        Self {
            stage: lifecycle.derive_stage(&tracker),
            id: tracker.id,
            reported_at: tracker.reported_at,
            team_assigned_at: tracker.team_assigned_at,
            on_the_way_at: tracker.on_the_way_at,
            in_progress_at: tracker.in_progress_at,
            completed_at: tracker.completed_at,
            worker_id: tracker.worker_id,
            photo_url: tracker.photo_url,
        }
    }
}

/// `/repair/{id}` body: the tracker, or `{}` when the hazard has none
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum RepairLookupDto {
    Found(RepairTrackerDto),
    Empty(EmptyObject),
}

/// Stage choices for one tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RepairTransitionsDto {
    pub id: i64,
    pub current_stage: Stage,
    /// Every enabled stage in lifecycle order
    pub stages: Vec<Stage>,
    /// Stages that may be requested next
    pub allowed: Vec<Stage>,
    pub allow_skip: bool,
}
