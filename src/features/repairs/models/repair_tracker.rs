use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Named point in the repair lifecycle, in lifecycle order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Reported,
    Assigned,
    OnTheWay,
    InProgress,
    Completed,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Reported,
        Stage::Assigned,
        Stage::OnTheWay,
        Stage::InProgress,
        Stage::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Reported => "reported",
            Stage::Assigned => "assigned",
            Stage::OnTheWay => "on_the_way",
            Stage::InProgress => "in_progress",
            Stage::Completed => "completed",
        }
    }

    /// Timestamp column recording this stage. `reported` has none.
    pub fn column(&self) -> Option<&'static str> {
        match self {
            Stage::Reported => None,
            Stage::Assigned => Some("team_assigned_at"),
            Stage::OnTheWay => Some("on_the_way_at"),
            Stage::InProgress => Some("in_progress_at"),
            Stage::Completed => Some("completed_at"),
        }
    }

    /// Human-readable label used in rejection messages
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Reported => "reported",
            Stage::Assigned => "assigned",
            Stage::OnTheWay => "on the way",
            Stage::InProgress => "in progress",
            Stage::Completed => "completed",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown repair status '{0}'")]
pub struct UnknownStage(pub String);

impl FromStr for Stage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| UnknownStage(s.to_string()))
    }
}

/// Database model for a hazard's repair progress (id = hazard id)
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct RepairTracker {
    pub id: i64,
    pub reported_at: DateTime<Utc>,
    pub team_assigned_at: Option<DateTime<Utc>>,
    pub on_the_way_at: Option<DateTime<Utc>>,
    pub in_progress_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub worker_id: Option<i64>,
    pub photo_url: Option<String>,
}

impl RepairTracker {
    /// Fresh tracker in the `reported` stage
    #[cfg(test)]
    pub fn new(id: i64, reported_at: DateTime<Utc>) -> Self {
        Self {
            id,
            reported_at,
            team_assigned_at: None,
            on_the_way_at: None,
            in_progress_at: None,
            completed_at: None,
            worker_id: None,
            photo_url: None,
        }
    }

    pub fn timestamp(&self, stage: Stage) -> Option<DateTime<Utc>> {
        match stage {
            Stage::Reported => Some(self.reported_at),
            Stage::Assigned => self.team_assigned_at,
            Stage::OnTheWay => self.on_the_way_at,
            Stage::InProgress => self.in_progress_at,
            Stage::Completed => self.completed_at,
        }
    }

    /// Records `stage` at `at`. Stamps that are already set are left alone.
    pub fn stamp(&mut self, stage: Stage, at: DateTime<Utc>) {
        let slot = match stage {
            Stage::Reported => return,
            Stage::Assigned => &mut self.team_assigned_at,
            Stage::OnTheWay => &mut self.on_the_way_at,
            Stage::InProgress => &mut self.in_progress_at,
            Stage::Completed => &mut self.completed_at,
        };
        slot.get_or_insert(at);
    }
}

/// Conditional write applied to one tracker row
#[derive(Debug, Clone)]
pub struct TrackerUpdate {
    pub stage: Stage,
    pub at: DateTime<Utc>,
    pub guard: TransitionGuard,
    pub worker_id: Option<i64>,
    pub photo_url: Option<String>,
}

/// Precondition re-checked by the store at write time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionGuard {
    /// Stages whose timestamps must still be null
    pub unset: Vec<Stage>,
    /// Stage whose timestamp must already be set
    pub set: Option<Stage>,
}

impl TransitionGuard {
    pub fn holds(&self, tracker: &RepairTracker) -> bool {
        self.unset
            .iter()
            .all(|stage| tracker.timestamp(*stage).is_none())
            && self
                .set
                .map_or(true, |stage| tracker.timestamp(stage).is_some())
    }
}

/// Result of a conditional tracker write
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Updated(RepairTracker),
    /// No row with that id
    Missing,
    /// Row exists but the guard no longer holds
    Conflict,
}
