//! Forward-only repair lifecycle.
//!
//! A tracker's stage is never stored; it is derived from which progress
//! timestamps are set. Every consumer (request validation, the store's
//! write guard and the transitions endpoint the UI uses to pre-disable
//! choices) goes through [`RepairLifecycle`] so the ordering table lives in
//! one place.

use thiserror::Error;

use crate::core::config::RepairConfig;
use crate::core::error::AppError;
use crate::features::repairs::models::{RepairTracker, Stage, TransitionGuard};

/// Why a requested status change was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Unknown repair status '{0}'")]
    UnknownStage(String),

    #[error("Repair status '{0}' is not enabled")]
    StageDisabled(Stage),

    #[error("Already {}", .0.label())]
    AlreadyReached(Stage),

    #[error("Cannot move repair back from {} to {}", .from.label(), .to.label())]
    Backward { from: Stage, to: Stage },

    #[error("Cannot skip from {} to {}; next stage is {}", .from.label(), .to.label(), .next.label())]
    Skipped { from: Stage, to: Stage, next: Stage },
}

impl From<TransitionError> for AppError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::UnknownStage(_) | TransitionError::StageDisabled(_) => {
                AppError::Validation(err.to_string())
            }
            _ => AppError::InvalidTransition(err.to_string()),
        }
    }
}

/// Ordered stage table plus skip policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairLifecycle {
    stages: Vec<Stage>,
    allow_skip: bool,
}

impl RepairLifecycle {
    pub fn new(config: RepairConfig) -> Self {
        let stages = Stage::ALL
            .into_iter()
            .filter(|stage| *stage != Stage::OnTheWay || config.enable_on_the_way)
            .collect();

        Self {
            stages,
            allow_skip: config.allow_stage_skip,
        }
    }

    /// Enabled stages in order, starting with `reported`
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn allows_skip(&self) -> bool {
        self.allow_skip
    }

    fn index_of(&self, stage: Stage) -> Option<usize> {
        self.stages.iter().position(|s| *s == stage)
    }

    /// Parse a requested status, rejecting names outside this lifecycle
    pub fn parse(&self, raw: &str) -> Result<Stage, TransitionError> {
        let stage: Stage = raw
            .trim()
            .parse()
            .map_err(|_| TransitionError::UnknownStage(raw.to_string()))?;

        if self.index_of(stage).is_none() {
            return Err(TransitionError::StageDisabled(stage));
        }
        Ok(stage)
    }

    /// Highest enabled stage whose timestamp is set
    pub fn derive_stage(&self, tracker: &RepairTracker) -> Stage {
        self.stages
            .iter()
            .rev()
            .copied()
            .find(|stage| *stage != Stage::Reported && tracker.timestamp(*stage).is_some())
            .unwrap_or(Stage::Reported)
    }

    pub fn is_forward_transition(&self, from: Stage, to: Stage) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(from_idx), Some(to_idx)) => {
                to_idx > from_idx && (self.allow_skip || to_idx == from_idx + 1)
            }
            _ => false,
        }
    }

    /// Validate moving `tracker` to `requested`. Returns the current stage.
    pub fn check_transition(
        &self,
        tracker: &RepairTracker,
        requested: Stage,
    ) -> Result<Stage, TransitionError> {
        let requested_idx = self
            .index_of(requested)
            .ok_or(TransitionError::StageDisabled(requested))?;

        if tracker.timestamp(requested).is_some() {
            return Err(TransitionError::AlreadyReached(requested));
        }

        let current = self.derive_stage(tracker);
        let current_idx = self.index_of(current).unwrap_or(0);

        if requested_idx <= current_idx {
            return Err(TransitionError::Backward {
                from: current,
                to: requested,
            });
        }

        if !self.allow_skip && requested_idx != current_idx + 1 {
            return Err(TransitionError::Skipped {
                from: current,
                to: requested,
                next: self.stages[current_idx + 1],
            });
        }

        Ok(current)
    }

    /// Stages a client may request next
    pub fn allowed_next(&self, tracker: &RepairTracker) -> Vec<Stage> {
        let current = self.derive_stage(tracker);
        self.stages
            .iter()
            .copied()
            .filter(|stage| self.is_forward_transition(current, *stage))
            .filter(|stage| tracker.timestamp(*stage).is_none())
            .collect()
    }

    /// Write-time precondition for recording `requested`.
    ///
    /// The requested stage and everything after it must still be unset; with
    /// skipping disabled the immediately preceding stage must be set.
    pub fn guard_for(&self, requested: Stage) -> TransitionGuard {
        let Some(idx) = self.index_of(requested) else {
            return TransitionGuard::default();
        };

        let unset = self.stages[idx..]
            .iter()
            .copied()
            .filter(|stage| stage.column().is_some())
            .collect();

        let set = if self.allow_skip || idx == 0 {
            None
        } else {
            Some(self.stages[idx - 1]).filter(|stage| stage.column().is_some())
        };

        TransitionGuard { unset, set }
    }
}

impl Default for RepairLifecycle {
    fn default() -> Self {
        Self::new(RepairConfig::default())
    }
}
