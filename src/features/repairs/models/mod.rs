mod repair_tracker;

pub use repair_tracker::{RepairTracker, Stage, TrackerUpdate, TransitionGuard, UpdateOutcome};
