mod hazard;

pub use hazard::{Hazard, HazardOrder, HazardQuery, RiskLevel};
