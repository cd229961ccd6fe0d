pub mod hazards;
pub mod repairs;
pub mod workers;
