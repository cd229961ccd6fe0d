mod hazard_service;

pub use hazard_service::HazardService;
