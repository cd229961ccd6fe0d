mod repair_dto;

pub use repair_dto::{RepairLookupDto, RepairTrackerDto, RepairTransitionsDto, UpdateRepairDto};
