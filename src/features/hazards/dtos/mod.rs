mod hazard_dto;

pub use hazard_dto::{
    clamp_limit, HazardDetailDto, HazardMapDto, HazardMapQuery, HazardSummaryDto,
    HazardWithProgressDto, StatsQuery, StatsResponseDto,
};
