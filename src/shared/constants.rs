/// Default number of hazards returned by `/stats`
pub const DEFAULT_STATS_LIMIT: i64 = 200;

/// Default number of hazards returned by `/hazard-map`
pub const DEFAULT_MAP_LIMIT: i64 = 50;

/// Upper bound for any hazard listing
pub const MAX_HAZARD_LIMIT: i64 = 200;

/// Maximum accepted length of a repair photo reference
pub const MAX_PHOTO_REF_LEN: u64 = 2048;
