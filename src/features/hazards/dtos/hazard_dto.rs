use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::hazards::models::{Hazard, HazardOrder, RiskLevel};
use crate::features::repairs::dtos::RepairTrackerDto;
use crate::shared::constants::MAX_HAZARD_LIMIT;

/// Query params for `/stats`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(default)]
pub struct StatsQuery {
    /// `risk` (default) or `recent`
    pub order: Option<HazardOrder>,
    /// Maximum rows (default 200, max 200)
    pub limit: Option<i64>,
    /// Merge each hazard with its repair progress (default true)
    pub include_progress: Option<bool>,
}

/// Query params for `/hazard-map`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(default)]
pub struct HazardMapQuery {
    /// `recent` (default) or `risk`
    pub order: Option<HazardOrder>,
    /// Maximum rows (default 50, max 200)
    pub limit: Option<i64>,
}

/// Clamp a requested listing size into `1..=MAX_HAZARD_LIMIT`
pub fn clamp_limit(requested: Option<i64>, default: i64) -> i64 {
    requested.unwrap_or(default).clamp(1, MAX_HAZARD_LIMIT)
}

/// Hazard fields shown in the list view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HazardSummaryDto {
    pub id: i64,
    pub reported_at: DateTime<Utc>,
    pub image_url: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub hazard_type: String,
    pub state: Option<String>,
    pub risk_level: Option<RiskLevel>,
}

impl From<Hazard> for HazardSummaryDto {
    fn from(h: Hazard) -> Self {
        Self {
            id: h.id,
            reported_at: h.reported_at,
            image_url: h.image_url,
            latitude: h.latitude,
            longitude: h.longitude,
            hazard_type: h.hazard_type,
            state: h.state,
            risk_level: h.risk_level,
        }
    }
}

/// Hazard summary left-joined with its tracker; `progress` is `null`
/// when the hazard has no tracker row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HazardWithProgressDto {
    #[serde(flatten)]
    pub hazard: HazardSummaryDto,
    pub progress: Option<RepairTrackerDto>,
}

/// `/stats` body: merged rows, or bare summaries when progress is not requested
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum StatsResponseDto {
    WithProgress(Vec<HazardWithProgressDto>),
    Summaries(Vec<HazardSummaryDto>),
}

/// Hazard fields needed to plot and plan repairs on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HazardMapDto {
    pub id: i64,
    pub reported_at: DateTime<Utc>,
    pub image_url: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub hazard_type: String,
    pub risk_level: Option<RiskLevel>,
    pub repair_material: Option<String>,
    pub volume_material_required: Option<String>,
    pub manpower_required: Option<i32>,
}

impl From<Hazard> for HazardMapDto {
    fn from(h: Hazard) -> Self {
        Self {
            id: h.id,
            reported_at: h.reported_at,
            image_url: h.image_url,
            latitude: h.latitude,
            longitude: h.longitude,
            hazard_type: h.hazard_type,
            risk_level: h.risk_level,
            repair_material: h.repair_material,
            volume_material_required: h.volume_material_required,
            manpower_required: h.manpower_required,
        }
    }
}

/// Full hazard record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HazardDetailDto {
    pub id: i64,
    pub reported_at: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub hazard_type: String,
    pub state: Option<String>,
    pub risk_level: Option<RiskLevel>,
    #[schema(value_type = Option<Object>)]
    pub risk_reasoning: Option<serde_json::Value>,
    pub repair_material: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub material_reasoning: Option<serde_json::Value>,
    pub volume_material_required: Option<String>,
    pub volume_calculation: Option<String>,
    pub manpower_required: Option<i32>,
    #[schema(value_type = Option<Object>)]
    pub task_breakdown: Option<serde_json::Value>,
    /// Ordered repair steps
    #[schema(value_type = Option<Object>)]
    pub repair_guide: Option<serde_json::Value>,
    pub image_url: Option<String>,
}

impl From<Hazard> for HazardDetailDto {
    fn from(h: Hazard) -> Self {
        Self {
            id: h.id,
            reported_at: h.reported_at,
            latitude: h.latitude,
            longitude: h.longitude,
            hazard_type: h.hazard_type,
            state: h.state,
            risk_level: h.risk_level,
            risk_reasoning: h.risk_reasoning,
            repair_material: h.repair_material,
            material_reasoning: h.material_reasoning,
            volume_material_required: h.volume_material_required,
            volume_calculation: h.volume_calculation,
            manpower_required: h.manpower_required,
            task_breakdown: h.task_breakdown,
            repair_guide: h.repair_guide,
            image_url: h.image_url,
        }
    }
}
