use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

/// Hazard risk level matching database enum (declaration order is severity order)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "risk_level", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// Database model for a reported road hazard
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Hazard {
    pub id: i64,
    pub reported_at: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub hazard_type: String,
    pub state: Option<String>,
    pub risk_level: Option<RiskLevel>,
    pub risk_reasoning: Option<serde_json::Value>,
    pub repair_material: Option<String>,
    pub material_reasoning: Option<serde_json::Value>,
    pub volume_material_required: Option<String>,
    pub volume_calculation: Option<String>,
    pub manpower_required: Option<i32>,
    pub task_breakdown: Option<serde_json::Value>,
    pub repair_guide: Option<serde_json::Value>,
    pub image_url: Option<String>,
}

/// Ordering for hazard listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HazardOrder {
    /// Highest risk first, then most recent
    Risk,
    /// Most recently reported first
    Recent,
}

impl HazardOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            HazardOrder::Risk => "risk_level DESC NULLS LAST, reported_at DESC, id DESC",
            HazardOrder::Recent => "reported_at DESC, id DESC",
        }
    }
}

/// Filter for hazard listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HazardQuery {
    pub order: HazardOrder,
    pub limit: i64,
}
