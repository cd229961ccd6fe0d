#[cfg(test)]
use chrono::Utc;
#[cfg(test)]
use fake::{
    faker::{address::en::StateName, lorem::en::Sentence},
    Fake,
};
#[cfg(test)]
use serde_json::json;

#[cfg(test)]
use crate::features::hazards::models::{Hazard, RiskLevel};

/// Hazard with plausible fields; `id` is 0 so the store assigns one on insert
#[cfg(test)]
pub fn sample_hazard(risk: Option<RiskLevel>) -> Hazard {
    let hazard_types = ["pothole", "crack", "debris", "flooding", "faded marking"];
    let hazard_type = hazard_types[(0..hazard_types.len()).fake::<usize>()].to_string();

    Hazard {
        id: 0,
        reported_at: Utc::now(),
        latitude: (-6.4f64..-6.1).fake::<f64>(),
        longitude: (106.7f64..107.0).fake::<f64>(),
        hazard_type,
        state: Some(StateName().fake()),
        risk_level: risk,
        risk_reasoning: Some(json!({ "summary": Sentence(3..8).fake::<String>() })),
        repair_material: Some("cold asphalt".to_string()),
        material_reasoning: Some(json!({ "summary": Sentence(3..8).fake::<String>() })),
        volume_material_required: Some("0.2 m3".to_string()),
        volume_calculation: Some("1.0m x 0.8m x 0.25m".to_string()),
        manpower_required: Some((1i32..6).fake::<i32>()),
        task_breakdown: Some(json!([
            { "task": "clean", "minutes": 10 },
            { "task": "fill", "minutes": 25 }
        ])),
        repair_guide: Some(json!(["Cordon off the area", "Clean the cavity", "Fill and compact"])),
        image_url: Some("https://images.example.org/hazard.jpg".to_string()),
    }
}
