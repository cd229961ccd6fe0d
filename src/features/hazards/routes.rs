use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::hazards::handlers;
use crate::features::hazards::services::HazardService;

/// Create routes for the hazards feature
pub fn routes(service: Arc<HazardService>) -> Router {
    Router::new()
        .route("/stats", get(handlers::get_stats))
        .route("/hazard-map", get(handlers::get_hazard_map))
        .route("/hazard/{id}", get(handlers::get_hazard))
        .with_state(service)
}
