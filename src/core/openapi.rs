use utoipa::{Modify, OpenApi};

use crate::features::hazards::{
    dtos as hazards_dtos, handlers as hazards_handlers, models as hazards_models,
};
use crate::features::repairs::{
    dtos as repairs_dtos, handlers as repairs_handlers, models as repairs_models,
};
use crate::features::workers::{dtos as workers_dtos, handlers as workers_handlers};
use crate::shared::types::{ApiResponse, EmptyObject, ErrorResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Hazards
        hazards_handlers::get_stats,
        hazards_handlers::get_hazard_map,
        hazards_handlers::get_hazard,
        // Repairs
        repairs_handlers::get_repair,
        repairs_handlers::get_repair_transitions,
        repairs_handlers::update_repair,
        // Workers
        workers_handlers::list_workers,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            EmptyObject,
            // Hazards
            hazards_models::RiskLevel,
            hazards_models::HazardOrder,
            hazards_dtos::HazardSummaryDto,
            hazards_dtos::HazardWithProgressDto,
            hazards_dtos::StatsResponseDto,
            hazards_dtos::HazardMapDto,
            hazards_dtos::HazardDetailDto,
            // Repairs
            repairs_models::Stage,
            repairs_dtos::UpdateRepairDto,
            repairs_dtos::RepairTrackerDto,
            repairs_dtos::RepairLookupDto,
            repairs_dtos::RepairTransitionsDto,
            ApiResponse<repairs_dtos::RepairTrackerDto>,
            // Workers
            workers_dtos::WorkerResponseDto,
        )
    ),
    tags(
        (name = "hazards", description = "Reported road hazards and their repair plans"),
        (name = "repairs", description = "Repair progress tracking"),
        (name = "workers", description = "Repair crew members"),
    ),
    info(
        title = "Road Hazard API",
        version = "0.1.0",
        description = "API documentation for road hazard repair tracking",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
