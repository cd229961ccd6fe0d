use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath};
use crate::features::repairs::dtos::{
    RepairLookupDto, RepairTrackerDto, RepairTransitionsDto, UpdateRepairDto,
};
use crate::features::repairs::services::RepairService;
use crate::shared::types::{ApiResponse, EmptyObject, ErrorResponse};

/// Get the repair tracker for a hazard
///
/// Returns `{}` when the hazard has no tracker row.
#[utoipa::path(
    get,
    path = "/repair/{id}",
    params(
        ("id" = i64, Path, description = "Hazard ID")
    ),
    responses(
        (status = 200, description = "Tracker row or empty object", body = RepairLookupDto),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "repairs"
)]
pub async fn get_repair(
    State(service): State<Arc<RepairService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<RepairLookupDto>> {
    let body = match service.get_tracker(id).await? {
        Some(tracker) => RepairLookupDto::Found(tracker),
        None => RepairLookupDto::Empty(EmptyObject {}),
    };
    Ok(Json(body))
}

/// Get the current stage and the stages that may be requested next
#[utoipa::path(
    get,
    path = "/repair/{id}/transitions",
    params(
        ("id" = i64, Path, description = "Hazard ID")
    ),
    responses(
        (status = 200, description = "Stage choices", body = RepairTransitionsDto),
        (status = 404, description = "No tracker for this hazard", body = ErrorResponse)
    ),
    tag = "repairs"
)]
pub async fn get_repair_transitions(
    State(service): State<Arc<RepairService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<RepairTransitionsDto>> {
    let transitions = service.transitions(id).await?;
    Ok(Json(transitions))
}

/// Advance a repair to a later stage
///
/// Only forward moves are accepted. The requested stage's timestamp is set to
/// the current time; worker and photo are overwritten only when provided.
#[utoipa::path(
    post,
    path = "/update-repair/{id}",
    params(
        ("id" = i64, Path, description = "Hazard ID")
    ),
    request_body = UpdateRepairDto,
    responses(
        (status = 200, description = "Repair advanced", body = ApiResponse<RepairTrackerDto>),
        (status = 400, description = "Invalid status or transition", body = ErrorResponse),
        (status = 404, description = "No tracker for this hazard", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "repairs"
)]
pub async fn update_repair(
    State(service): State<Arc<RepairService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdateRepairDto>,
) -> Result<Json<ApiResponse<RepairTrackerDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let tracker = service.advance(id, &dto).await?;
    Ok(Json(ApiResponse::success(tracker)))
}
