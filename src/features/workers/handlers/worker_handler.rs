use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::workers::dtos::WorkerResponseDto;
use crate::features::workers::services::WorkerService;
use crate::shared::types::ErrorResponse;

/// List workers available for assignment
#[utoipa::path(
    get,
    path = "/workers",
    responses(
        (status = 200, description = "List of workers", body = Vec<WorkerResponseDto>),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "workers"
)]
pub async fn list_workers(
    State(service): State<Arc<WorkerService>>,
) -> Result<Json<Vec<WorkerResponseDto>>> {
    let workers = service.list().await?;
    Ok(Json(workers))
}
