use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::{AppPath, AppQuery};
use crate::features::hazards::dtos::{
    clamp_limit, HazardDetailDto, HazardMapDto, HazardMapQuery, StatsQuery, StatsResponseDto,
};
use crate::features::hazards::models::{HazardOrder, HazardQuery};
use crate::features::hazards::services::HazardService;
use crate::shared::constants::{DEFAULT_MAP_LIMIT, DEFAULT_STATS_LIMIT};
use crate::shared::types::ErrorResponse;

/// List hazards merged with their repair progress
///
/// Hazards without a tracker carry `progress: null`. Pass
/// `include_progress=false` to get bare summaries.
#[utoipa::path(
    get,
    path = "/stats",
    params(StatsQuery),
    responses(
        (status = 200, description = "Hazards with progress", body = StatsResponseDto),
        (status = 400, description = "Malformed query parameters", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "hazards"
)]
pub async fn get_stats(
    State(service): State<Arc<HazardService>>,
    AppQuery(params): AppQuery<StatsQuery>,
) -> Result<Json<StatsResponseDto>> {
    let query = HazardQuery {
        order: params.order.unwrap_or(HazardOrder::Risk),
        limit: clamp_limit(params.limit, DEFAULT_STATS_LIMIT),
    };

    let body = if params.include_progress.unwrap_or(true) {
        StatsResponseDto::WithProgress(service.list_with_progress(query).await?)
    } else {
        StatsResponseDto::Summaries(service.list_summaries(query).await?)
    };
    Ok(Json(body))
}

/// List hazards with repair-planning fields for map plotting
#[utoipa::path(
    get,
    path = "/hazard-map",
    params(HazardMapQuery),
    responses(
        (status = 200, description = "Hazards for the map", body = Vec<HazardMapDto>),
        (status = 400, description = "Malformed query parameters", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "hazards"
)]
pub async fn get_hazard_map(
    State(service): State<Arc<HazardService>>,
    AppQuery(params): AppQuery<HazardMapQuery>,
) -> Result<Json<Vec<HazardMapDto>>> {
    let query = HazardQuery {
        order: params.order.unwrap_or(HazardOrder::Recent),
        limit: clamp_limit(params.limit, DEFAULT_MAP_LIMIT),
    };

    let hazards = service.list_for_map(query).await?;
    Ok(Json(hazards))
}

/// Get full hazard detail
#[utoipa::path(
    get,
    path = "/hazard/{id}",
    params(
        ("id" = i64, Path, description = "Hazard ID")
    ),
    responses(
        (status = 200, description = "Hazard found", body = HazardDetailDto),
        (status = 404, description = "Hazard not found", body = ErrorResponse)
    ),
    tag = "hazards"
)]
pub async fn get_hazard(
    State(service): State<Arc<HazardService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<HazardDetailDto>> {
    let hazard = service.get(id).await?;
    Ok(Json(hazard))
}
