use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::statuses::dtos::StatusResponseDto;
use crate::features::statuses::services::StatusService;
use crate::shared::types::ApiResponse;

/// List complaint statuses in lifecycle order
#[utoipa::path(
    get,
    path = "/api/statuses",
    responses(
        (status = 200, description = "Complaint statuses", body = ApiResponse<Vec<StatusResponseDto>>),
    ),
    tag = "statuses"
)]
pub async fn list_statuses(
    State(service): State<Arc<StatusService>>,
) -> Result<Json<ApiResponse<Vec<StatusResponseDto>>>> {
    let statuses = service.list().await?;
    Ok(Json(ApiResponse::success(Some(statuses), None, None)))
}
