use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::auth::guards::{RequireAdmin, RequireCitizen};
use crate::features::citizens::dtos::{
    CitizenQueryParams, CitizenResponseDto, UpdateCitizenProfileDto,
};
use crate::features::citizens::services::CitizenService;
use crate::shared::types::{ApiResponse, PaginationQuery};

/// Get the caller's citizen profile
#[utoipa::path(
    get,
    path = "/api/citizens/me",
    responses(
        (status = 200, description = "Citizen profile", body = ApiResponse<CitizenResponseDto>),
        (status = 403, description = "Citizen access required")
    ),
    tag = "citizens",
    security(("bearer_auth" = []))
)]
pub async fn get_my_profile(
    RequireCitizen(user): RequireCitizen,
    State(service): State<Arc<CitizenService>>,
) -> Result<Json<ApiResponse<CitizenResponseDto>>> {
    let citizen = service.get_me(user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(citizen), None, None)))
}

/// Update the caller's citizen profile
#[utoipa::path(
    put,
    path = "/api/citizens/me",
    request_body = UpdateCitizenProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<CitizenResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "citizens",
    security(("bearer_auth" = []))
)]
pub async fn update_my_profile(
    RequireCitizen(user): RequireCitizen,
    State(service): State<Arc<CitizenService>>,
    ValidatedJson(dto): ValidatedJson<UpdateCitizenProfileDto>,
) -> Result<Json<ApiResponse<CitizenResponseDto>>> {
    let citizen = service.update_me(user.user_id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(citizen),
        Some("Profile updated".to_string()),
        None,
    )))
}

/// List citizens
#[utoipa::path(
    get,
    path = "/api/admin/citizens",
    params(CitizenQueryParams, PaginationQuery),
    responses(
        (status = 200, description = "List of citizens", body = ApiResponse<Vec<CitizenResponseDto>>),
        (status = 403, description = "Admin access required")
    ),
    tag = "citizens",
    security(("bearer_auth" = []))
)]
pub async fn list_citizens(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<CitizenService>>,
    Query(params): Query<CitizenQueryParams>,
    Query(page): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<CitizenResponseDto>>>> {
    let citizens = service.list(params.search, page).await?;
    Ok(Json(ApiResponse::paginated(citizens)))
}

/// Get citizen by ID
#[utoipa::path(
    get,
    path = "/api/admin/citizens/{id}",
    params(("id" = Uuid, Path, description = "Citizen ID")),
    responses(
        (status = 200, description = "Citizen found", body = ApiResponse<CitizenResponseDto>),
        (status = 404, description = "Citizen not found")
    ),
    tag = "citizens",
    security(("bearer_auth" = []))
)]
pub async fn get_citizen(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<CitizenService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CitizenResponseDto>>> {
    let citizen = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(citizen), None, None)))
}

/// Soft delete a citizen and disable their account
#[utoipa::path(
    delete,
    path = "/api/admin/citizens/{id}",
    params(("id" = Uuid, Path, description = "Citizen ID")),
    responses(
        (status = 200, description = "Citizen deactivated"),
        (status = 404, description = "Citizen not found")
    ),
    tag = "citizens",
    security(("bearer_auth" = []))
)]
pub async fn delete_citizen(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<CitizenService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Citizen deactivated".to_string()),
        None,
    )))
}
