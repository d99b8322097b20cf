use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::auth::guards::{RequireAdmin, RequireOfficer};
use crate::features::officers::dtos::{
    OfficerQueryParams, OfficerResponseDto, UpdateOfficerPlacementDto, UpdateOfficerProfileDto,
};
use crate::features::officers::services::OfficerService;
use crate::shared::types::{ApiResponse, PaginationQuery};

/// Get the caller's officer profile
#[utoipa::path(
    get,
    path = "/api/officers/me",
    responses(
        (status = 200, description = "Officer profile", body = ApiResponse<OfficerResponseDto>),
        (status = 403, description = "Officer access required")
    ),
    tag = "officers",
    security(("bearer_auth" = []))
)]
pub async fn get_my_profile(
    RequireOfficer(user): RequireOfficer,
    State(service): State<Arc<OfficerService>>,
) -> Result<Json<ApiResponse<OfficerResponseDto>>> {
    let officer = service.get_me(user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(officer), None, None)))
}

/// Update the caller's contact details
#[utoipa::path(
    put,
    path = "/api/officers/me",
    request_body = UpdateOfficerProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<OfficerResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "officers",
    security(("bearer_auth" = []))
)]
pub async fn update_my_profile(
    RequireOfficer(user): RequireOfficer,
    State(service): State<Arc<OfficerService>>,
    ValidatedJson(dto): ValidatedJson<UpdateOfficerProfileDto>,
) -> Result<Json<ApiResponse<OfficerResponseDto>>> {
    let officer = service.update_me(user.user_id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(officer),
        Some("Profile updated".to_string()),
        None,
    )))
}

/// List officers
#[utoipa::path(
    get,
    path = "/api/admin/officers",
    params(OfficerQueryParams, PaginationQuery),
    responses(
        (status = 200, description = "List of officers", body = ApiResponse<Vec<OfficerResponseDto>>),
        (status = 403, description = "Admin access required")
    ),
    tag = "officers",
    security(("bearer_auth" = []))
)]
pub async fn list_officers(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<OfficerService>>,
    Query(params): Query<OfficerQueryParams>,
    Query(page): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<OfficerResponseDto>>>> {
    let officers = service.list(params, page).await?;
    Ok(Json(ApiResponse::paginated(officers)))
}

/// List officers waiting for approval
#[utoipa::path(
    get,
    path = "/api/admin/officers/pending",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Officers pending approval", body = ApiResponse<Vec<OfficerResponseDto>>)
    ),
    tag = "officers",
    security(("bearer_auth" = []))
)]
pub async fn list_pending_officers(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<OfficerService>>,
    Query(page): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<OfficerResponseDto>>>> {
    let officers = service.list_pending(page).await?;
    Ok(Json(ApiResponse::paginated(officers)))
}

/// Get officer by ID
#[utoipa::path(
    get,
    path = "/api/admin/officers/{id}",
    params(("id" = Uuid, Path, description = "Officer ID")),
    responses(
        (status = 200, description = "Officer found", body = ApiResponse<OfficerResponseDto>),
        (status = 404, description = "Officer not found")
    ),
    tag = "officers",
    security(("bearer_auth" = []))
)]
pub async fn get_officer(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<OfficerService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<OfficerResponseDto>>> {
    let officer = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(officer), None, None)))
}

/// Approve a registered officer
#[utoipa::path(
    post,
    path = "/api/admin/officers/{id}/approve",
    params(("id" = Uuid, Path, description = "Officer ID")),
    responses(
        (status = 200, description = "Officer approved", body = ApiResponse<OfficerResponseDto>),
        (status = 404, description = "Officer not found"),
        (status = 409, description = "Officer already approved")
    ),
    tag = "officers",
    security(("bearer_auth" = []))
)]
pub async fn approve_officer(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<OfficerService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<OfficerResponseDto>>> {
    let officer = service.approve(id).await?;
    Ok(Json(ApiResponse::success(
        Some(officer),
        Some("Officer approved".to_string()),
        None,
    )))
}

/// Change an officer's department or rank
#[utoipa::path(
    put,
    path = "/api/admin/officers/{id}",
    params(("id" = Uuid, Path, description = "Officer ID")),
    request_body = UpdateOfficerPlacementDto,
    responses(
        (status = 200, description = "Officer updated", body = ApiResponse<OfficerResponseDto>),
        (status = 400, description = "Unknown department"),
        (status = 404, description = "Officer not found")
    ),
    tag = "officers",
    security(("bearer_auth" = []))
)]
pub async fn update_officer(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<OfficerService>>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateOfficerPlacementDto>,
) -> Result<Json<ApiResponse<OfficerResponseDto>>> {
    let officer = service.update_placement(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(officer), None, None)))
}

/// Soft delete an officer and release their assignments
#[utoipa::path(
    delete,
    path = "/api/admin/officers/{id}",
    params(("id" = Uuid, Path, description = "Officer ID")),
    responses(
        (status = 200, description = "Officer deactivated"),
        (status = 404, description = "Officer not found")
    ),
    tag = "officers",
    security(("bearer_auth" = []))
)]
pub async fn delete_officer(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<OfficerService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Officer deactivated".to_string()),
        None,
    )))
}
