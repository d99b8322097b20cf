use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::auth::guards::{RequireAdmin, RequireCitizen, RequireOfficer};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::grievances::dtos::{
    CreateGrievanceDto, GrievanceQueryParams, GrievanceResponseDto, RespondGrievanceDto,
};
use crate::features::grievances::services::GrievanceService;
use crate::shared::types::{ApiResponse, PaginationQuery};

/// File a grievance against the handling of a resolved complaint
#[utoipa::path(
    post,
    path = "/api/grievances",
    request_body = CreateGrievanceDto,
    responses(
        (status = 201, description = "Grievance filed and escalated", body = ApiResponse<GrievanceResponseDto>),
        (status = 403, description = "Not the caller's complaint"),
        (status = 404, description = "Complaint not found"),
        (status = 409, description = "Complaint not resolved, grievance already filed, or nobody to escalate to")
    ),
    tag = "grievances",
    security(("bearer_auth" = []))
)]
pub async fn create_grievance(
    RequireCitizen(user): RequireCitizen,
    State(service): State<Arc<GrievanceService>>,
    ValidatedJson(dto): ValidatedJson<CreateGrievanceDto>,
) -> Result<(StatusCode, Json<ApiResponse<GrievanceResponseDto>>)> {
    let grievance = service.file(&user, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(grievance), None, None)),
    ))
}

/// List the caller's grievances
#[utoipa::path(
    get,
    path = "/api/grievances/mine",
    params(GrievanceQueryParams, PaginationQuery),
    responses(
        (status = 200, description = "The caller's grievances", body = ApiResponse<Vec<GrievanceResponseDto>>)
    ),
    tag = "grievances",
    security(("bearer_auth" = []))
)]
pub async fn list_my_grievances(
    RequireCitizen(user): RequireCitizen,
    State(service): State<Arc<GrievanceService>>,
    Query(params): Query<GrievanceQueryParams>,
    Query(page): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<GrievanceResponseDto>>>> {
    let grievances = service.list_mine(&user, params.status, page).await?;
    Ok(Json(ApiResponse::paginated(grievances)))
}

/// Get grievance by ID
#[utoipa::path(
    get,
    path = "/api/grievances/{id}",
    params(("id" = Uuid, Path, description = "Grievance ID")),
    responses(
        (status = 200, description = "Grievance found", body = ApiResponse<GrievanceResponseDto>),
        (status = 403, description = "Not a party to this grievance"),
        (status = 404, description = "Grievance not found")
    ),
    tag = "grievances",
    security(("bearer_auth" = []))
)]
pub async fn get_grievance(
    user: AuthenticatedUser,
    State(service): State<Arc<GrievanceService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<GrievanceResponseDto>>> {
    let grievance = service.get(&user, id).await?;
    Ok(Json(ApiResponse::success(Some(grievance), None, None)))
}

/// List grievances escalated to the caller
#[utoipa::path(
    get,
    path = "/api/officer/grievances",
    params(GrievanceQueryParams, PaginationQuery),
    responses(
        (status = 200, description = "Escalated grievances", body = ApiResponse<Vec<GrievanceResponseDto>>),
        (status = 403, description = "Officer access required")
    ),
    tag = "grievances",
    security(("bearer_auth" = []))
)]
pub async fn list_escalated_grievances(
    RequireOfficer(user): RequireOfficer,
    State(service): State<Arc<GrievanceService>>,
    Query(params): Query<GrievanceQueryParams>,
    Query(page): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<GrievanceResponseDto>>>> {
    let grievances = service.list_escalated(&user, params.status, page).await?;
    Ok(Json(ApiResponse::paginated(grievances)))
}

/// Review an escalated grievance
#[utoipa::path(
    put,
    path = "/api/officer/grievances/{id}",
    params(("id" = Uuid, Path, description = "Grievance ID")),
    request_body = RespondGrievanceDto,
    responses(
        (status = 200, description = "Grievance updated", body = ApiResponse<GrievanceResponseDto>),
        (status = 400, description = "Response missing"),
        (status = 403, description = "Grievance not escalated to the caller"),
        (status = 409, description = "Transition not allowed")
    ),
    tag = "grievances",
    security(("bearer_auth" = []))
)]
pub async fn respond_to_grievance(
    RequireOfficer(user): RequireOfficer,
    State(service): State<Arc<GrievanceService>>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<RespondGrievanceDto>,
) -> Result<Json<ApiResponse<GrievanceResponseDto>>> {
    let grievance = service.respond(&user, id, dto).await?;
    Ok(Json(ApiResponse::success(Some(grievance), None, None)))
}

/// List all grievances
#[utoipa::path(
    get,
    path = "/api/admin/grievances",
    params(GrievanceQueryParams, PaginationQuery),
    responses(
        (status = 200, description = "List of grievances", body = ApiResponse<Vec<GrievanceResponseDto>>),
        (status = 403, description = "Admin access required")
    ),
    tag = "grievances",
    security(("bearer_auth" = []))
)]
pub async fn list_grievances(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<GrievanceService>>,
    Query(params): Query<GrievanceQueryParams>,
    Query(page): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<GrievanceResponseDto>>>> {
    let grievances = service.list_all(params.status, page).await?;
    Ok(Json(ApiResponse::paginated(grievances)))
}
