use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::departments::dtos::{DepartmentRequestDto, DepartmentResponseDto};
use crate::features::departments::services::DepartmentService;
use crate::shared::types::{ApiResponse, PaginationQuery};

/// List active departments
#[utoipa::path(
    get,
    path = "/api/departments",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List of departments", body = ApiResponse<Vec<DepartmentResponseDto>>),
    ),
    tag = "departments"
)]
pub async fn list_departments(
    State(service): State<Arc<DepartmentService>>,
    Query(page): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<DepartmentResponseDto>>>> {
    let departments = service.list(page).await?;
    Ok(Json(ApiResponse::paginated(departments)))
}

/// Get department by ID
#[utoipa::path(
    get,
    path = "/api/departments/{id}",
    params(("id" = Uuid, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department found", body = ApiResponse<DepartmentResponseDto>),
        (status = 404, description = "Department not found")
    ),
    tag = "departments"
)]
pub async fn get_department(
    State(service): State<Arc<DepartmentService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DepartmentResponseDto>>> {
    let department = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(department), None, None)))
}

/// Create a department
#[utoipa::path(
    post,
    path = "/api/admin/departments",
    request_body = DepartmentRequestDto,
    responses(
        (status = 201, description = "Department created", body = ApiResponse<DepartmentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin access required"),
        (status = 409, description = "Department name already in use")
    ),
    tag = "departments",
    security(("bearer_auth" = []))
)]
pub async fn create_department(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<DepartmentService>>,
    ValidatedJson(dto): ValidatedJson<DepartmentRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<DepartmentResponseDto>>)> {
    let department = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(department), None, None)),
    ))
}

/// Update a department
#[utoipa::path(
    put,
    path = "/api/admin/departments/{id}",
    params(("id" = Uuid, Path, description = "Department ID")),
    request_body = DepartmentRequestDto,
    responses(
        (status = 200, description = "Department updated", body = ApiResponse<DepartmentResponseDto>),
        (status = 404, description = "Department not found"),
        (status = 409, description = "Department name already in use")
    ),
    tag = "departments",
    security(("bearer_auth" = []))
)]
pub async fn update_department(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<DepartmentService>>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<DepartmentRequestDto>,
) -> Result<Json<ApiResponse<DepartmentResponseDto>>> {
    let department = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(department), None, None)))
}

/// Soft delete a department
#[utoipa::path(
    delete,
    path = "/api/admin/departments/{id}",
    params(("id" = Uuid, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department deactivated"),
        (status = 404, description = "Department not found"),
        (status = 409, description = "Department still has active categories")
    ),
    tag = "departments",
    security(("bearer_auth" = []))
)]
pub async fn delete_department(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<DepartmentService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Department deactivated".to_string()),
        None,
    )))
}
