use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::auth::guards::{RequireAdmin, RequireCitizen, RequireOfficer};
use crate::features::dashboard::dtos::{
    AdminDashboardDto, CitizenDashboardDto, OfficerDashboardDto,
};
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ApiResponse;

/// Portal-wide complaint and grievance counts
#[utoipa::path(
    get,
    path = "/api/dashboard/admin",
    tag = "dashboard",
    responses(
        (status = 200, description = "Admin dashboard", body = ApiResponse<AdminDashboardDto>),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_admin_dashboard(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<AdminDashboardDto>>> {
    let dashboard = service.admin().await?;
    Ok(Json(ApiResponse::success(Some(dashboard), None, None)))
}

/// The caller's workload
#[utoipa::path(
    get,
    path = "/api/dashboard/officer",
    tag = "dashboard",
    responses(
        (status = 200, description = "Officer dashboard", body = ApiResponse<OfficerDashboardDto>),
        (status = 403, description = "Officer access required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_officer_dashboard(
    RequireOfficer(user): RequireOfficer,
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<OfficerDashboardDto>>> {
    let dashboard = service.officer(&user).await?;
    Ok(Json(ApiResponse::success(Some(dashboard), None, None)))
}

/// The caller's complaints, grievances and unread notifications
#[utoipa::path(
    get,
    path = "/api/dashboard/citizen",
    tag = "dashboard",
    responses(
        (status = 200, description = "Citizen dashboard", body = ApiResponse<CitizenDashboardDto>),
        (status = 403, description = "Citizen access required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_citizen_dashboard(
    RequireCitizen(user): RequireCitizen,
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<CitizenDashboardDto>>> {
    let dashboard = service.citizen(&user).await?;
    Ok(Json(ApiResponse::success(Some(dashboard), None, None)))
}
