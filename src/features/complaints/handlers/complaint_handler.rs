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
use crate::features::complaints::dtos::{
    AssignComplaintDto, AssignmentResponseDto, ComplaintQueryParams, ComplaintRequestDto,
    ComplaintResponseDto, ComplaintStatusQuery, UpdateComplaintStatusDto,
};
use crate::features::complaints::services::ComplaintService;
use crate::shared::types::{ApiResponse, PaginationQuery};

// =============================================================================
// CITIZEN
// =============================================================================

/// File a new complaint
#[utoipa::path(
    post,
    path = "/api/complaints",
    request_body = ComplaintRequestDto,
    responses(
        (status = 201, description = "Complaint filed", body = ApiResponse<ComplaintResponseDto>),
        (status = 400, description = "Validation error or category outside department"),
        (status = 403, description = "Citizen access required")
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn create_complaint(
    RequireCitizen(user): RequireCitizen,
    State(service): State<Arc<ComplaintService>>,
    ValidatedJson(dto): ValidatedJson<ComplaintRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<ComplaintResponseDto>>)> {
    let complaint = service.create(&user, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(complaint), None, None)),
    ))
}

/// List the caller's complaints
#[utoipa::path(
    get,
    path = "/api/complaints/mine",
    params(ComplaintStatusQuery, PaginationQuery),
    responses(
        (status = 200, description = "The caller's complaints", body = ApiResponse<Vec<ComplaintResponseDto>>)
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn list_my_complaints(
    RequireCitizen(user): RequireCitizen,
    State(service): State<Arc<ComplaintService>>,
    Query(filter): Query<ComplaintStatusQuery>,
    Query(page): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ComplaintResponseDto>>>> {
    let complaints = service.list_mine(&user, filter.status, page).await?;
    Ok(Json(ApiResponse::paginated(complaints)))
}

/// Get complaint by ID
#[utoipa::path(
    get,
    path = "/api/complaints/{id}",
    params(("id" = Uuid, Path, description = "Complaint ID")),
    responses(
        (status = 200, description = "Complaint found", body = ApiResponse<ComplaintResponseDto>),
        (status = 403, description = "Not the owner, an assigned officer or an admin"),
        (status = 404, description = "Complaint not found")
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn get_complaint(
    user: AuthenticatedUser,
    State(service): State<Arc<ComplaintService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ComplaintResponseDto>>> {
    let complaint = service.get(&user, id).await?;
    Ok(Json(ApiResponse::success(Some(complaint), None, None)))
}

/// Edit a pending complaint
#[utoipa::path(
    put,
    path = "/api/complaints/{id}",
    params(("id" = Uuid, Path, description = "Complaint ID")),
    request_body = ComplaintRequestDto,
    responses(
        (status = 200, description = "Complaint updated", body = ApiResponse<ComplaintResponseDto>),
        (status = 409, description = "Complaint is no longer pending")
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn update_complaint(
    RequireCitizen(user): RequireCitizen,
    State(service): State<Arc<ComplaintService>>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<ComplaintRequestDto>,
) -> Result<Json<ApiResponse<ComplaintResponseDto>>> {
    let complaint = service.update(&user, id, dto).await?;
    Ok(Json(ApiResponse::success(Some(complaint), None, None)))
}

/// Withdraw a pending complaint
#[utoipa::path(
    delete,
    path = "/api/complaints/{id}",
    params(("id" = Uuid, Path, description = "Complaint ID")),
    responses(
        (status = 200, description = "Complaint withdrawn"),
        (status = 409, description = "Complaint is no longer pending")
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn withdraw_complaint(
    RequireCitizen(user): RequireCitizen,
    State(service): State<Arc<ComplaintService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.withdraw(&user, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Complaint withdrawn".to_string()),
        None,
    )))
}

/// Confirm a resolved complaint and close it
#[utoipa::path(
    post,
    path = "/api/complaints/{id}/close",
    params(("id" = Uuid, Path, description = "Complaint ID")),
    responses(
        (status = 200, description = "Complaint closed", body = ApiResponse<ComplaintResponseDto>),
        (status = 409, description = "Complaint is not resolved")
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn close_my_complaint(
    RequireCitizen(user): RequireCitizen,
    State(service): State<Arc<ComplaintService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ComplaintResponseDto>>> {
    let complaint = service.close_by_citizen(&user, id).await?;
    Ok(Json(ApiResponse::success(Some(complaint), None, None)))
}

// =============================================================================
// OFFICER
// =============================================================================

/// List complaints actively assigned to the caller
#[utoipa::path(
    get,
    path = "/api/officer/complaints",
    params(ComplaintStatusQuery, PaginationQuery),
    responses(
        (status = 200, description = "Assigned complaints", body = ApiResponse<Vec<ComplaintResponseDto>>),
        (status = 403, description = "Officer access required")
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn list_assigned_complaints(
    RequireOfficer(user): RequireOfficer,
    State(service): State<Arc<ComplaintService>>,
    Query(filter): Query<ComplaintStatusQuery>,
    Query(page): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ComplaintResponseDto>>>> {
    let complaints = service.list_assigned(&user, filter.status, page).await?;
    Ok(Json(ApiResponse::paginated(complaints)))
}

/// Move an assigned complaint to InProgress or Resolved
#[utoipa::path(
    put,
    path = "/api/officer/complaints/{id}/status",
    params(("id" = Uuid, Path, description = "Complaint ID")),
    request_body = UpdateComplaintStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ComplaintResponseDto>),
        (status = 400, description = "Unchanged status or status not allowed for officers"),
        (status = 403, description = "Complaint is not assigned to the caller"),
        (status = 409, description = "Transition not allowed")
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn update_complaint_status(
    RequireOfficer(user): RequireOfficer,
    State(service): State<Arc<ComplaintService>>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateComplaintStatusDto>,
) -> Result<Json<ApiResponse<ComplaintResponseDto>>> {
    let complaint = service.update_status_by_officer(&user, id, dto).await?;
    Ok(Json(ApiResponse::success(Some(complaint), None, None)))
}

// =============================================================================
// ADMIN
// =============================================================================

/// List all complaints
#[utoipa::path(
    get,
    path = "/api/admin/complaints",
    params(ComplaintQueryParams, PaginationQuery),
    responses(
        (status = 200, description = "List of complaints", body = ApiResponse<Vec<ComplaintResponseDto>>),
        (status = 403, description = "Admin access required")
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn list_complaints(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ComplaintService>>,
    Query(params): Query<ComplaintQueryParams>,
    Query(page): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ComplaintResponseDto>>>> {
    let complaints = service.list_all(params, page).await?;
    Ok(Json(ApiResponse::paginated(complaints)))
}

/// Assign or reassign a complaint
#[utoipa::path(
    post,
    path = "/api/admin/complaints/{id}/assign",
    params(("id" = Uuid, Path, description = "Complaint ID")),
    request_body = AssignComplaintDto,
    responses(
        (status = 201, description = "Complaint assigned", body = ApiResponse<AssignmentResponseDto>),
        (status = 400, description = "Officer not approved"),
        (status = 404, description = "Complaint or officer not found"),
        (status = 409, description = "Complaint closed or already assigned to this officer")
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn assign_complaint(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<ComplaintService>>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<AssignComplaintDto>,
) -> Result<(StatusCode, Json<ApiResponse<AssignmentResponseDto>>)> {
    let assignment = service.assign(&admin, id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(assignment), None, None)),
    ))
}

/// Assignment history of a complaint, oldest first
#[utoipa::path(
    get,
    path = "/api/admin/complaints/{id}/assignments",
    params(("id" = Uuid, Path, description = "Complaint ID")),
    responses(
        (status = 200, description = "Assignment history", body = ApiResponse<Vec<AssignmentResponseDto>>),
        (status = 404, description = "Complaint not found")
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn list_complaint_assignments(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ComplaintService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<AssignmentResponseDto>>>> {
    let assignments = service.assignment_history(id).await?;
    Ok(Json(ApiResponse::success(Some(assignments), None, None)))
}

/// Close a resolved complaint
#[utoipa::path(
    post,
    path = "/api/admin/complaints/{id}/close",
    params(("id" = Uuid, Path, description = "Complaint ID")),
    responses(
        (status = 200, description = "Complaint closed", body = ApiResponse<ComplaintResponseDto>),
        (status = 409, description = "Complaint is not resolved")
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn close_complaint(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ComplaintService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ComplaintResponseDto>>> {
    let complaint = service.close_by_admin(id).await?;
    Ok(Json(ApiResponse::success(Some(complaint), None, None)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::complaints::routes;
    use crate::features::notifications::NotificationService;
    use crate::features::officers::OfficerRank;
    use crate::shared::in_memory::InMemoryStore;
    use crate::shared::test_helpers::{create_admin_user, with_user};
    use axum_test::TestServer;
    use serde_json::json;

    fn service(store: &Arc<InMemoryStore>) -> Arc<ComplaintService> {
        let notifications = Arc::new(NotificationService::new(
            store.clone(),
            store.clone(),
            store.clone(),
        ));
        Arc::new(ComplaintService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            notifications,
        ))
    }

    #[tokio::test]
    async fn test_citizen_files_and_lists_complaints() {
        let store = InMemoryStore::new();
        let department = store.seed_department("Roads");
        let category = store.seed_category(department.id, "Potholes");
        let (user, _) = store.seed_citizen("Asha Rao");

        let server =
            TestServer::new(with_user(routes::routes(service(&store)), user)).unwrap();

        let response = server
            .post("/api/complaints")
            .json(&json!({
                "department_id": department.id,
                "category_id": category.id,
                "title": "Pothole on MG Road",
                "description": "Deep pothole near the bus stop"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["status"], "Pending");

        let response = server
            .get("/api/complaints/mine")
            .add_query_param("status", "Pending")
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["meta"]["total"], 1);
    }

    #[tokio::test]
    async fn test_invalid_image_url_is_rejected() {
        let store = InMemoryStore::new();
        let department = store.seed_department("Roads");
        let category = store.seed_category(department.id, "Potholes");
        let (user, _) = store.seed_citizen("Asha Rao");

        let server =
            TestServer::new(with_user(routes::routes(service(&store)), user)).unwrap();

        server
            .post("/api/complaints")
            .json(&json!({
                "department_id": department.id,
                "category_id": category.id,
                "title": "Pothole on MG Road",
                "description": "Deep pothole near the bus stop",
                "image_url": "not a url"
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_admin_assigns_complaint() {
        let store = InMemoryStore::new();
        let department = store.seed_department("Roads");
        let category = store.seed_category(department.id, "Potholes");
        let (_, citizen) = store.seed_citizen("Asha Rao");
        let (_, officer) =
            store.seed_officer("Ravi Kumar", department.id, OfficerRank::FieldOfficer, true);
        let complaint = store.seed_complaint(citizen.id, &category);

        let app = with_user(routes::admin_routes(service(&store)), create_admin_user());
        let server = TestServer::new(app).unwrap();

        let response = server
            .post(&format!("/api/admin/complaints/{}/assign", complaint.id))
            .json(&json!({ "officer_id": officer.id }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body: serde_json::Value = server
            .get(&format!("/api/admin/complaints/{}/assignments", complaint.id))
            .await
            .json();
        assert_eq!(body["data"].as_array().map(|a| a.len()), Some(1));
        assert_eq!(body["data"][0]["officer_name"], "Ravi Kumar");
    }
}
