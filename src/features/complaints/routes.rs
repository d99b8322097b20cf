use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::complaints::handlers;
use crate::features::complaints::services::ComplaintService;

/// Citizen complaint routes plus the shared detail view
pub fn routes(service: Arc<ComplaintService>) -> Router {
    Router::new()
        .route("/api/complaints", post(handlers::create_complaint))
        .route("/api/complaints/mine", get(handlers::list_my_complaints))
        .route(
            "/api/complaints/{id}",
            get(handlers::get_complaint)
                .put(handlers::update_complaint)
                .delete(handlers::withdraw_complaint),
        )
        .route(
            "/api/complaints/{id}/close",
            post(handlers::close_my_complaint),
        )
        .with_state(service)
}

/// Routes for officers working their assigned complaints
pub fn officer_routes(service: Arc<ComplaintService>) -> Router {
    Router::new()
        .route(
            "/api/officer/complaints",
            get(handlers::list_assigned_complaints),
        )
        .route(
            "/api/officer/complaints/{id}/status",
            put(handlers::update_complaint_status),
        )
        .with_state(service)
}

/// Complaint oversight (admin only)
pub fn admin_routes(service: Arc<ComplaintService>) -> Router {
    Router::new()
        .route("/api/admin/complaints", get(handlers::list_complaints))
        .route(
            "/api/admin/complaints/{id}/assign",
            post(handlers::assign_complaint),
        )
        .route(
            "/api/admin/complaints/{id}/assignments",
            get(handlers::list_complaint_assignments),
        )
        .route(
            "/api/admin/complaints/{id}/close",
            post(handlers::close_complaint),
        )
        .with_state(service)
}
