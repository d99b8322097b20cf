use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::grievances::handlers;
use crate::features::grievances::services::GrievanceService;

/// Citizen grievance routes plus the shared detail view
pub fn routes(service: Arc<GrievanceService>) -> Router {
    Router::new()
        .route("/api/grievances", post(handlers::create_grievance))
        .route("/api/grievances/mine", get(handlers::list_my_grievances))
        .route("/api/grievances/{id}", get(handlers::get_grievance))
        .with_state(service)
}

/// Routes for officers reviewing escalated grievances
pub fn officer_routes(service: Arc<GrievanceService>) -> Router {
    Router::new()
        .route(
            "/api/officer/grievances",
            get(handlers::list_escalated_grievances),
        )
        .route(
            "/api/officer/grievances/{id}",
            put(handlers::respond_to_grievance),
        )
        .with_state(service)
}

/// Grievance oversight (admin only)
pub fn admin_routes(service: Arc<GrievanceService>) -> Router {
    Router::new()
        .route("/api/admin/grievances", get(handlers::list_grievances))
        .with_state(service)
}
