use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::departments::handlers;
use crate::features::departments::services::DepartmentService;

/// Public department lookups (used by registration and complaint forms)
pub fn routes(service: Arc<DepartmentService>) -> Router {
    Router::new()
        .route("/api/departments", get(handlers::list_departments))
        .route("/api/departments/{id}", get(handlers::get_department))
        .with_state(service)
}

/// Department management (admin only)
pub fn admin_routes(service: Arc<DepartmentService>) -> Router {
    Router::new()
        .route(
            "/api/admin/departments",
            axum::routing::post(handlers::create_department),
        )
        .route(
            "/api/admin/departments/{id}",
            axum::routing::put(handlers::update_department).delete(handlers::delete_department),
        )
        .with_state(service)
}
