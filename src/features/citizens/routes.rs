use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::citizens::handlers;
use crate::features::citizens::services::CitizenService;

/// Citizen self-service routes
pub fn routes(service: Arc<CitizenService>) -> Router {
    Router::new()
        .route(
            "/api/citizens/me",
            get(handlers::get_my_profile).put(handlers::update_my_profile),
        )
        .with_state(service)
}

/// Citizen management (admin only)
pub fn admin_routes(service: Arc<CitizenService>) -> Router {
    Router::new()
        .route("/api/admin/citizens", get(handlers::list_citizens))
        .route(
            "/api/admin/citizens/{id}",
            get(handlers::get_citizen).delete(handlers::delete_citizen),
        )
        .with_state(service)
}
