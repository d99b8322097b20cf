use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::officers::handlers;
use crate::features::officers::services::OfficerService;

/// Officer self-service routes
pub fn routes(service: Arc<OfficerService>) -> Router {
    Router::new()
        .route(
            "/api/officers/me",
            get(handlers::get_my_profile).put(handlers::update_my_profile),
        )
        .with_state(service)
}

/// Officer approval and placement (admin only)
pub fn admin_routes(service: Arc<OfficerService>) -> Router {
    Router::new()
        .route("/api/admin/officers", get(handlers::list_officers))
        .route(
            "/api/admin/officers/pending",
            get(handlers::list_pending_officers),
        )
        .route(
            "/api/admin/officers/{id}",
            get(handlers::get_officer)
                .put(handlers::update_officer)
                .delete(handlers::delete_officer),
        )
        .route(
            "/api/admin/officers/{id}/approve",
            post(handlers::approve_officer),
        )
        .with_state(service)
}
