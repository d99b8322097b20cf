use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, post},
    Router,
};
use std::sync::Arc;

use crate::features::files::dtos::MAX_FILE_SIZE;
use crate::features::files::handlers;
use crate::features::files::services::FileService;

/// Room for multipart boundaries and the `purpose` field
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Complaint image and proof document uploads (any authenticated role)
pub fn routes(service: Arc<FileService>) -> Router {
    let upload = post(handlers::upload_file)
        .layer(DefaultBodyLimit::max(MAX_FILE_SIZE + MULTIPART_OVERHEAD));

    Router::new()
        .route("/api/files/upload", upload)
        .route("/api/files", delete(handlers::delete_file_by_url))
        .with_state(service)
}
