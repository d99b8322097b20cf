use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::files::dtos::{
    get_extension_from_content_type, is_mime_type_allowed, FileResponseDto, ALLOWED_MIME_TYPES,
    MAX_FILE_SIZE,
};
use crate::features::files::models::{FilePurpose, NewStoredFile};
use crate::features::files::repositories::FileRepository;
use crate::modules::storage::FileStorage;

/// Service for file operations
pub struct FileService {
    files: Arc<dyn FileRepository>,
    storage: Arc<dyn FileStorage>,
}

impl FileService {
    pub fn new(files: Arc<dyn FileRepository>, storage: Arc<dyn FileStorage>) -> Self {
        Self { files, storage }
    }

    /// Store the file and save its metadata.
    ///
    /// Objects are keyed `{purpose}/{user_id}/{file_id}.{extension}`.
    pub async fn upload(
        &self,
        user: &AuthenticatedUser,
        data: Vec<u8>,
        original_filename: &str,
        content_type: &str,
        purpose: FilePurpose,
    ) -> Result<FileResponseDto> {
        if data.is_empty() {
            return Err(AppError::BadRequest("File is empty".to_string()));
        }

        if data.len() > MAX_FILE_SIZE {
            return Err(AppError::BadRequest(format!(
                "File too large. Maximum size is {} MB",
                MAX_FILE_SIZE / 1024 / 1024
            )));
        }

        if !is_mime_type_allowed(content_type) {
            return Err(AppError::BadRequest(format!(
                "File type '{}' is not allowed. Allowed types: {}",
                content_type,
                ALLOWED_MIME_TYPES.join(", ")
            )));
        }

        let extension = get_extension_from_content_type(content_type).unwrap_or("bin");
        let file_key = format!(
            "{}/{}/{}.{}",
            purpose.as_str(),
            user.user_id,
            Uuid::new_v4(),
            extension
        );
        let file_size = data.len() as i64;

        self.storage.put(&file_key, data, content_type).await?;
        debug!("File stored: {}", file_key);

        let file = self
            .files
            .create(&NewStoredFile {
                url: self.storage.public_url(&file_key),
                file_key,
                original_filename: original_filename.to_string(),
                content_type: content_type.to_string(),
                file_size,
                purpose,
                uploaded_by: user.user_id,
            })
            .await?;

        info!(
            "File metadata saved: id={}, key={}, size={}",
            file.id, file.file_key, file.file_size
        );

        Ok(file.into())
    }

    /// Delete a file by its URL. Only the uploader can delete it.
    pub async fn delete_by_url(&self, user: &AuthenticatedUser, url: &str) -> Result<()> {
        let file = self
            .files
            .find_active_by_url(url)
            .await?
            .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

        if file.uploaded_by != user.user_id {
            return Err(AppError::Forbidden(
                "You do not have permission to delete this file".to_string(),
            ));
        }

        self.storage.delete(&file.file_key).await?;
        self.files.deactivate(file.id).await?;

        info!("File soft deleted: id={}, key={}", file.id, file.file_key);
        Ok(())
    }
}
