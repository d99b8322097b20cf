use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::files::models::{NewStoredFile, StoredFile};

const FILE_COLUMNS: &str = r#"
    id, file_key, original_filename, content_type, file_size, url, purpose,
    uploaded_by, is_active, created_at, updated_at
"#;

#[async_trait]
pub trait FileRepository: Send + Sync {
    async fn create(&self, file: &NewStoredFile) -> Result<StoredFile>;
    async fn find_active_by_url(&self, url: &str) -> Result<Option<StoredFile>>;
    async fn deactivate(&self, id: Uuid) -> Result<bool>;
}

pub struct PgFileRepository {
    pool: PgPool,
}

impl PgFileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRepository for PgFileRepository {
    async fn create(&self, file: &NewStoredFile) -> Result<StoredFile> {
        sqlx::query_as::<_, StoredFile>(&format!(
            r#"
            INSERT INTO files
                (file_key, original_filename, content_type, file_size, url, purpose, uploaded_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            FILE_COLUMNS
        ))
        .bind(&file.file_key)
        .bind(&file.original_filename)
        .bind(&file.content_type)
        .bind(file.file_size)
        .bind(&file.url)
        .bind(file.purpose.as_str())
        .bind(file.uploaded_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to save file metadata: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_active_by_url(&self, url: &str) -> Result<Option<StoredFile>> {
        sqlx::query_as::<_, StoredFile>(&format!(
            "SELECT {} FROM files WHERE url = $1 AND is_active = TRUE",
            FILE_COLUMNS
        ))
        .bind(url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get file by url: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE files SET is_active = FALSE, updated_at = NOW() WHERE id = $1 AND is_active = TRUE",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to deactivate file: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}
