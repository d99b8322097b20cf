use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::statuses::models::StatusDefinition;

#[async_trait]
pub trait StatusRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<StatusDefinition>>;
}

pub struct PgStatusRepository {
    pool: PgPool,
}

impl PgStatusRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatusRepository for PgStatusRepository {
    async fn list(&self) -> Result<Vec<StatusDefinition>> {
        sqlx::query_as::<_, StatusDefinition>(
            "SELECT id, name, description FROM complaint_statuses ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list complaint statuses: {:?}", e);
            AppError::Database(e)
        })
    }
}
