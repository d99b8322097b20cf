use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::notifications::models::{Notification, Recipient};
use crate::shared::types::{Page, PaginationQuery};

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, recipient: Recipient, message: &str) -> Result<Notification>;
    /// Newest first
    async fn list(
        &self,
        recipient: Recipient,
        unread_only: bool,
        page: PaginationQuery,
    ) -> Result<Page<Notification>>;
    async fn count_unread(&self, recipient: Recipient) -> Result<i64>;
    /// Returns false when the notification does not exist or belongs to someone else
    async fn mark_read(&self, id: Uuid, recipient: Recipient) -> Result<bool>;
    async fn mark_all_read(&self, recipient: Recipient) -> Result<u64>;
}

pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Exactly one of citizen_id/officer_id is set, so matching both with
// IS NOT DISTINCT FROM selects the recipient's rows.
const RECIPIENT_FILTER: &str =
    "citizen_id IS NOT DISTINCT FROM $1 AND officer_id IS NOT DISTINCT FROM $2";

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    async fn create(&self, recipient: Recipient, message: &str) -> Result<Notification> {
        let (citizen_id, officer_id) = recipient.columns();

        sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (citizen_id, officer_id, message)
            VALUES ($1, $2, $3)
            RETURNING id, citizen_id, officer_id, message, is_read, created_at
            "#,
        )
        .bind(citizen_id)
        .bind(officer_id)
        .bind(message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create notification: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list(
        &self,
        recipient: Recipient,
        unread_only: bool,
        page: PaginationQuery,
    ) -> Result<Page<Notification>> {
        let (citizen_id, officer_id) = recipient.columns();

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM notifications WHERE {} AND ($3 = FALSE OR is_read = FALSE)",
            RECIPIENT_FILTER
        ))
        .bind(citizen_id)
        .bind(officer_id)
        .bind(unread_only)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count notifications: {:?}", e);
            AppError::Database(e)
        })?;

        let items = sqlx::query_as::<_, Notification>(&format!(
            r#"
            SELECT id, citizen_id, officer_id, message, is_read, created_at
            FROM notifications
            WHERE {} AND ($3 = FALSE OR is_read = FALSE)
            ORDER BY created_at DESC
            OFFSET $4 LIMIT $5
            "#,
            RECIPIENT_FILTER
        ))
        .bind(citizen_id)
        .bind(officer_id)
        .bind(unread_only)
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list notifications: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(Page::new(items, total))
    }

    async fn count_unread(&self, recipient: Recipient) -> Result<i64> {
        let (citizen_id, officer_id) = recipient.columns();

        sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM notifications WHERE {} AND is_read = FALSE",
            RECIPIENT_FILTER
        ))
        .bind(citizen_id)
        .bind(officer_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count unread notifications: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn mark_read(&self, id: Uuid, recipient: Recipient) -> Result<bool> {
        let (citizen_id, officer_id) = recipient.columns();

        let result = sqlx::query(&format!(
            "UPDATE notifications SET is_read = TRUE WHERE {} AND id = $3",
            RECIPIENT_FILTER
        ))
        .bind(citizen_id)
        .bind(officer_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to mark notification read: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn mark_all_read(&self, recipient: Recipient) -> Result<u64> {
        let (citizen_id, officer_id) = recipient.columns();

        let result = sqlx::query(&format!(
            "UPDATE notifications SET is_read = TRUE WHERE {} AND is_read = FALSE",
            RECIPIENT_FILTER
        ))
        .bind(citizen_id)
        .bind(officer_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to mark notifications read: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(result.rows_affected())
    }
}
