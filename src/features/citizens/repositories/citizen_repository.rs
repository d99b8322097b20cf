use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::contains_pattern;
use crate::core::error::{AppError, Result};
use crate::features::citizens::models::{Citizen, CitizenProfileInput};
use crate::shared::types::{Page, PaginationQuery};

pub(crate) const CITIZEN_SELECT: &str = r#"
    SELECT
        c.id, c.user_id, u.email, c.full_name, c.phone, c.address,
        c.is_active, c.created_at, c.updated_at
    FROM citizens c
    JOIN users u ON u.id = c.user_id
"#;

#[async_trait]
pub trait CitizenRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Citizen>>;
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Citizen>>;
    /// Active citizens, newest first, optionally matching name or email
    async fn list(&self, search: Option<&str>, page: PaginationQuery) -> Result<Page<Citizen>>;
    async fn update_profile(
        &self,
        id: Uuid,
        input: &CitizenProfileInput,
    ) -> Result<Option<Citizen>>;
    /// Deactivate the profile and its account together
    async fn deactivate(&self, id: Uuid) -> Result<bool>;
}

pub struct PgCitizenRepository {
    pool: PgPool,
}

impl PgCitizenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CitizenRepository for PgCitizenRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Citizen>> {
        sqlx::query_as::<_, Citizen>(&format!(
            "{} WHERE c.id = $1 AND c.is_active = TRUE",
            CITIZEN_SELECT
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get citizen: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Citizen>> {
        sqlx::query_as::<_, Citizen>(&format!(
            "{} WHERE c.user_id = $1 AND c.is_active = TRUE",
            CITIZEN_SELECT
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get citizen by user: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list(&self, search: Option<&str>, page: PaginationQuery) -> Result<Page<Citizen>> {
        let pattern = search.map(|s| contains_pattern(s.trim()));

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM citizens c
            JOIN users u ON u.id = c.user_id
            WHERE c.is_active = TRUE
              AND ($1::text IS NULL OR c.full_name ILIKE $1 ESCAPE '\' OR u.email ILIKE $1 ESCAPE '\')
            "#,
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count citizens: {:?}", e);
            AppError::Database(e)
        })?;

        let items = sqlx::query_as::<_, Citizen>(&format!(
            r#"{}
            WHERE c.is_active = TRUE
              AND ($1::text IS NULL OR c.full_name ILIKE $1 ESCAPE '\' OR u.email ILIKE $1 ESCAPE '\')
            ORDER BY c.created_at DESC
            OFFSET $2 LIMIT $3
            "#,
            CITIZEN_SELECT
        ))
        .bind(&pattern)
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list citizens: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(Page::new(items, total))
    }

    async fn update_profile(
        &self,
        id: Uuid,
        input: &CitizenProfileInput,
    ) -> Result<Option<Citizen>> {
        let updated = sqlx::query(
            r#"
            UPDATE citizens
            SET full_name = $2, phone = $3, address = $4, updated_at = NOW()
            WHERE id = $1 AND is_active = TRUE
            "#,
        )
        .bind(id)
        .bind(&input.full_name)
        .bind(&input.phone)
        .bind(&input.address)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update citizen: {:?}", e);
            AppError::Database(e)
        })?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let user_id: Option<Uuid> = sqlx::query_scalar(
            r#"
            UPDATE citizens
            SET is_active = FALSE, updated_at = NOW()
            WHERE id = $1 AND is_active = TRUE
            RETURNING user_id
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(user_id) = user_id else {
            return Ok(false);
        };

        sqlx::query("UPDATE users SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}
