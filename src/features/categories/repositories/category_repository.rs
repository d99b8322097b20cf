use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::{Category, CategoryInput};
use crate::shared::types::{Page, PaginationQuery};

const DUPLICATE_NAME: &str = "A category with this name already exists in the department";

const CATEGORY_SELECT: &str = r#"
    SELECT
        c.id, c.department_id, d.name AS department_name,
        c.name, c.description, c.is_active, c.created_at, c.updated_at
    FROM categories c
    JOIN departments d ON d.id = c.department_id
"#;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Active categories, optionally limited to one department
    async fn list(
        &self,
        department_id: Option<Uuid>,
        page: PaginationQuery,
    ) -> Result<Page<Category>>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>>;
    async fn create(&self, input: &CategoryInput) -> Result<Category>;
    async fn update(&self, id: Uuid, input: &CategoryInput) -> Result<Option<Category>>;
    async fn deactivate(&self, id: Uuid) -> Result<bool>;
}

pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Category>> {
        sqlx::query_as::<_, Category>(&format!(
            "{} WHERE c.id = $1 AND c.is_active = TRUE",
            CATEGORY_SELECT
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category: {:?}", e);
            AppError::Database(e)
        })
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn list(
        &self,
        department_id: Option<Uuid>,
        page: PaginationQuery,
    ) -> Result<Page<Category>> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM categories
            WHERE is_active = TRUE AND ($1::uuid IS NULL OR department_id = $1)
            "#,
        )
        .bind(department_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count categories: {:?}", e);
            AppError::Database(e)
        })?;

        let items = sqlx::query_as::<_, Category>(&format!(
            r#"{}
            WHERE c.is_active = TRUE AND ($1::uuid IS NULL OR c.department_id = $1)
            ORDER BY d.name, c.name
            OFFSET $2 LIMIT $3
            "#,
            CATEGORY_SELECT
        ))
        .bind(department_id)
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(Page::new(items, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        self.fetch(id).await
    }

    async fn create(&self, input: &CategoryInput) -> Result<Category> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO categories (department_id, name, description)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(input.department_id)
        .bind(&input.name)
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, DUPLICATE_NAME))?;

        self.fetch(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Category {} vanished after insert", id)))
    }

    async fn update(&self, id: Uuid, input: &CategoryInput) -> Result<Option<Category>> {
        let updated: Option<Uuid> = sqlx::query_scalar(
            r#"
            UPDATE categories
            SET department_id = $2, name = $3, description = $4, updated_at = NOW()
            WHERE id = $1 AND is_active = TRUE
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(input.department_id)
        .bind(&input.name)
        .bind(&input.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, DUPLICATE_NAME))?;

        match updated {
            Some(id) => self.fetch(id).await,
            None => Ok(None),
        }
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE categories
            SET is_active = FALSE, updated_at = NOW()
            WHERE id = $1 AND is_active = TRUE
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to deactivate category: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}
