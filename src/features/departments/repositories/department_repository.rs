use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::departments::models::{Department, DepartmentInput};
use crate::shared::types::{Page, PaginationQuery};

const DUPLICATE_NAME: &str = "A department with this name already exists";

#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// Active departments ordered by name
    async fn list(&self, page: PaginationQuery) -> Result<Page<Department>>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Department>>;
    async fn create(&self, input: &DepartmentInput) -> Result<Department>;
    async fn update(&self, id: Uuid, input: &DepartmentInput) -> Result<Option<Department>>;
    async fn count_active_categories(&self, id: Uuid) -> Result<i64>;
    /// Soft delete; returns false when no active row matched
    async fn deactivate(&self, id: Uuid) -> Result<bool>;
}

pub struct PgDepartmentRepository {
    pool: PgPool,
}

impl PgDepartmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DepartmentRepository for PgDepartmentRepository {
    async fn list(&self, page: PaginationQuery) -> Result<Page<Department>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM departments WHERE is_active = TRUE")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to count departments: {:?}", e);
                    AppError::Database(e)
                })?;

        let items = sqlx::query_as::<_, Department>(
            r#"
            SELECT id, name, description, is_active, created_at, updated_at
            FROM departments
            WHERE is_active = TRUE
            ORDER BY name
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list departments: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(Page::new(items, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Department>> {
        sqlx::query_as::<_, Department>(
            r#"
            SELECT id, name, description, is_active, created_at, updated_at
            FROM departments
            WHERE id = $1 AND is_active = TRUE
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get department: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn create(&self, input: &DepartmentInput) -> Result<Department> {
        sqlx::query_as::<_, Department>(
            r#"
            INSERT INTO departments (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, is_active, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, DUPLICATE_NAME))
    }

    async fn update(&self, id: Uuid, input: &DepartmentInput) -> Result<Option<Department>> {
        sqlx::query_as::<_, Department>(
            r#"
            UPDATE departments
            SET name = $2, description = $3, updated_at = NOW()
            WHERE id = $1 AND is_active = TRUE
            RETURNING id, name, description, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, DUPLICATE_NAME))
    }

    async fn count_active_categories(&self, id: Uuid) -> Result<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM categories WHERE department_id = $1 AND is_active = TRUE",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count department categories: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE departments
            SET is_active = FALSE, updated_at = NOW()
            WHERE id = $1 AND is_active = TRUE
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to deactivate department: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}
