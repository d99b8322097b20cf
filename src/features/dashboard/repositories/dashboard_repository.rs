use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::dashboard::models::{DashboardScope, DepartmentCount, StatusCount};

#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// Active complaints grouped by status; only statuses with rows are returned
    async fn complaints_by_status(&self, scope: DashboardScope) -> Result<Vec<StatusCount>>;
    /// Active complaints per active department, busiest first
    async fn complaints_by_department(&self) -> Result<Vec<DepartmentCount>>;
    async fn pending_officer_approvals(&self) -> Result<i64>;
    async fn count_grievances(&self, scope: DashboardScope, open_only: bool) -> Result<i64>;
}

pub struct PgDashboardRepository {
    pool: PgPool,
}

impl PgDashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DashboardRepository for PgDashboardRepository {
    async fn complaints_by_status(&self, scope: DashboardScope) -> Result<Vec<StatusCount>> {
        sqlx::query_as::<_, StatusCount>(
            r#"
            SELECT c.status_id AS status, COUNT(*) AS count
            FROM complaints c
            WHERE c.is_active = TRUE
              AND ($1::uuid IS NULL OR c.citizen_id = $1)
              AND ($2::uuid IS NULL OR EXISTS (
                  SELECT 1 FROM complaint_assignments a
                  WHERE a.complaint_id = c.id AND a.is_active = TRUE AND a.officer_id = $2
              ))
            GROUP BY c.status_id
            ORDER BY c.status_id
            "#,
        )
        .bind(scope.citizen_id())
        .bind(scope.officer_id())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count complaints by status: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn complaints_by_department(&self) -> Result<Vec<DepartmentCount>> {
        sqlx::query_as::<_, DepartmentCount>(
            r#"
            SELECT d.id AS department_id, d.name AS department_name, COUNT(c.id) AS count
            FROM departments d
            LEFT JOIN complaints c ON c.department_id = d.id AND c.is_active = TRUE
            WHERE d.is_active = TRUE
            GROUP BY d.id, d.name
            ORDER BY count DESC, d.name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count complaints by department: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn pending_officer_approvals(&self) -> Result<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM officers WHERE is_active = TRUE AND is_approved = FALSE",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count pending officers: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn count_grievances(&self, scope: DashboardScope, open_only: bool) -> Result<i64> {
        sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM grievances
            WHERE is_active = TRUE
              AND ($1::uuid IS NULL OR citizen_id = $1)
              AND ($2::uuid IS NULL OR escalated_officer_id = $2)
              AND (NOT $3 OR status IN ('open', 'in_review'))
            "#,
        )
        .bind(scope.citizen_id())
        .bind(scope.officer_id())
        .bind(open_only)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count grievances: {:?}", e);
            AppError::Database(e)
        })
    }
}
