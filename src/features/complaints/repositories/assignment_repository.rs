use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::complaints::models::{ComplaintAssignment, NewAssignment};

const ASSIGNMENT_SELECT: &str = r#"
    SELECT
        a.id, a.complaint_id, a.officer_id, o.full_name AS officer_name,
        a.assigned_by, a.remarks, a.proof_url, a.is_active, a.assigned_at, a.updated_at
    FROM complaint_assignments a
    JOIN officers o ON o.id = a.officer_id
"#;

#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    async fn find_active(&self, complaint_id: Uuid) -> Result<Option<ComplaintAssignment>>;
    /// Most recent assignment, active or not
    async fn find_latest(&self, complaint_id: Uuid) -> Result<Option<ComplaintAssignment>>;
    /// Full history, oldest first
    async fn list_for_complaint(&self, complaint_id: Uuid) -> Result<Vec<ComplaintAssignment>>;
    /// Replace the active assignment (if any) with a new one in one transaction
    async fn assign(&self, assignment: &NewAssignment) -> Result<ComplaintAssignment>;
}

pub struct PgAssignmentRepository {
    pool: PgPool,
}

impl PgAssignmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssignmentRepository for PgAssignmentRepository {
    async fn find_active(&self, complaint_id: Uuid) -> Result<Option<ComplaintAssignment>> {
        sqlx::query_as::<_, ComplaintAssignment>(&format!(
            "{} WHERE a.complaint_id = $1 AND a.is_active = TRUE",
            ASSIGNMENT_SELECT
        ))
        .bind(complaint_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get active assignment: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_latest(&self, complaint_id: Uuid) -> Result<Option<ComplaintAssignment>> {
        sqlx::query_as::<_, ComplaintAssignment>(&format!(
            "{} WHERE a.complaint_id = $1 ORDER BY a.assigned_at DESC LIMIT 1",
            ASSIGNMENT_SELECT
        ))
        .bind(complaint_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get latest assignment: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list_for_complaint(&self, complaint_id: Uuid) -> Result<Vec<ComplaintAssignment>> {
        sqlx::query_as::<_, ComplaintAssignment>(&format!(
            "{} WHERE a.complaint_id = $1 ORDER BY a.assigned_at ASC",
            ASSIGNMENT_SELECT
        ))
        .bind(complaint_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list assignments: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn assign(&self, assignment: &NewAssignment) -> Result<ComplaintAssignment> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE complaint_assignments
            SET is_active = FALSE, updated_at = NOW()
            WHERE complaint_id = $1 AND is_active = TRUE
            "#,
        )
        .bind(assignment.complaint_id)
        .execute(&mut *tx)
        .await?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO complaint_assignments (complaint_id, officer_id, assigned_by, remarks)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(assignment.complaint_id)
        .bind(assignment.officer_id)
        .bind(assignment.assigned_by)
        .bind(&assignment.remarks)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::from_write(e, "Complaint was assigned concurrently, retry"))?;

        let created = sqlx::query_as::<_, ComplaintAssignment>(&format!(
            "{} WHERE a.id = $1",
            ASSIGNMENT_SELECT
        ))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(created)
    }
}
