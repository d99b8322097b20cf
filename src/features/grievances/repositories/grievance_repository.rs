use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::grievances::models::{
    Grievance, GrievanceFilter, GrievanceStatus, NewGrievance,
};
use crate::shared::types::{Page, PaginationQuery};

const GRIEVANCE_SELECT: &str = r#"
    SELECT
        g.id, g.complaint_id, c.reference_number, g.citizen_id,
        g.original_officer_id, oo.full_name AS original_officer_name,
        g.escalated_officer_id, eo.full_name AS escalated_officer_name,
        g.reason, g.status, g.response, g.responded_at, g.is_active,
        g.created_at, g.updated_at
    FROM grievances g
    JOIN complaints c ON c.id = g.complaint_id
    JOIN officers oo ON oo.id = g.original_officer_id
    JOIN officers eo ON eo.id = g.escalated_officer_id
"#;

const FILTER: &str = r#"
    WHERE g.is_active = TRUE
      AND ($1::uuid IS NULL OR g.citizen_id = $1)
      AND ($2::uuid IS NULL OR g.escalated_officer_id = $2)
      AND ($3::grievance_status IS NULL OR g.status = $3)
"#;

#[async_trait]
pub trait GrievanceRepository: Send + Sync {
    /// Fails with `Conflict` when the complaint already has a grievance
    async fn create(&self, grievance: &NewGrievance) -> Result<Grievance>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Grievance>>;
    async fn find_by_complaint(&self, complaint_id: Uuid) -> Result<Option<Grievance>>;
    async fn list(&self, filter: &GrievanceFilter, page: PaginationQuery)
        -> Result<Page<Grievance>>;
    /// Move from `from` to `to`; `None` when the grievance is no longer in `from`
    async fn respond(
        &self,
        id: Uuid,
        from: GrievanceStatus,
        to: GrievanceStatus,
        response: Option<&str>,
    ) -> Result<Option<Grievance>>;
}

pub struct PgGrievanceRepository {
    pool: PgPool,
}

impl PgGrievanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Grievance>> {
        sqlx::query_as::<_, Grievance>(&format!(
            "{} WHERE g.id = $1 AND g.is_active = TRUE",
            GRIEVANCE_SELECT
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get grievance: {:?}", e);
            AppError::Database(e)
        })
    }
}

#[async_trait]
impl GrievanceRepository for PgGrievanceRepository {
    async fn create(&self, grievance: &NewGrievance) -> Result<Grievance> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO grievances
                (complaint_id, citizen_id, original_officer_id, escalated_officer_id, reason)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(grievance.complaint_id)
        .bind(grievance.citizen_id)
        .bind(grievance.original_officer_id)
        .bind(grievance.escalated_officer_id)
        .bind(&grievance.reason)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::from_write(e, "A grievance has already been filed for this complaint")
        })?;

        self.fetch(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Grievance {} vanished after insert", id)))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Grievance>> {
        self.fetch(id).await
    }

    async fn find_by_complaint(&self, complaint_id: Uuid) -> Result<Option<Grievance>> {
        sqlx::query_as::<_, Grievance>(&format!(
            "{} WHERE g.complaint_id = $1",
            GRIEVANCE_SELECT
        ))
        .bind(complaint_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get grievance by complaint: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list(
        &self,
        filter: &GrievanceFilter,
        page: PaginationQuery,
    ) -> Result<Page<Grievance>> {
        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM grievances g {}", FILTER))
            .bind(filter.citizen_id)
            .bind(filter.escalated_officer_id)
            .bind(filter.status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count grievances: {:?}", e);
                AppError::Database(e)
            })?;

        let items = sqlx::query_as::<_, Grievance>(&format!(
            "{} {} ORDER BY g.created_at DESC OFFSET $4 LIMIT $5",
            GRIEVANCE_SELECT, FILTER
        ))
        .bind(filter.citizen_id)
        .bind(filter.escalated_officer_id)
        .bind(filter.status)
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list grievances: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(Page::new(items, total))
    }

    async fn respond(
        &self,
        id: Uuid,
        from: GrievanceStatus,
        to: GrievanceStatus,
        response: Option<&str>,
    ) -> Result<Option<Grievance>> {
        let updated: Option<Uuid> = sqlx::query_scalar(
            r#"
            UPDATE grievances
            SET status = $3,
                response = COALESCE($4::text, response),
                responded_at = CASE WHEN $4::text IS NULL THEN responded_at ELSE NOW() END,
                updated_at = NOW()
            WHERE id = $1 AND status = $2 AND is_active = TRUE
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .bind(response)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update grievance: {:?}", e);
            AppError::Database(e)
        })?;

        match updated {
            Some(id) => self.fetch(id).await,
            None => Ok(None),
        }
    }
}
