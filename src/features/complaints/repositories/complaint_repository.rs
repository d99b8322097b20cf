use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::contains_pattern;
use crate::core::error::{AppError, Result};
use crate::features::complaints::models::{
    Complaint, ComplaintDetails, ComplaintFilter, NewComplaint, StatusChange,
};
use crate::features::statuses::ComplaintStatus;
use crate::shared::types::{Page, PaginationQuery};

const COMPLAINT_SELECT: &str = r#"
    SELECT
        c.id, c.reference_number, c.citizen_id, ci.full_name AS citizen_name,
        c.department_id, d.name AS department_name,
        c.category_id, cat.name AS category_name,
        c.title, c.description, c.location, c.image_url,
        c.status_id AS status, a.officer_id AS assigned_officer_id,
        c.is_active, c.resolved_at, c.closed_at, c.created_at, c.updated_at
    FROM complaints c
    JOIN citizens ci ON ci.id = c.citizen_id
    JOIN departments d ON d.id = c.department_id
    JOIN categories cat ON cat.id = c.category_id
    LEFT JOIN complaint_assignments a ON a.complaint_id = c.id AND a.is_active = TRUE
"#;

const FILTER: &str = r#"
    WHERE c.is_active = TRUE
      AND ($1::uuid IS NULL OR c.citizen_id = $1)
      AND ($2::uuid IS NULL OR a.officer_id = $2)
      AND ($3::smallint IS NULL OR c.status_id = $3)
      AND ($4::uuid IS NULL OR c.department_id = $4)
      AND ($5::uuid IS NULL OR c.category_id = $5)
      AND ($6::text IS NULL
           OR c.reference_number ILIKE $6 ESCAPE '\'
           OR c.title ILIKE $6 ESCAPE '\'
           OR c.description ILIKE $6 ESCAPE '\')
"#;

#[async_trait]
pub trait ComplaintRepository: Send + Sync {
    /// Next value of the reference number sequence
    async fn next_reference_seq(&self) -> Result<i64>;
    async fn create(&self, complaint: &NewComplaint) -> Result<Complaint>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Complaint>>;
    /// Newest first
    async fn list(&self, filter: &ComplaintFilter, page: PaginationQuery)
        -> Result<Page<Complaint>>;
    /// Only applies while the complaint is still Pending
    async fn update_details(&self, id: Uuid, details: &ComplaintDetails)
        -> Result<Option<Complaint>>;
    /// Soft delete a Pending complaint and release its active assignment
    async fn withdraw(&self, id: Uuid) -> Result<bool>;
    /// Compare-and-set on the current status; `None` when it changed underneath
    async fn update_status(&self, id: Uuid, change: &StatusChange) -> Result<Option<Complaint>>;
}

pub struct PgComplaintRepository {
    pool: PgPool,
}

impl PgComplaintRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ComplaintRepository for PgComplaintRepository {
    async fn next_reference_seq(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT nextval('complaint_reference_seq')")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to draw complaint reference number: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn create(&self, complaint: &NewComplaint) -> Result<Complaint> {
        let details = &complaint.details;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO complaints (
                reference_number, citizen_id, department_id, category_id,
                title, description, location, image_url, status_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(&complaint.reference_number)
        .bind(complaint.citizen_id)
        .bind(details.department_id)
        .bind(details.category_id)
        .bind(&details.title)
        .bind(&details.description)
        .bind(&details.location)
        .bind(&details.image_url)
        .bind(ComplaintStatus::Pending)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "Complaint reference number already in use"))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Complaint {} vanished after insert", id)))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Complaint>> {
        sqlx::query_as::<_, Complaint>(&format!(
            "{} WHERE c.id = $1 AND c.is_active = TRUE",
            COMPLAINT_SELECT
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get complaint: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list(
        &self,
        filter: &ComplaintFilter,
        page: PaginationQuery,
    ) -> Result<Page<Complaint>> {
        let pattern = filter.search.as_deref().map(contains_pattern);

        let total: i64 = sqlx::query_scalar(&format!(
            r#"
            SELECT COUNT(*)
            FROM complaints c
            LEFT JOIN complaint_assignments a ON a.complaint_id = c.id AND a.is_active = TRUE
            {}
            "#,
            FILTER
        ))
        .bind(filter.citizen_id)
        .bind(filter.officer_id)
        .bind(filter.status)
        .bind(filter.department_id)
        .bind(filter.category_id)
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count complaints: {:?}", e);
            AppError::Database(e)
        })?;

        let items = sqlx::query_as::<_, Complaint>(&format!(
            "{} {} ORDER BY c.created_at DESC OFFSET $7 LIMIT $8",
            COMPLAINT_SELECT, FILTER
        ))
        .bind(filter.citizen_id)
        .bind(filter.officer_id)
        .bind(filter.status)
        .bind(filter.department_id)
        .bind(filter.category_id)
        .bind(&pattern)
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list complaints: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(Page::new(items, total))
    }

    async fn update_details(
        &self,
        id: Uuid,
        details: &ComplaintDetails,
    ) -> Result<Option<Complaint>> {
        let result = sqlx::query(
            r#"
            UPDATE complaints
            SET department_id = $2, category_id = $3, title = $4, description = $5,
                location = $6, image_url = $7, updated_at = NOW()
            WHERE id = $1 AND is_active = TRUE AND status_id = $8
            "#,
        )
        .bind(id)
        .bind(details.department_id)
        .bind(details.category_id)
        .bind(&details.title)
        .bind(&details.description)
        .bind(&details.location)
        .bind(&details.image_url)
        .bind(ComplaintStatus::Pending)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update complaint: {:?}", e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn withdraw(&self, id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE complaints
            SET is_active = FALSE, updated_at = NOW()
            WHERE id = $1 AND is_active = TRUE AND status_id = $2
            "#,
        )
        .bind(id)
        .bind(ComplaintStatus::Pending)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to withdraw complaint: {:?}", e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        let released = sqlx::query(
            r#"
            UPDATE complaint_assignments
            SET is_active = FALSE, updated_at = NOW()
            WHERE complaint_id = $1 AND is_active = TRUE
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to release assignments of withdrawn complaint: {:?}", e);
            AppError::Database(e)
        })?;

        tx.commit().await?;

        tracing::debug!(
            "Released {} assignments of withdrawn complaint {}",
            released.rows_affected(),
            id
        );
        Ok(true)
    }

    async fn update_status(&self, id: Uuid, change: &StatusChange) -> Result<Option<Complaint>> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE complaints
            SET status_id = $3,
                resolved_at = CASE WHEN $3 = 3 THEN NOW() ELSE resolved_at END,
                closed_at = CASE WHEN $3 = 4 THEN NOW() ELSE closed_at END,
                updated_at = NOW()
            WHERE id = $1 AND is_active = TRUE AND status_id = $2
            "#,
        )
        .bind(id)
        .bind(change.from)
        .bind(change.to)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        if change.remarks.is_some() || change.proof_url.is_some() {
            sqlx::query(
                r#"
                UPDATE complaint_assignments
                SET remarks = COALESCE($2, remarks),
                    proof_url = COALESCE($3, proof_url),
                    updated_at = NOW()
                WHERE complaint_id = $1 AND is_active = TRUE
                "#,
            )
            .bind(id)
            .bind(&change.remarks)
            .bind(&change.proof_url)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        self.find_by_id(id).await
    }
}
