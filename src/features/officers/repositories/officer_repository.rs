use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::officers::models::{
    Officer, OfficerFilter, OfficerPlacementInput, OfficerProfileInput, OfficerRank,
};
use crate::shared::types::{Page, PaginationQuery};

pub(crate) const OFFICER_SELECT: &str = r#"
    SELECT
        o.id, o.user_id, u.email, o.department_id, d.name AS department_name,
        o.full_name, o.phone, o.rank, o.is_approved, o.is_active,
        o.created_at, o.updated_at
    FROM officers o
    JOIN users u ON u.id = o.user_id
    JOIN departments d ON d.id = o.department_id
"#;

const FILTER: &str = r#"
    WHERE o.is_active = TRUE
      AND ($1::uuid IS NULL OR o.department_id = $1)
      AND ($2::officer_rank IS NULL OR o.rank = $2)
      AND ($3::boolean IS NULL OR o.is_approved = $3)
"#;

#[async_trait]
pub trait OfficerRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Officer>>;
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Officer>>;
    async fn list(&self, filter: &OfficerFilter, page: PaginationQuery) -> Result<Page<Officer>>;
    async fn approve(&self, id: Uuid) -> Result<Option<Officer>>;
    async fn update_profile(
        &self,
        id: Uuid,
        input: &OfficerProfileInput,
    ) -> Result<Option<Officer>>;
    async fn update_placement(
        &self,
        id: Uuid,
        input: &OfficerPlacementInput,
    ) -> Result<Option<Officer>>;
    /// Deactivate officer and account, releasing the officer's active assignments
    async fn deactivate(&self, id: Uuid) -> Result<bool>;
    /// Active, approved officer of `rank` with the fewest open grievances,
    /// preferring `preferred_department`
    async fn find_escalation_candidate(
        &self,
        rank: OfficerRank,
        preferred_department: Uuid,
    ) -> Result<Option<Officer>>;
}

pub struct PgOfficerRepository {
    pool: PgPool,
}

impl PgOfficerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OfficerRepository for PgOfficerRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Officer>> {
        sqlx::query_as::<_, Officer>(&format!(
            "{} WHERE o.id = $1 AND o.is_active = TRUE",
            OFFICER_SELECT
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get officer: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Officer>> {
        sqlx::query_as::<_, Officer>(&format!(
            "{} WHERE o.user_id = $1 AND o.is_active = TRUE",
            OFFICER_SELECT
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get officer by user: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list(&self, filter: &OfficerFilter, page: PaginationQuery) -> Result<Page<Officer>> {
        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM officers o {}",
            FILTER
        ))
        .bind(filter.department_id)
        .bind(filter.rank)
        .bind(filter.is_approved)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count officers: {:?}", e);
            AppError::Database(e)
        })?;

        let items = sqlx::query_as::<_, Officer>(&format!(
            "{} {} ORDER BY o.created_at DESC OFFSET $4 LIMIT $5",
            OFFICER_SELECT, FILTER
        ))
        .bind(filter.department_id)
        .bind(filter.rank)
        .bind(filter.is_approved)
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list officers: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(Page::new(items, total))
    }

    async fn approve(&self, id: Uuid) -> Result<Option<Officer>> {
        let result = sqlx::query(
            r#"
            UPDATE officers
            SET is_approved = TRUE, updated_at = NOW()
            WHERE id = $1 AND is_active = TRUE
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to approve officer: {:?}", e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn update_profile(
        &self,
        id: Uuid,
        input: &OfficerProfileInput,
    ) -> Result<Option<Officer>> {
        let result = sqlx::query(
            r#"
            UPDATE officers
            SET full_name = $2, phone = $3, updated_at = NOW()
            WHERE id = $1 AND is_active = TRUE
            "#,
        )
        .bind(id)
        .bind(&input.full_name)
        .bind(&input.phone)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update officer: {:?}", e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn update_placement(
        &self,
        id: Uuid,
        input: &OfficerPlacementInput,
    ) -> Result<Option<Officer>> {
        let result = sqlx::query(
            r#"
            UPDATE officers
            SET department_id = $2, rank = $3, updated_at = NOW()
            WHERE id = $1 AND is_active = TRUE
            "#,
        )
        .bind(id)
        .bind(input.department_id)
        .bind(input.rank)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update officer placement: {:?}", e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let user_id: Option<Uuid> = sqlx::query_scalar(
            r#"
            UPDATE officers
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

        let released = sqlx::query(
            r#"
            UPDATE complaint_assignments
            SET is_active = FALSE, updated_at = NOW()
            WHERE officer_id = $1 AND is_active = TRUE
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            "Released {} assignments of officer {}",
            released.rows_affected(),
            id
        );
        Ok(true)
    }

    async fn find_escalation_candidate(
        &self,
        rank: OfficerRank,
        preferred_department: Uuid,
    ) -> Result<Option<Officer>> {
        sqlx::query_as::<_, Officer>(&format!(
            r#"{}
            WHERE o.is_active = TRUE AND o.is_approved = TRUE AND o.rank = $1
            ORDER BY
                (o.department_id = $2) DESC,
                (
                    SELECT COUNT(*) FROM grievances g
                    WHERE g.escalated_officer_id = o.id
                      AND g.is_active = TRUE
                      AND g.status IN ('open', 'in_review')
                ) ASC,
                o.created_at ASC
            LIMIT 1
            "#,
            OFFICER_SELECT
        ))
        .bind(rank)
        .bind(preferred_department)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to find escalation officer: {:?}", e);
            AppError::Database(e)
        })
    }
}
