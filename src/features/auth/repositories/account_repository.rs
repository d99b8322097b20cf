use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::{NewUser, User};
use crate::features::citizens::models::{Citizen, NewCitizen};
use crate::features::citizens::repositories::CITIZEN_SELECT;
use crate::features::officers::models::{NewOfficer, Officer};
use crate::features::officers::repositories::OFFICER_SELECT;

const DUPLICATE_EMAIL: &str = "Email is already registered";

const USER_COLUMNS: &str = "id, email, password_hash, role, is_active, created_at, updated_at";

/// Account rows plus the profile created alongside them at registration
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Case-insensitive lookup, inactive accounts included
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn admin_exists(&self) -> Result<bool>;
    async fn create_admin(&self, user: &NewUser) -> Result<User>;
    async fn create_citizen_account(
        &self,
        user: &NewUser,
        citizen: &NewCitizen,
    ) -> Result<(User, Citizen)>;
    async fn create_officer_account(
        &self,
        user: &NewUser,
        officer: &NewOfficer,
    ) -> Result<(User, Officer)>;
    async fn update_password_hash(&self, user_id: Uuid, password_hash: &str) -> Result<()>;
}

pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn insert_user<'e, E>(executor: E, user: &NewUser) -> Result<User>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (email, password_hash, role)
        VALUES ($1, $2, $3)
        RETURNING {}
        "#,
        USER_COLUMNS
    ))
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.role)
    .fetch_one(executor)
    .await
    .map_err(|e| AppError::from_write(e, DUPLICATE_EMAIL))
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE LOWER(email) = LOWER($1)",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get user by email: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get user: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn admin_exists(&self) -> Result<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM users WHERE role = 'admin' AND is_active = TRUE)",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check for admin account: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn create_admin(&self, user: &NewUser) -> Result<User> {
        insert_user(&self.pool, user).await
    }

    async fn create_citizen_account(
        &self,
        user: &NewUser,
        citizen: &NewCitizen,
    ) -> Result<(User, Citizen)> {
        let mut tx = self.pool.begin().await?;

        let created = insert_user(&mut *tx, user).await?;

        let citizen_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO citizens (user_id, full_name, phone, address)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(created.id)
        .bind(&citizen.full_name)
        .bind(&citizen.phone)
        .bind(&citizen.address)
        .fetch_one(&mut *tx)
        .await?;

        let profile = sqlx::query_as::<_, Citizen>(&format!(
            "{} WHERE c.id = $1",
            CITIZEN_SELECT
        ))
        .bind(citizen_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((created, profile))
    }

    async fn create_officer_account(
        &self,
        user: &NewUser,
        officer: &NewOfficer,
    ) -> Result<(User, Officer)> {
        let mut tx = self.pool.begin().await?;

        let created = insert_user(&mut *tx, user).await?;

        let officer_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO officers (user_id, department_id, full_name, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(created.id)
        .bind(officer.department_id)
        .bind(&officer.full_name)
        .bind(&officer.phone)
        .fetch_one(&mut *tx)
        .await?;

        let profile = sqlx::query_as::<_, Officer>(&format!(
            "{} WHERE o.id = $1",
            OFFICER_SELECT
        ))
        .bind(officer_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((created, profile))
    }

    async fn update_password_hash(&self, user_id: Uuid, password_hash: &str) -> Result<()> {
        sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update password hash: {:?}", e);
                AppError::Database(e)
            })?;
        Ok(())
    }
}
