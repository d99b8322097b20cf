use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Citizen profile joined with the account email
#[derive(Debug, Clone, FromRow)]
pub struct Citizen {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile fields captured at registration
#[derive(Debug, Clone)]
pub struct NewCitizen {
    pub full_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CitizenProfileInput {
    pub full_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}
