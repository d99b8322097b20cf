use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for category (joined with its department name)
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub department_id: Uuid,
    pub department_name: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating or updating a category
#[derive(Debug, Clone)]
pub struct CategoryInput {
    pub department_id: Uuid,
    pub name: String,
    pub description: Option<String>,
}
