use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct ComplaintAssignment {
    pub id: Uuid,
    pub complaint_id: Uuid,
    pub officer_id: Uuid,
    pub officer_name: String,
    /// Admin account that made the assignment
    pub assigned_by: Uuid,
    pub remarks: Option<String>,
    pub proof_url: Option<String>,
    pub is_active: bool,
    pub assigned_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub complaint_id: Uuid,
    pub officer_id: Uuid,
    pub assigned_by: Uuid,
    pub remarks: Option<String>,
}
