use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::OfficerRank;

/// Officer profile joined with account email and department name
#[derive(Debug, Clone, FromRow)]
pub struct Officer {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub department_id: Uuid,
    pub department_name: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub rank: OfficerRank,
    pub is_approved: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Officer {
    /// Active and approved by an admin
    pub fn is_assignable(&self) -> bool {
        self.is_active && self.is_approved
    }
}

/// Profile fields captured at registration; rank starts at FieldOfficer
#[derive(Debug, Clone)]
pub struct NewOfficer {
    pub department_id: Uuid,
    pub full_name: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OfficerProfileInput {
    pub full_name: String,
    pub phone: Option<String>,
}

/// Admin-managed placement of an officer
#[derive(Debug, Clone)]
pub struct OfficerPlacementInput {
    pub department_id: Uuid,
    pub rank: OfficerRank,
}

#[derive(Debug, Clone, Default)]
pub struct OfficerFilter {
    pub department_id: Option<Uuid>,
    pub rank: Option<OfficerRank>,
    pub is_approved: Option<bool>,
}
