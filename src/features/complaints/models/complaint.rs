use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::statuses::ComplaintStatus;

/// Complaint joined with its citizen, department, category and current officer
#[derive(Debug, Clone, FromRow)]
pub struct Complaint {
    pub id: Uuid,
    pub reference_number: String,
    pub citizen_id: Uuid,
    pub citizen_name: String,
    pub department_id: Uuid,
    pub department_name: String,
    pub category_id: Uuid,
    pub category_name: String,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub status: ComplaintStatus,
    /// Officer on the active assignment, if any
    pub assigned_officer_id: Option<Uuid>,
    pub is_active: bool,
    pub resolved_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Citizen-editable fields
#[derive(Debug, Clone)]
pub struct ComplaintDetails {
    pub department_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewComplaint {
    pub reference_number: String,
    pub citizen_id: Uuid,
    pub details: ComplaintDetails,
}

#[derive(Debug, Clone, Default)]
pub struct ComplaintFilter {
    pub citizen_id: Option<Uuid>,
    /// Only complaints actively assigned to this officer
    pub officer_id: Option<Uuid>,
    pub status: Option<ComplaintStatus>,
    pub department_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    /// Case-insensitive match on reference number, title or description
    pub search: Option<String>,
}

/// Status move plus optional notes recorded on the active assignment
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub from: ComplaintStatus,
    pub to: ComplaintStatus,
    pub remarks: Option<String>,
    pub proof_url: Option<String>,
}
