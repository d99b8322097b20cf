use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::complaints::models::ComplaintAssignment;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AssignComplaintDto {
    pub officer_id: Uuid,

    #[validate(length(max = 2000, message = "Remarks must be at most 2000 characters"))]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignmentResponseDto {
    pub id: Uuid,
    pub complaint_id: Uuid,
    pub officer_id: Uuid,
    pub officer_name: String,
    pub assigned_by: Uuid,
    pub remarks: Option<String>,
    pub proof_url: Option<String>,
    pub is_active: bool,
    pub assigned_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ComplaintAssignment> for AssignmentResponseDto {
    fn from(a: ComplaintAssignment) -> Self {
        Self {
            id: a.id,
            complaint_id: a.complaint_id,
            officer_id: a.officer_id,
            officer_name: a.officer_name,
            assigned_by: a.assigned_by,
            remarks: a.remarks,
            proof_url: a.proof_url,
            is_active: a.is_active,
            assigned_at: a.assigned_at,
            updated_at: a.updated_at,
        }
    }
}
