use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::grievances::models::{Grievance, GrievanceStatus};

/// Request DTO for a citizen disputing the handling of a complaint
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGrievanceDto {
    pub complaint_id: Uuid,

    #[validate(length(min = 10, max = 2000, message = "Reason must be 10-2000 characters"))]
    pub reason: String,
}

/// Request DTO for the escalated officer reviewing a grievance
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RespondGrievanceDto {
    pub status: GrievanceStatus,

    /// Required when resolving or rejecting
    #[validate(length(max = 2000, message = "Response must be at most 2000 characters"))]
    pub response: Option<String>,
}

impl RespondGrievanceDto {
    pub fn cleaned_response(&self) -> Option<String> {
        self.response
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct GrievanceQueryParams {
    pub status: Option<GrievanceStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GrievanceResponseDto {
    pub id: Uuid,
    pub complaint_id: Uuid,
    pub reference_number: String,
    pub citizen_id: Uuid,
    pub original_officer_id: Uuid,
    pub original_officer_name: String,
    pub escalated_officer_id: Uuid,
    pub escalated_officer_name: String,
    pub reason: String,
    pub status: GrievanceStatus,
    pub response: Option<String>,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Grievance> for GrievanceResponseDto {
    fn from(g: Grievance) -> Self {
        Self {
            id: g.id,
            complaint_id: g.complaint_id,
            reference_number: g.reference_number,
            citizen_id: g.citizen_id,
            original_officer_id: g.original_officer_id,
            original_officer_name: g.original_officer_name,
            escalated_officer_id: g.escalated_officer_id,
            escalated_officer_name: g.escalated_officer_name,
            reason: g.reason,
            status: g.status,
            response: g.response,
            responded_at: g.responded_at,
            created_at: g.created_at,
            updated_at: g.updated_at,
        }
    }
}
