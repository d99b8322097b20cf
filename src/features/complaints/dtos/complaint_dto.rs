use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::complaints::models::{Complaint, ComplaintDetails, ComplaintFilter};
use crate::features::statuses::ComplaintStatus;

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Request DTO for filing or editing a complaint
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ComplaintRequestDto {
    pub department_id: Uuid,

    pub category_id: Uuid,

    #[validate(length(min = 5, max = 200, message = "Title must be 5-200 characters"))]
    pub title: String,

    #[validate(length(
        min = 10,
        max = 5000,
        message = "Description must be 10-5000 characters"
    ))]
    pub description: String,

    #[validate(length(max = 300, message = "Location must be at most 300 characters"))]
    pub location: Option<String>,

    /// URL returned by the file upload endpoint
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
}

impl From<ComplaintRequestDto> for ComplaintDetails {
    fn from(dto: ComplaintRequestDto) -> Self {
        Self {
            department_id: dto.department_id,
            category_id: dto.category_id,
            title: dto.title.trim().to_string(),
            description: dto.description.trim().to_string(),
            location: clean(dto.location),
            image_url: clean(dto.image_url),
        }
    }
}

/// Request DTO for an officer moving a complaint forward
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateComplaintStatusDto {
    /// InProgress or Resolved
    pub status: ComplaintStatus,

    #[validate(length(max = 2000, message = "Remarks must be at most 2000 characters"))]
    pub remarks: Option<String>,

    /// URL of an uploaded proof document
    #[validate(url(message = "Proof URL must be a valid URL"))]
    pub proof_url: Option<String>,
}

impl UpdateComplaintStatusDto {
    pub fn cleaned_remarks(&self) -> Option<String> {
        clean(self.remarks.clone())
    }

    pub fn cleaned_proof_url(&self) -> Option<String> {
        clean(self.proof_url.clone())
    }
}

/// Status filter for citizen and officer listings
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ComplaintStatusQuery {
    pub status: Option<ComplaintStatus>,
}

/// Filters for the admin complaint listing
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ComplaintQueryParams {
    pub status: Option<ComplaintStatus>,
    pub department_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    /// Matches reference number, title or description
    pub search: Option<String>,
}

impl From<ComplaintQueryParams> for ComplaintFilter {
    fn from(params: ComplaintQueryParams) -> Self {
        Self {
            status: params.status,
            department_id: params.department_id,
            category_id: params.category_id,
            search: clean(params.search),
            ..Default::default()
        }
    }
}

/// Response DTO for complaint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComplaintResponseDto {
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
    pub assigned_officer_id: Option<Uuid>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Complaint> for ComplaintResponseDto {
    fn from(c: Complaint) -> Self {
        Self {
            id: c.id,
            reference_number: c.reference_number,
            citizen_id: c.citizen_id,
            citizen_name: c.citizen_name,
            department_id: c.department_id,
            department_name: c.department_name,
            category_id: c.category_id,
            category_name: c.category_name,
            title: c.title,
            description: c.description,
            location: c.location,
            image_url: c.image_url,
            status: c.status,
            assigned_officer_id: c.assigned_officer_id,
            resolved_at: c.resolved_at,
            closed_at: c.closed_at,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
