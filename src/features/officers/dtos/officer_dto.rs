use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::officers::models::{
    Officer, OfficerFilter, OfficerPlacementInput, OfficerProfileInput, OfficerRank,
};
use crate::shared::validation::{PERSON_NAME_REGEX, PHONE_REGEX};

/// Request DTO for an officer updating their own contact details
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateOfficerProfileDto {
    #[validate(
        length(min = 2, max = 120, message = "Full name must be 2-120 characters"),
        regex(path = *PERSON_NAME_REGEX, message = "Full name contains invalid characters")
    )]
    pub full_name: String,

    #[validate(regex(path = *PHONE_REGEX, message = "Invalid phone number"))]
    pub phone: Option<String>,
}

impl From<UpdateOfficerProfileDto> for OfficerProfileInput {
    fn from(dto: UpdateOfficerProfileDto) -> Self {
        Self {
            full_name: dto.full_name.trim().to_string(),
            phone: dto.phone.map(|p| p.trim().to_string()),
        }
    }
}

/// Request DTO for an admin moving an officer between departments or ranks
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateOfficerPlacementDto {
    pub department_id: Uuid,
    pub rank: OfficerRank,
}

impl From<UpdateOfficerPlacementDto> for OfficerPlacementInput {
    fn from(dto: UpdateOfficerPlacementDto) -> Self {
        Self {
            department_id: dto.department_id,
            rank: dto.rank,
        }
    }
}

/// Query params for the admin officer listing
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct OfficerQueryParams {
    pub department_id: Option<Uuid>,
    pub rank: Option<OfficerRank>,
    /// `false` lists officers still waiting for approval
    pub is_approved: Option<bool>,
}

impl From<OfficerQueryParams> for OfficerFilter {
    fn from(params: OfficerQueryParams) -> Self {
        Self {
            department_id: params.department_id,
            rank: params.rank,
            is_approved: params.is_approved,
        }
    }
}

/// Response DTO for officer
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OfficerResponseDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub department_id: Uuid,
    pub department_name: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub rank: OfficerRank,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Officer> for OfficerResponseDto {
    fn from(o: Officer) -> Self {
        Self {
            id: o.id,
            user_id: o.user_id,
            email: o.email,
            department_id: o.department_id,
            department_name: o.department_name,
            full_name: o.full_name,
            phone: o.phone,
            rank: o.rank,
            is_approved: o.is_approved,
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}
