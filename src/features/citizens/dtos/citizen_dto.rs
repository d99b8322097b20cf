use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::citizens::models::{Citizen, CitizenProfileInput};
use crate::shared::validation::{PERSON_NAME_REGEX, PHONE_REGEX};

/// Request DTO for a citizen updating their own profile
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCitizenProfileDto {
    #[validate(
        length(min = 2, max = 120, message = "Full name must be 2-120 characters"),
        regex(path = *PERSON_NAME_REGEX, message = "Full name contains invalid characters")
    )]
    pub full_name: String,

    #[validate(regex(path = *PHONE_REGEX, message = "Invalid phone number"))]
    pub phone: Option<String>,

    #[validate(length(max = 500, message = "Address must be at most 500 characters"))]
    pub address: Option<String>,
}

impl From<UpdateCitizenProfileDto> for CitizenProfileInput {
    fn from(dto: UpdateCitizenProfileDto) -> Self {
        Self {
            full_name: dto.full_name.trim().to_string(),
            phone: dto.phone.map(|p| p.trim().to_string()),
            address: dto
                .address
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty()),
        }
    }
}

/// Query params for the admin citizen listing
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct CitizenQueryParams {
    /// Case-insensitive match on name or email
    pub search: Option<String>,
}

/// Response DTO for citizen
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CitizenResponseDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Citizen> for CitizenResponseDto {
    fn from(c: Citizen) -> Self {
        Self {
            id: c.id,
            user_id: c.user_id,
            email: c.email,
            full_name: c.full_name,
            phone: c.phone,
            address: c.address,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
