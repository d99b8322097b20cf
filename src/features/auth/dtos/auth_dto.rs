use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::auth::model::UserRole;
use crate::shared::validation::{PERSON_NAME_REGEX, PHONE_REGEX};

/// Request DTO for citizen self-registration
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterCitizenRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

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

/// Request DTO for officer registration (requires admin approval before login)
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterOfficerRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    #[validate(
        length(min = 2, max = 120, message = "Full name must be 2-120 characters"),
        regex(path = *PERSON_NAME_REGEX, message = "Full name contains invalid characters")
    )]
    pub full_name: String,

    #[validate(regex(path = *PHONE_REGEX, message = "Invalid phone number"))]
    pub phone: Option<String>,

    pub department_id: Uuid,
}

/// Request DTO for user login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequestDto {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub new_password: String,
}

/// Response DTO for authentication (register/login)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponseDto {
    /// HS256 access token
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token expiry time in seconds
    pub expires_in: i64,
    pub user: AuthUserDto,
}

/// Account summary with the id of its citizen or officer profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthUserDto {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    /// Citizen or officer id; absent for admins
    pub profile_id: Option<Uuid>,
    pub full_name: Option<String>,
}
