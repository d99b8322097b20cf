//! Role-based authorization guards for the application.
//!
//! These guards extract the authenticated user and verify they have the required role.
//!
//! Roles are disjoint: an admin manages departments, categories, officer approvals and
//! complaint assignment; an officer works the complaints and grievances routed to them;
//! a citizen files complaints and grievances. No role inherits another's permissions.

use crate::core::error::AppError;
use crate::features::auth::model::{AuthenticatedUser, UserRole};
use axum::{extract::FromRequestParts, http::request::Parts};

fn require_role(parts: &Parts, role: UserRole, denied: &str) -> Result<AuthenticatedUser, AppError> {
    let user = parts
        .extensions
        .get::<AuthenticatedUser>()
        .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

    if user.role != role {
        return Err(AppError::Forbidden(denied.to_string()));
    }

    Ok(user.clone())
}

/// Guard for admin-only endpoints.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, UserRole::Admin, "Admin access required").map(RequireAdmin)
    }
}

/// Guard for officer endpoints (assigned complaints, escalated grievances).
pub struct RequireOfficer(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireOfficer
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, UserRole::Officer, "Officer access required").map(RequireOfficer)
    }
}

/// Guard for citizen endpoints (filing and tracking complaints).
pub struct RequireCitizen(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireCitizen
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, UserRole::Citizen, "Citizen access required").map(RequireCitizen)
    }
}
