use sqlx::FromRow;
use uuid::Uuid;

use crate::features::statuses::ComplaintStatus;

/// Whose complaints and grievances a count covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardScope {
    All,
    /// Complaints and grievances filed by this citizen
    Citizen(Uuid),
    /// Complaints actively assigned to, and grievances escalated to, this officer
    Officer(Uuid),
}

impl DashboardScope {
    pub fn citizen_id(self) -> Option<Uuid> {
        match self {
            DashboardScope::Citizen(id) => Some(id),
            _ => None,
        }
    }

    pub fn officer_id(self) -> Option<Uuid> {
        match self {
            DashboardScope::Officer(id) => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct StatusCount {
    pub status: ComplaintStatus,
    pub count: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct DepartmentCount {
    pub department_id: Uuid,
    pub department_name: String,
    pub count: i64,
}
