use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::dashboard::models::{DepartmentCount, StatusCount};
use crate::features::statuses::ComplaintStatus;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusCountDto {
    pub status: ComplaintStatus,
    pub count: i64,
}

impl StatusCountDto {
    /// One entry per status in lifecycle order, zero-filled
    pub fn complete(counts: &[StatusCount]) -> Vec<Self> {
        ComplaintStatus::ALL
            .into_iter()
            .map(|status| StatusCountDto {
                status,
                count: counts
                    .iter()
                    .filter(|c| c.status == status)
                    .map(|c| c.count)
                    .sum(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DepartmentCountDto {
    pub department_id: Uuid,
    pub department_name: String,
    pub count: i64,
}

impl From<DepartmentCount> for DepartmentCountDto {
    fn from(d: DepartmentCount) -> Self {
        Self {
            department_id: d.department_id,
            department_name: d.department_name,
            count: d.count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminDashboardDto {
    pub total_complaints: i64,
    pub by_status: Vec<StatusCountDto>,
    pub by_department: Vec<DepartmentCountDto>,
    pub pending_officer_approvals: i64,
    pub open_grievances: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OfficerDashboardDto {
    pub active_assignments: i64,
    pub by_status: Vec<StatusCountDto>,
    /// Grievances escalated to the officer that are open or in review
    pub open_grievances: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CitizenDashboardDto {
    pub total_complaints: i64,
    pub by_status: Vec<StatusCountDto>,
    pub grievances: i64,
    pub unread_notifications: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_fills_missing_statuses() {
        let counts = vec![
            StatusCount {
                status: ComplaintStatus::Resolved,
                count: 3,
            },
            StatusCount {
                status: ComplaintStatus::Pending,
                count: 2,
            },
        ];

        let dto = StatusCountDto::complete(&counts);
        let pairs: Vec<_> = dto.iter().map(|d| (d.status, d.count)).collect();
        assert_eq!(
            pairs,
            vec![
                (ComplaintStatus::Pending, 2),
                (ComplaintStatus::InProgress, 0),
                (ComplaintStatus::Resolved, 3),
                (ComplaintStatus::Closed, 0),
            ]
        );
    }
}
