use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Grievance review state matching the `grievance_status` database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "grievance_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GrievanceStatus {
    Open,
    InReview,
    Resolved,
    Rejected,
}

impl GrievanceStatus {
    /// Open moves to InReview, InReview ends as Resolved or Rejected
    pub fn can_transition_to(self, next: GrievanceStatus) -> bool {
        matches!(
            (self, next),
            (GrievanceStatus::Open, GrievanceStatus::InReview)
                | (GrievanceStatus::InReview, GrievanceStatus::Resolved)
                | (GrievanceStatus::InReview, GrievanceStatus::Rejected)
        )
    }

    pub fn is_open(self) -> bool {
        matches!(self, GrievanceStatus::Open | GrievanceStatus::InReview)
    }

    pub fn is_final(self) -> bool {
        !self.is_open()
    }
}

impl std::fmt::Display for GrievanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            GrievanceStatus::Open => "open",
            GrievanceStatus::InReview => "in review",
            GrievanceStatus::Resolved => "resolved",
            GrievanceStatus::Rejected => "rejected",
        };
        f.write_str(label)
    }
}

/// Grievance joined with its complaint reference and the officers involved
#[derive(Debug, Clone, FromRow)]
pub struct Grievance {
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
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewGrievance {
    pub complaint_id: Uuid,
    pub citizen_id: Uuid,
    pub original_officer_id: Uuid,
    pub escalated_officer_id: Uuid,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct GrievanceFilter {
    pub citizen_id: Option<Uuid>,
    pub escalated_officer_id: Option<Uuid>,
    pub status: Option<GrievanceStatus>,
}
