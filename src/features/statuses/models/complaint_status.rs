use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::core::error::{AppError, Result};

/// Complaint lifecycle, stored as the `complaint_statuses` lookup id
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[repr(i16)]
pub enum ComplaintStatus {
    Pending = 1,
    InProgress = 2,
    Resolved = 3,
    Closed = 4,
}

impl ComplaintStatus {
    pub const ALL: [ComplaintStatus; 4] = [
        ComplaintStatus::Pending,
        ComplaintStatus::InProgress,
        ComplaintStatus::Resolved,
        ComplaintStatus::Closed,
    ];

    pub fn id(self) -> i16 {
        self as i16
    }

    pub fn from_id(id: i16) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    pub fn name(self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "Pending",
            ComplaintStatus::InProgress => "InProgress",
            ComplaintStatus::Resolved => "Resolved",
            ComplaintStatus::Closed => "Closed",
        }
    }

    /// The only status this one may move to, if any
    pub fn next(self) -> Option<Self> {
        match self {
            ComplaintStatus::Pending => Some(ComplaintStatus::InProgress),
            ComplaintStatus::InProgress => Some(ComplaintStatus::Resolved),
            ComplaintStatus::Resolved => Some(ComplaintStatus::Closed),
            ComplaintStatus::Closed => None,
        }
    }

    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }

    /// Same status is a bad request; skipping or going backwards is a conflict
    pub fn check_transition(self, target: Self) -> Result<()> {
        if self == target {
            return Err(AppError::BadRequest(format!(
                "Complaint is already {}",
                self.name()
            )));
        }
        if !self.can_transition_to(target) {
            return Err(AppError::Conflict(format!(
                "Cannot move complaint from {} to {}",
                self.name(),
                target.name()
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Row of the `complaint_statuses` lookup table
#[derive(Debug, Clone, FromRow)]
pub struct StatusDefinition {
    pub id: i16,
    pub name: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions_only() {
        use ComplaintStatus::*;

        assert!(Pending.can_transition_to(InProgress));
        assert!(InProgress.can_transition_to(Resolved));
        assert!(Resolved.can_transition_to(Closed));

        assert!(!Pending.can_transition_to(Resolved));
        assert!(!Resolved.can_transition_to(InProgress));
        assert!(!Closed.can_transition_to(Pending));
    }

    #[test]
    fn test_check_transition_errors() {
        use ComplaintStatus::*;

        assert!(matches!(
            Pending.check_transition(Pending),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            Pending.check_transition(Closed),
            Err(AppError::Conflict(_))
        ));
        assert!(InProgress.check_transition(Resolved).is_ok());
    }

    #[test]
    fn test_ids_match_lookup_table() {
        assert_eq!(ComplaintStatus::Pending.id(), 1);
        assert_eq!(ComplaintStatus::Closed.id(), 4);
        assert_eq!(ComplaintStatus::from_id(3), Some(ComplaintStatus::Resolved));
        assert_eq!(ComplaintStatus::from_id(9), None);
    }
}
