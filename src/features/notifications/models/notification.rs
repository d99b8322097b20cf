use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub citizen_id: Option<Uuid>,
    pub officer_id: Option<Uuid>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// The single profile a notification is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    Citizen(Uuid),
    Officer(Uuid),
}

impl Recipient {
    /// `(citizen_id, officer_id)` column values for this recipient
    pub fn columns(self) -> (Option<Uuid>, Option<Uuid>) {
        match self {
            Recipient::Citizen(id) => (Some(id), None),
            Recipient::Officer(id) => (None, Some(id)),
        }
    }

    pub fn matches(self, notification: &Notification) -> bool {
        self.columns() == (notification.citizen_id, notification.officer_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipient_matches_only_its_column() {
        let id = Uuid::new_v4();
        let notification = Notification {
            id: Uuid::new_v4(),
            citizen_id: Some(id),
            officer_id: None,
            message: "Complaint received".to_string(),
            is_read: false,
            created_at: Utc::now(),
        };

        assert!(Recipient::Citizen(id).matches(&notification));
        assert!(!Recipient::Officer(id).matches(&notification));
        assert!(!Recipient::Citizen(Uuid::new_v4()).matches(&notification));
    }
}
