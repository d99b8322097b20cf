use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::statuses::models::{ComplaintStatus, StatusDefinition};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponseDto {
    pub id: i16,
    pub name: String,
    pub description: String,
    /// Status a complaint may move to from this one
    pub next: Option<ComplaintStatus>,
}

impl From<StatusDefinition> for StatusResponseDto {
    fn from(s: StatusDefinition) -> Self {
        Self {
            next: ComplaintStatus::from_id(s.id).and_then(ComplaintStatus::next),
            id: s.id,
            name: s.name,
            description: s.description,
        }
    }
}
