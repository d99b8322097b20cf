use std::sync::Arc;

use crate::core::error::Result;
use crate::features::statuses::dtos::StatusResponseDto;
use crate::features::statuses::repositories::StatusRepository;

pub struct StatusService {
    statuses: Arc<dyn StatusRepository>,
}

impl StatusService {
    pub fn new(statuses: Arc<dyn StatusRepository>) -> Self {
        Self { statuses }
    }

    pub async fn list(&self) -> Result<Vec<StatusResponseDto>> {
        Ok(self
            .statuses
            .list()
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }
}
