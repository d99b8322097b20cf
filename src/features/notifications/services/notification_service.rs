use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, UserRole};
use crate::features::citizens::CitizenRepository;
use crate::features::notifications::dtos::NotificationResponseDto;
use crate::features::notifications::models::Recipient;
use crate::features::notifications::repositories::NotificationRepository;
use crate::features::officers::OfficerRepository;
use crate::shared::types::{Page, PaginationQuery};

/// In-app notifications for citizens and officers.
///
/// Other services call [`NotificationService::notify_citizen`] and
/// [`NotificationService::notify_officer`] after their own write has committed.
/// Delivery failures are logged and swallowed so they never undo that write.
pub struct NotificationService {
    notifications: Arc<dyn NotificationRepository>,
    citizens: Arc<dyn CitizenRepository>,
    officers: Arc<dyn OfficerRepository>,
}

impl NotificationService {
    pub fn new(
        notifications: Arc<dyn NotificationRepository>,
        citizens: Arc<dyn CitizenRepository>,
        officers: Arc<dyn OfficerRepository>,
    ) -> Self {
        Self {
            notifications,
            citizens,
            officers,
        }
    }

    pub async fn notify_citizen(&self, citizen_id: Uuid, message: impl AsRef<str>) {
        self.deliver(Recipient::Citizen(citizen_id), message.as_ref())
            .await
    }

    pub async fn notify_officer(&self, officer_id: Uuid, message: impl AsRef<str>) {
        self.deliver(Recipient::Officer(officer_id), message.as_ref())
            .await
    }

    async fn deliver(&self, recipient: Recipient, message: &str) {
        match self.notifications.create(recipient, message).await {
            Ok(notification) => {
                tracing::debug!("Notification {} sent to {:?}", notification.id, recipient)
            }
            Err(e) => tracing::warn!("Failed to notify {:?}: {}", recipient, e),
        }
    }

    pub async fn list(
        &self,
        user: &AuthenticatedUser,
        unread_only: bool,
        page: PaginationQuery,
    ) -> Result<Page<NotificationResponseDto>> {
        let recipient = self.recipient_for(user).await?;
        Ok(self
            .notifications
            .list(recipient, unread_only, page)
            .await?
            .map(Into::into))
    }

    pub async fn unread_count(&self, user: &AuthenticatedUser) -> Result<i64> {
        let recipient = self.recipient_for(user).await?;
        self.notifications.count_unread(recipient).await
    }

    pub async fn mark_read(&self, user: &AuthenticatedUser, id: Uuid) -> Result<()> {
        let recipient = self.recipient_for(user).await?;
        if !self.notifications.mark_read(id, recipient).await? {
            return Err(AppError::NotFound(format!("Notification {} not found", id)));
        }
        Ok(())
    }

    pub async fn mark_all_read(&self, user: &AuthenticatedUser) -> Result<u64> {
        let recipient = self.recipient_for(user).await?;
        self.notifications.mark_all_read(recipient).await
    }

    async fn recipient_for(&self, user: &AuthenticatedUser) -> Result<Recipient> {
        match user.role {
            UserRole::Citizen => self
                .citizens
                .find_by_user_id(user.user_id)
                .await?
                .map(|c| Recipient::Citizen(c.id))
                .ok_or_else(|| AppError::NotFound("Citizen profile not found".to_string())),
            UserRole::Officer => self
                .officers
                .find_by_user_id(user.user_id)
                .await?
                .map(|o| Recipient::Officer(o.id))
                .ok_or_else(|| AppError::NotFound("Officer profile not found".to_string())),
            UserRole::Admin => Err(AppError::Forbidden(
                "Notifications are only available to citizens and officers".to_string(),
            )),
        }
    }
}
