use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::citizens::dtos::{CitizenResponseDto, UpdateCitizenProfileDto};
use crate::features::citizens::models::Citizen;
use crate::features::citizens::repositories::CitizenRepository;
use crate::shared::types::{Page, PaginationQuery};

/// Service for citizen profiles
pub struct CitizenService {
    citizens: Arc<dyn CitizenRepository>,
}

impl CitizenService {
    pub fn new(citizens: Arc<dyn CitizenRepository>) -> Self {
        Self { citizens }
    }

    /// Resolve the citizen profile behind an authenticated account
    pub async fn require_for_user(&self, user_id: Uuid) -> Result<Citizen> {
        self.citizens
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Citizen profile not found".to_string()))
    }

    pub async fn get_me(&self, user_id: Uuid) -> Result<CitizenResponseDto> {
        self.require_for_user(user_id).await.map(Into::into)
    }

    pub async fn update_me(
        &self,
        user_id: Uuid,
        dto: UpdateCitizenProfileDto,
    ) -> Result<CitizenResponseDto> {
        let citizen = self.require_for_user(user_id).await?;

        let updated = self
            .citizens
            .update_profile(citizen.id, &dto.into())
            .await?
            .ok_or_else(|| AppError::NotFound("Citizen profile not found".to_string()))?;

        tracing::info!("Citizen {} updated their profile", citizen.id);
        Ok(updated.into())
    }

    pub async fn list(
        &self,
        search: Option<String>,
        page: PaginationQuery,
    ) -> Result<Page<CitizenResponseDto>> {
        let search = search.filter(|s| !s.trim().is_empty());
        Ok(self
            .citizens
            .list(search.as_deref(), page)
            .await?
            .map(Into::into))
    }

    pub async fn get(&self, id: Uuid) -> Result<CitizenResponseDto> {
        self.citizens
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Citizen {} not found", id)))
    }

    /// Soft delete the citizen and disable their login
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.citizens.deactivate(id).await? {
            return Err(AppError::NotFound(format!("Citizen {} not found", id)));
        }

        tracing::info!("Deactivated citizen {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::in_memory::InMemoryStore;

    #[tokio::test]
    async fn test_update_me_changes_own_profile() {
        let store = InMemoryStore::new();
        let service = CitizenService::new(store.clone());
        let (user, citizen) = store.seed_citizen("Asha Rao");

        let updated = service
            .update_me(
                user.user_id,
                UpdateCitizenProfileDto {
                    full_name: " Asha R. Rao ".to_string(),
                    phone: Some("+919876543210".to_string()),
                    address: Some("   ".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, citizen.id);
        assert_eq!(updated.full_name, "Asha R. Rao");
        assert_eq!(updated.phone.as_deref(), Some("+919876543210"));
        assert!(updated.address.is_none());
    }

    #[tokio::test]
    async fn test_get_me_without_profile_is_not_found() {
        let store = InMemoryStore::new();
        let service = CitizenService::new(store.clone());

        let result = service.get_me(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_search_matches_name() {
        let store = InMemoryStore::new();
        let service = CitizenService::new(store.clone());
        store.seed_citizen("Asha Rao");
        store.seed_citizen("Vikram Singh");

        let page = service
            .list(Some("asha".to_string()), PaginationQuery::default())
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].full_name, "Asha Rao");

        let everyone = service
            .list(Some("  ".to_string()), PaginationQuery::default())
            .await
            .unwrap();
        assert_eq!(everyone.total, 2);
    }

    #[tokio::test]
    async fn test_delete_deactivates_account() {
        let store = InMemoryStore::new();
        let service = CitizenService::new(store.clone());
        let (user, citizen) = store.seed_citizen("Asha Rao");

        service.delete(citizen.id).await.unwrap();

        assert!(matches!(
            service.get(citizen.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(!store.user_row(user.user_id).unwrap().is_active);
    }
}
