use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::departments::DepartmentRepository;
use crate::features::notifications::NotificationService;
use crate::features::officers::dtos::{
    OfficerQueryParams, OfficerResponseDto, UpdateOfficerPlacementDto, UpdateOfficerProfileDto,
};
use crate::features::officers::models::{Officer, OfficerFilter, OfficerPlacementInput};
use crate::features::officers::repositories::OfficerRepository;
use crate::shared::types::{Page, PaginationQuery};

/// Service for officer profiles, approvals and placement
pub struct OfficerService {
    officers: Arc<dyn OfficerRepository>,
    departments: Arc<dyn DepartmentRepository>,
    notifications: Arc<NotificationService>,
}

impl OfficerService {
    pub fn new(
        officers: Arc<dyn OfficerRepository>,
        departments: Arc<dyn DepartmentRepository>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            officers,
            departments,
            notifications,
        }
    }

    pub async fn require_for_user(&self, user_id: Uuid) -> Result<Officer> {
        self.officers
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Officer profile not found".to_string()))
    }

    pub async fn get_me(&self, user_id: Uuid) -> Result<OfficerResponseDto> {
        self.require_for_user(user_id).await.map(Into::into)
    }

    pub async fn update_me(
        &self,
        user_id: Uuid,
        dto: UpdateOfficerProfileDto,
    ) -> Result<OfficerResponseDto> {
        let officer = self.require_for_user(user_id).await?;

        let updated = self
            .officers
            .update_profile(officer.id, &dto.into())
            .await?
            .ok_or_else(|| AppError::NotFound("Officer profile not found".to_string()))?;

        tracing::info!("Officer {} updated their profile", officer.id);
        Ok(updated.into())
    }

    pub async fn list(
        &self,
        params: OfficerQueryParams,
        page: PaginationQuery,
    ) -> Result<Page<OfficerResponseDto>> {
        Ok(self
            .officers
            .list(&params.into(), page)
            .await?
            .map(Into::into))
    }

    /// Officers registered but not yet approved
    pub async fn list_pending(&self, page: PaginationQuery) -> Result<Page<OfficerResponseDto>> {
        let filter = OfficerFilter {
            is_approved: Some(false),
            ..Default::default()
        };
        Ok(self.officers.list(&filter, page).await?.map(Into::into))
    }

    pub async fn get(&self, id: Uuid) -> Result<OfficerResponseDto> {
        self.require(id).await.map(Into::into)
    }

    pub async fn approve(&self, id: Uuid) -> Result<OfficerResponseDto> {
        let officer = self.require(id).await?;
        if officer.is_approved {
            return Err(AppError::Conflict(format!(
                "Officer {} is already approved",
                id
            )));
        }

        let officer = self
            .officers
            .approve(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Officer {} not found", id)))?;

        tracing::info!("Approved officer {} ({})", officer.full_name, officer.id);
        self.notifications
            .notify_officer(
                officer.id,
                "Your officer account has been approved. You can now sign in.",
            )
            .await;

        Ok(officer.into())
    }

    pub async fn update_placement(
        &self,
        id: Uuid,
        dto: UpdateOfficerPlacementDto,
    ) -> Result<OfficerResponseDto> {
        let input: OfficerPlacementInput = dto.into();
        if self
            .departments
            .find_by_id(input.department_id)
            .await?
            .is_none()
        {
            return Err(AppError::BadRequest(format!(
                "Department {} does not exist or is inactive",
                input.department_id
            )));
        }

        let officer = self
            .officers
            .update_placement(id, &input)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Officer {} not found", id)))?;

        tracing::info!(
            "Officer {} placed in department {} as {}",
            id,
            officer.department_id,
            officer.rank
        );
        Ok(officer.into())
    }

    /// Soft delete the officer; their complaints keep their status but lose the assignment
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.officers.deactivate(id).await? {
            return Err(AppError::NotFound(format!("Officer {} not found", id)));
        }

        tracing::info!("Deactivated officer {}", id);
        Ok(())
    }

    async fn require(&self, id: Uuid) -> Result<Officer> {
        self.officers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Officer {} not found", id)))
    }
}
