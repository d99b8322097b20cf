use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, UserRole};
use crate::features::citizens::models::Citizen;
use crate::features::citizens::CitizenRepository;
use crate::features::complaints::{AssignmentRepository, ComplaintRepository};
use crate::features::grievances::dtos::{
    CreateGrievanceDto, GrievanceResponseDto, RespondGrievanceDto,
};
use crate::features::grievances::models::{
    Grievance, GrievanceFilter, GrievanceStatus, NewGrievance,
};
use crate::features::grievances::repositories::GrievanceRepository;
use crate::features::grievances::services::find_escalation_target;
use crate::features::notifications::NotificationService;
use crate::features::officers::models::Officer;
use crate::features::officers::OfficerRepository;
use crate::features::statuses::ComplaintStatus;
use crate::shared::types::{Page, PaginationQuery};

/// Grievances filed against the handling of a complaint, reviewed by a
/// higher-ranked officer
pub struct GrievanceService {
    grievances: Arc<dyn GrievanceRepository>,
    complaints: Arc<dyn ComplaintRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    citizens: Arc<dyn CitizenRepository>,
    officers: Arc<dyn OfficerRepository>,
    notifications: Arc<NotificationService>,
}

impl GrievanceService {
    pub fn new(
        grievances: Arc<dyn GrievanceRepository>,
        complaints: Arc<dyn ComplaintRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        citizens: Arc<dyn CitizenRepository>,
        officers: Arc<dyn OfficerRepository>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            grievances,
            complaints,
            assignments,
            citizens,
            officers,
            notifications,
        }
    }

    pub async fn file(
        &self,
        user: &AuthenticatedUser,
        dto: CreateGrievanceDto,
    ) -> Result<GrievanceResponseDto> {
        let citizen = self.citizen_for(user).await?;
        let complaint = self
            .complaints
            .find_by_id(dto.complaint_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Complaint {} not found", dto.complaint_id))
            })?;

        if complaint.citizen_id != citizen.id {
            return Err(AppError::Forbidden(
                "You can only file grievances for your own complaints".to_string(),
            ));
        }

        if !matches!(
            complaint.status,
            ComplaintStatus::Resolved | ComplaintStatus::Closed
        ) {
            return Err(AppError::Conflict(format!(
                "Grievances can only be filed once a complaint is resolved; this one is {}",
                complaint.status
            )));
        }

        if self
            .grievances
            .find_by_complaint(complaint.id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "A grievance has already been filed for this complaint".to_string(),
            ));
        }

        let assignment = self
            .assignments
            .find_latest(complaint.id)
            .await?
            .ok_or_else(|| {
                AppError::Conflict("This complaint was never assigned to an officer".to_string())
            })?;

        let original = self
            .officers
            .find_by_id(assignment.officer_id)
            .await?
            .ok_or_else(|| {
                AppError::Conflict(
                    "The officer who handled this complaint is no longer active".to_string(),
                )
            })?;

        let target =
            find_escalation_target(self.officers.as_ref(), &original, complaint.department_id)
                .await?;

        let grievance = self
            .grievances
            .create(&NewGrievance {
                complaint_id: complaint.id,
                citizen_id: citizen.id,
                original_officer_id: original.id,
                escalated_officer_id: target.id,
                reason: dto.reason.trim().to_string(),
            })
            .await?;

        tracing::info!(
            "Grievance {} on complaint {} escalated from officer {} to officer {}",
            grievance.id,
            complaint.reference_number,
            original.id,
            target.id
        );
        self.notifications
            .notify_officer(
                target.id,
                format!(
                    "A grievance on complaint {} has been escalated to you.",
                    complaint.reference_number
                ),
            )
            .await;

        Ok(grievance.into())
    }

    pub async fn list_mine(
        &self,
        user: &AuthenticatedUser,
        status: Option<GrievanceStatus>,
        page: PaginationQuery,
    ) -> Result<Page<GrievanceResponseDto>> {
        let citizen = self.citizen_for(user).await?;
        let filter = GrievanceFilter {
            citizen_id: Some(citizen.id),
            status,
            ..Default::default()
        };
        Ok(self.grievances.list(&filter, page).await?.map(Into::into))
    }

    /// Visible to the filing citizen, both officers involved, and admins
    pub async fn get(&self, user: &AuthenticatedUser, id: Uuid) -> Result<GrievanceResponseDto> {
        let grievance = self.require(id).await?;

        let allowed = match user.role {
            UserRole::Admin => true,
            UserRole::Citizen => self.citizen_for(user).await?.id == grievance.citizen_id,
            UserRole::Officer => {
                let officer = self.officer_for(user).await?;
                officer.id == grievance.original_officer_id
                    || officer.id == grievance.escalated_officer_id
            }
        };

        if !allowed {
            return Err(AppError::Forbidden(
                "You do not have access to this grievance".to_string(),
            ));
        }

        Ok(grievance.into())
    }

    pub async fn list_escalated(
        &self,
        user: &AuthenticatedUser,
        status: Option<GrievanceStatus>,
        page: PaginationQuery,
    ) -> Result<Page<GrievanceResponseDto>> {
        let officer = self.officer_for(user).await?;
        let filter = GrievanceFilter {
            escalated_officer_id: Some(officer.id),
            status,
            ..Default::default()
        };
        Ok(self.grievances.list(&filter, page).await?.map(Into::into))
    }

    pub async fn respond(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        dto: RespondGrievanceDto,
    ) -> Result<GrievanceResponseDto> {
        let officer = self.officer_for(user).await?;
        let grievance = self.require(id).await?;

        if grievance.escalated_officer_id != officer.id {
            return Err(AppError::Forbidden(
                "Only the officer this grievance was escalated to can review it".to_string(),
            ));
        }

        if !grievance.status.can_transition_to(dto.status) {
            return Err(AppError::Conflict(format!(
                "Cannot move a grievance from {} to {}",
                grievance.status, dto.status
            )));
        }

        let response = dto.cleaned_response();
        if dto.status.is_final() && response.is_none() {
            return Err(AppError::BadRequest(
                "A response is required to resolve or reject a grievance".to_string(),
            ));
        }

        let updated = self
            .grievances
            .respond(id, grievance.status, dto.status, response.as_deref())
            .await?
            .ok_or_else(|| {
                AppError::Conflict("Grievance was updated concurrently; reload and retry".into())
            })?;

        tracing::info!(
            "Officer {} moved grievance {} from {} to {}",
            officer.id,
            id,
            grievance.status,
            updated.status
        );
        self.notifications
            .notify_citizen(
                updated.citizen_id,
                format!(
                    "Your grievance on complaint {} is now {}.",
                    updated.reference_number, updated.status
                ),
            )
            .await;

        Ok(updated.into())
    }

    pub async fn list_all(
        &self,
        status: Option<GrievanceStatus>,
        page: PaginationQuery,
    ) -> Result<Page<GrievanceResponseDto>> {
        let filter = GrievanceFilter {
            status,
            ..Default::default()
        };
        Ok(self.grievances.list(&filter, page).await?.map(Into::into))
    }

    async fn require(&self, id: Uuid) -> Result<Grievance> {
        self.grievances
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Grievance {} not found", id)))
    }

    async fn citizen_for(&self, user: &AuthenticatedUser) -> Result<Citizen> {
        self.citizens
            .find_by_user_id(user.user_id)
            .await?
            .ok_or_else(|| AppError::Forbidden("Citizen profile not found".to_string()))
    }

    async fn officer_for(&self, user: &AuthenticatedUser) -> Result<Officer> {
        self.officers
            .find_by_user_id(user.user_id)
            .await?
            .ok_or_else(|| AppError::Forbidden("Officer profile not found".to_string()))
    }
}
