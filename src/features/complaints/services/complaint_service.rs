use chrono::{Datelike, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, UserRole};
use crate::features::categories::CategoryRepository;
use crate::features::citizens::models::Citizen;
use crate::features::citizens::CitizenRepository;
use crate::features::complaints::dtos::{
    AssignComplaintDto, AssignmentResponseDto, ComplaintQueryParams, ComplaintRequestDto,
    ComplaintResponseDto, UpdateComplaintStatusDto,
};
use crate::features::complaints::models::{
    Complaint, ComplaintDetails, ComplaintFilter, NewAssignment, NewComplaint, StatusChange,
};
use crate::features::complaints::repositories::{AssignmentRepository, ComplaintRepository};
use crate::features::files::models::FilePurpose;
use crate::features::files::FileRepository;
use crate::features::notifications::NotificationService;
use crate::features::officers::models::Officer;
use crate::features::officers::OfficerRepository;
use crate::features::statuses::ComplaintStatus;
use crate::shared::constants::COMPLAINT_REFERENCE_PREFIX;
use crate::shared::types::{Page, PaginationQuery};

/// `CMP-2025-0000042`
pub fn format_reference_number(year: i32, seq: i64) -> String {
    format!("{}-{}-{:07}", COMPLAINT_REFERENCE_PREFIX, year, seq)
}

/// Complaint lifecycle: filing, assignment and status changes
pub struct ComplaintService {
    complaints: Arc<dyn ComplaintRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    categories: Arc<dyn CategoryRepository>,
    citizens: Arc<dyn CitizenRepository>,
    officers: Arc<dyn OfficerRepository>,
    files: Arc<dyn FileRepository>,
    notifications: Arc<NotificationService>,
}

impl ComplaintService {
    pub fn new(
        complaints: Arc<dyn ComplaintRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        categories: Arc<dyn CategoryRepository>,
        citizens: Arc<dyn CitizenRepository>,
        officers: Arc<dyn OfficerRepository>,
        files: Arc<dyn FileRepository>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            complaints,
            assignments,
            categories,
            citizens,
            officers,
            files,
            notifications,
        }
    }

    // ---------------------------------------------------------------------
    // Citizen
    // ---------------------------------------------------------------------

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        dto: ComplaintRequestDto,
    ) -> Result<ComplaintResponseDto> {
        let citizen = self.citizen_for(user).await?;
        let details: ComplaintDetails = dto.into();
        self.check_category(&details).await?;
        self.check_attachment(user, details.image_url.as_deref(), FilePurpose::ComplaintImage)
            .await?;

        let seq = self.complaints.next_reference_seq().await?;
        let reference_number = format_reference_number(Utc::now().year(), seq);

        let complaint = self
            .complaints
            .create(&NewComplaint {
                reference_number,
                citizen_id: citizen.id,
                details,
            })
            .await?;

        tracing::info!(
            "Citizen {} filed complaint {} ({})",
            citizen.id,
            complaint.reference_number,
            complaint.id
        );
        self.notifications
            .notify_citizen(
                citizen.id,
                format!(
                    "Your complaint {} has been registered.",
                    complaint.reference_number
                ),
            )
            .await;

        Ok(complaint.into())
    }

    pub async fn list_mine(
        &self,
        user: &AuthenticatedUser,
        status: Option<ComplaintStatus>,
        page: PaginationQuery,
    ) -> Result<Page<ComplaintResponseDto>> {
        let citizen = self.citizen_for(user).await?;
        let filter = ComplaintFilter {
            citizen_id: Some(citizen.id),
            status,
            ..Default::default()
        };
        Ok(self.complaints.list(&filter, page).await?.map(Into::into))
    }

    /// Visible to the filing citizen, any officer who has been assigned it, and admins
    pub async fn get(&self, user: &AuthenticatedUser, id: Uuid) -> Result<ComplaintResponseDto> {
        let complaint = self.require(id).await?;

        let allowed = match user.role {
            UserRole::Admin => true,
            UserRole::Citizen => self.citizen_for(user).await?.id == complaint.citizen_id,
            UserRole::Officer => {
                let officer = self.officer_for(user).await?;
                complaint.assigned_officer_id == Some(officer.id)
                    || self
                        .assignments
                        .list_for_complaint(id)
                        .await?
                        .iter()
                        .any(|a| a.officer_id == officer.id)
            }
        };

        if !allowed {
            return Err(AppError::Forbidden(
                "You do not have access to this complaint".to_string(),
            ));
        }
        Ok(complaint.into())
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        dto: ComplaintRequestDto,
    ) -> Result<ComplaintResponseDto> {
        let complaint = self.owned_by(user, id).await?;
        Self::ensure_pending(&complaint, "edited")?;

        let details: ComplaintDetails = dto.into();
        self.check_category(&details).await?;
        if details.image_url != complaint.image_url {
            self.check_attachment(user, details.image_url.as_deref(), FilePurpose::ComplaintImage)
                .await?;
        }

        let updated = self
            .complaints
            .update_details(id, &details)
            .await?
            .ok_or_else(|| {
                AppError::Conflict("Complaint is no longer pending and cannot be edited".into())
            })?;

        tracing::info!("Complaint {} edited by its citizen", id);
        Ok(updated.into())
    }

    pub async fn withdraw(&self, user: &AuthenticatedUser, id: Uuid) -> Result<()> {
        let complaint = self.owned_by(user, id).await?;
        Self::ensure_pending(&complaint, "withdrawn")?;

        if !self.complaints.withdraw(id).await? {
            return Err(AppError::Conflict(
                "Complaint is no longer pending and cannot be withdrawn".to_string(),
            ));
        }

        tracing::info!("Complaint {} withdrawn", complaint.reference_number);
        Ok(())
    }

    /// Citizen confirms the resolution of their complaint
    pub async fn close_by_citizen(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
    ) -> Result<ComplaintResponseDto> {
        let complaint = self.owned_by(user, id).await?;
        self.close(complaint).await
    }

    // ---------------------------------------------------------------------
    // Officer
    // ---------------------------------------------------------------------

    pub async fn list_assigned(
        &self,
        user: &AuthenticatedUser,
        status: Option<ComplaintStatus>,
        page: PaginationQuery,
    ) -> Result<Page<ComplaintResponseDto>> {
        let officer = self.officer_for(user).await?;
        let filter = ComplaintFilter {
            officer_id: Some(officer.id),
            status,
            ..Default::default()
        };
        Ok(self.complaints.list(&filter, page).await?.map(Into::into))
    }

    /// Move an assigned complaint to InProgress or Resolved
    pub async fn update_status_by_officer(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        dto: UpdateComplaintStatusDto,
    ) -> Result<ComplaintResponseDto> {
        let officer = self.officer_for(user).await?;
        let complaint = self.require(id).await?;

        if complaint.assigned_officer_id != Some(officer.id) {
            return Err(AppError::Forbidden(
                "Complaint is not assigned to you".to_string(),
            ));
        }
        if !matches!(
            dto.status,
            ComplaintStatus::InProgress | ComplaintStatus::Resolved
        ) {
            return Err(AppError::BadRequest(
                "Officers may only set a complaint to InProgress or Resolved".to_string(),
            ));
        }
        complaint.status.check_transition(dto.status)?;

        let proof_url = dto.cleaned_proof_url();
        self.check_attachment(user, proof_url.as_deref(), FilePurpose::ProofDocument)
            .await?;

        let change = StatusChange {
            from: complaint.status,
            to: dto.status,
            remarks: dto.cleaned_remarks(),
            proof_url,
        };
        let updated = self.apply_status(&complaint, &change).await?;

        tracing::info!(
            "Officer {} moved complaint {} to {}",
            officer.id,
            updated.reference_number,
            updated.status
        );
        self.notifications
            .notify_citizen(
                updated.citizen_id,
                format!(
                    "Your complaint {} is now {}.",
                    updated.reference_number, updated.status
                ),
            )
            .await;

        Ok(updated.into())
    }

    // ---------------------------------------------------------------------
    // Admin
    // ---------------------------------------------------------------------

    pub async fn list_all(
        &self,
        params: ComplaintQueryParams,
        page: PaginationQuery,
    ) -> Result<Page<ComplaintResponseDto>> {
        Ok(self
            .complaints
            .list(&params.into(), page)
            .await?
            .map(Into::into))
    }

    /// Assign or reassign a complaint to an approved officer
    pub async fn assign(
        &self,
        admin: &AuthenticatedUser,
        id: Uuid,
        dto: AssignComplaintDto,
    ) -> Result<AssignmentResponseDto> {
        let complaint = self.require(id).await?;
        if complaint.status == ComplaintStatus::Closed {
            return Err(AppError::Conflict(
                "Closed complaints cannot be assigned".to_string(),
            ));
        }

        let officer = self
            .officers
            .find_by_id(dto.officer_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Officer {} not found", dto.officer_id)))?;
        if !officer.is_assignable() {
            return Err(AppError::BadRequest(format!(
                "Officer {} has not been approved",
                officer.id
            )));
        }
        if complaint.assigned_officer_id == Some(officer.id) {
            return Err(AppError::Conflict(
                "Complaint is already assigned to this officer".to_string(),
            ));
        }

        let assignment = self
            .assignments
            .assign(&NewAssignment {
                complaint_id: complaint.id,
                officer_id: officer.id,
                assigned_by: admin.user_id,
                remarks: dto
                    .remarks
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty()),
            })
            .await?;

        match complaint.assigned_officer_id {
            Some(previous) => tracing::info!(
                "Complaint {} reassigned from officer {} to {}",
                complaint.reference_number,
                previous,
                officer.id
            ),
            None => tracing::info!(
                "Complaint {} assigned to officer {}",
                complaint.reference_number,
                officer.id
            ),
        }

        self.notifications
            .notify_officer(
                officer.id,
                format!(
                    "Complaint {} has been assigned to you: {}",
                    complaint.reference_number, complaint.title
                ),
            )
            .await;
        self.notifications
            .notify_citizen(
                complaint.citizen_id,
                format!(
                    "Your complaint {} has been assigned to {}.",
                    complaint.reference_number, officer.full_name
                ),
            )
            .await;

        Ok(assignment.into())
    }

    pub async fn assignment_history(&self, id: Uuid) -> Result<Vec<AssignmentResponseDto>> {
        self.require(id).await?;
        Ok(self
            .assignments
            .list_for_complaint(id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    pub async fn close_by_admin(&self, id: Uuid) -> Result<ComplaintResponseDto> {
        let complaint = self.require(id).await?;
        self.close(complaint).await
    }

    // ---------------------------------------------------------------------
    // Helpers
    // ---------------------------------------------------------------------

    async fn close(&self, complaint: Complaint) -> Result<ComplaintResponseDto> {
        complaint.status.check_transition(ComplaintStatus::Closed)?;

        let change = StatusChange {
            from: complaint.status,
            to: ComplaintStatus::Closed,
            remarks: None,
            proof_url: None,
        };
        let updated = self.apply_status(&complaint, &change).await?;

        tracing::info!("Complaint {} closed", updated.reference_number);
        self.notifications
            .notify_citizen(
                updated.citizen_id,
                format!("Your complaint {} has been closed.", updated.reference_number),
            )
            .await;
        if let Some(officer_id) = updated.assigned_officer_id {
            self.notifications
                .notify_officer(
                    officer_id,
                    format!("Complaint {} has been closed.", updated.reference_number),
                )
                .await;
        }

        Ok(updated.into())
    }

    async fn apply_status(&self, complaint: &Complaint, change: &StatusChange) -> Result<Complaint> {
        self.complaints
            .update_status(complaint.id, change)
            .await?
            .ok_or_else(|| {
                AppError::Conflict(format!(
                    "Complaint {} changed status concurrently, reload and retry",
                    complaint.reference_number
                ))
            })
    }

    async fn require(&self, id: Uuid) -> Result<Complaint> {
        self.complaints
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Complaint {} not found", id)))
    }

    async fn owned_by(&self, user: &AuthenticatedUser, id: Uuid) -> Result<Complaint> {
        let citizen = self.citizen_for(user).await?;
        let complaint = self.require(id).await?;
        if complaint.citizen_id != citizen.id {
            return Err(AppError::Forbidden(
                "You can only manage your own complaints".to_string(),
            ));
        }
        Ok(complaint)
    }

    fn ensure_pending(complaint: &Complaint, action: &str) -> Result<()> {
        if complaint.status != ComplaintStatus::Pending {
            return Err(AppError::Conflict(format!(
                "Only pending complaints can be {}; this one is {}",
                action, complaint.status
            )));
        }
        Ok(())
    }

    /// Category must be active and belong to the chosen department
    async fn check_category(&self, details: &ComplaintDetails) -> Result<()> {
        let category = self
            .categories
            .find_by_id(details.category_id)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Category {} does not exist or is inactive",
                    details.category_id
                ))
            })?;

        if category.department_id != details.department_id {
            return Err(AppError::BadRequest(format!(
                "Category {} does not belong to department {}",
                category.name, details.department_id
            )));
        }
        Ok(())
    }

    /// Attached links must be live uploads of the caller with the matching purpose
    async fn check_attachment(
        &self,
        user: &AuthenticatedUser,
        url: Option<&str>,
        purpose: FilePurpose,
    ) -> Result<()> {
        let Some(url) = url else {
            return Ok(());
        };

        let file = self.files.find_active_by_url(url).await?.ok_or_else(|| {
            AppError::BadRequest(format!("{} is not an uploaded file", url))
        })?;

        if file.uploaded_by != user.user_id {
            return Err(AppError::BadRequest(format!(
                "{} was not uploaded by you",
                url
            )));
        }
        if file.purpose != purpose.as_str() {
            return Err(AppError::BadRequest(format!(
                "{} was uploaded as {}, expected {}",
                url,
                file.purpose,
                purpose.as_str()
            )));
        }
        Ok(())
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
