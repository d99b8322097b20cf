use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::citizens::CitizenRepository;
use crate::features::dashboard::dtos::{
    AdminDashboardDto, CitizenDashboardDto, OfficerDashboardDto, StatusCountDto,
};
use crate::features::dashboard::models::DashboardScope;
use crate::features::dashboard::repositories::DashboardRepository;
use crate::features::notifications::models::Recipient;
use crate::features::notifications::repositories::NotificationRepository;
use crate::features::officers::OfficerRepository;

/// Per-role summary counts
pub struct DashboardService {
    stats: Arc<dyn DashboardRepository>,
    citizens: Arc<dyn CitizenRepository>,
    officers: Arc<dyn OfficerRepository>,
    notifications: Arc<dyn NotificationRepository>,
}

impl DashboardService {
    pub fn new(
        stats: Arc<dyn DashboardRepository>,
        citizens: Arc<dyn CitizenRepository>,
        officers: Arc<dyn OfficerRepository>,
        notifications: Arc<dyn NotificationRepository>,
    ) -> Self {
        Self {
            stats,
            citizens,
            officers,
            notifications,
        }
    }

    pub async fn admin(&self) -> Result<AdminDashboardDto> {
        let by_status = self.stats.complaints_by_status(DashboardScope::All).await?;

        Ok(AdminDashboardDto {
            total_complaints: by_status.iter().map(|c| c.count).sum(),
            by_status: StatusCountDto::complete(&by_status),
            by_department: self
                .stats
                .complaints_by_department()
                .await?
                .into_iter()
                .map(Into::into)
                .collect(),
            pending_officer_approvals: self.stats.pending_officer_approvals().await?,
            open_grievances: self
                .stats
                .count_grievances(DashboardScope::All, true)
                .await?,
        })
    }

    pub async fn officer(&self, user: &AuthenticatedUser) -> Result<OfficerDashboardDto> {
        let officer = self
            .officers
            .find_by_user_id(user.user_id)
            .await?
            .ok_or_else(|| AppError::Forbidden("Officer profile not found".to_string()))?;
        let scope = DashboardScope::Officer(officer.id);
        let by_status = self.stats.complaints_by_status(scope).await?;

        Ok(OfficerDashboardDto {
            active_assignments: by_status.iter().map(|c| c.count).sum(),
            by_status: StatusCountDto::complete(&by_status),
            open_grievances: self.stats.count_grievances(scope, true).await?,
        })
    }

    pub async fn citizen(&self, user: &AuthenticatedUser) -> Result<CitizenDashboardDto> {
        let citizen = self
            .citizens
            .find_by_user_id(user.user_id)
            .await?
            .ok_or_else(|| AppError::Forbidden("Citizen profile not found".to_string()))?;
        let scope = DashboardScope::Citizen(citizen.id);
        let by_status = self.stats.complaints_by_status(scope).await?;

        Ok(CitizenDashboardDto {
            total_complaints: by_status.iter().map(|c| c.count).sum(),
            by_status: StatusCountDto::complete(&by_status),
            grievances: self.stats.count_grievances(scope, false).await?,
            unread_notifications: self
                .notifications
                .count_unread(Recipient::Citizen(citizen.id))
                .await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::officers::OfficerRank;
    use crate::features::statuses::ComplaintStatus;
    use crate::shared::in_memory::InMemoryStore;
    use crate::shared::test_helpers::create_officer_user;

    fn service(store: &Arc<InMemoryStore>) -> DashboardService {
        DashboardService::new(store.clone(), store.clone(), store.clone(), store.clone())
    }

    fn count_for(by_status: &[StatusCountDto], status: ComplaintStatus) -> i64 {
        by_status
            .iter()
            .find(|c| c.status == status)
            .map(|c| c.count)
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_admin_totals() {
        let store = InMemoryStore::new();
        let roads = store.seed_department("Roads");
        store.seed_department("Water");
        let category = store.seed_category(roads.id, "Potholes");
        let (_, citizen) = store.seed_citizen("Asha Rao");
        store.seed_officer("Pending Officer", roads.id, OfficerRank::FieldOfficer, false);
        store.seed_complaint(citizen.id, &category);
        let resolved = store.seed_complaint(citizen.id, &category);
        store.set_complaint_status(resolved.id, ComplaintStatus::Resolved);

        let dashboard = service(&store).admin().await.unwrap();

        assert_eq!(dashboard.total_complaints, 2);
        assert_eq!(count_for(&dashboard.by_status, ComplaintStatus::Pending), 1);
        assert_eq!(count_for(&dashboard.by_status, ComplaintStatus::Resolved), 1);
        assert_eq!(dashboard.by_department.len(), 2);
        assert_eq!(dashboard.by_department[0].department_name, "Roads");
        assert_eq!(dashboard.by_department[0].count, 2);
        assert_eq!(dashboard.pending_officer_approvals, 1);
        assert_eq!(dashboard.open_grievances, 0);
    }

    #[tokio::test]
    async fn test_officer_sees_only_active_assignments() {
        let store = InMemoryStore::new();
        let dept = store.seed_department("Roads");
        let category = store.seed_category(dept.id, "Potholes");
        let (_, citizen) = store.seed_citizen("Asha Rao");
        let (user, officer) =
            store.seed_officer("Ravi Kumar", dept.id, OfficerRank::FieldOfficer, true);
        let mine = store.seed_complaint(citizen.id, &category);
        store.seed_assignment(mine.id, officer.id);
        store.set_complaint_status(mine.id, ComplaintStatus::InProgress);
        store.seed_complaint(citizen.id, &category);

        let dashboard = service(&store).officer(&user).await.unwrap();

        assert_eq!(dashboard.active_assignments, 1);
        assert_eq!(
            count_for(&dashboard.by_status, ComplaintStatus::InProgress),
            1
        );
    }

    #[tokio::test]
    async fn test_citizen_counts_unread_notifications() {
        let store = InMemoryStore::new();
        let dept = store.seed_department("Roads");
        let category = store.seed_category(dept.id, "Potholes");
        let (user, citizen) = store.seed_citizen("Asha Rao");
        store.seed_complaint(citizen.id, &category);
        NotificationRepository::create(store.as_ref(), Recipient::Citizen(citizen.id), "Welcome")
            .await
            .unwrap();

        let dashboard = service(&store).citizen(&user).await.unwrap();

        assert_eq!(dashboard.total_complaints, 1);
        assert_eq!(dashboard.grievances, 0);
        assert_eq!(dashboard.unread_notifications, 1);
    }

    #[tokio::test]
    async fn test_officer_without_profile_is_forbidden() {
        let store = InMemoryStore::new();
        let result = service(&store).officer(&create_officer_user()).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
