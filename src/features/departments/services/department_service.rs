use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::departments::dtos::{DepartmentRequestDto, DepartmentResponseDto};
use crate::features::departments::models::Department;
use crate::features::departments::repositories::DepartmentRepository;
use crate::shared::types::{Page, PaginationQuery};

/// Service for department lookups and admin management
pub struct DepartmentService {
    departments: Arc<dyn DepartmentRepository>,
}

impl DepartmentService {
    pub fn new(departments: Arc<dyn DepartmentRepository>) -> Self {
        Self { departments }
    }

    pub async fn list(&self, page: PaginationQuery) -> Result<Page<DepartmentResponseDto>> {
        Ok(self.departments.list(page).await?.map(Into::into))
    }

    pub async fn get(&self, id: Uuid) -> Result<DepartmentResponseDto> {
        self.require_active(id).await.map(Into::into)
    }

    /// Fetch an active department or fail with NotFound
    pub async fn require_active(&self, id: Uuid) -> Result<Department> {
        self.departments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Department {} not found", id)))
    }

    pub async fn create(&self, dto: DepartmentRequestDto) -> Result<DepartmentResponseDto> {
        let department = self.departments.create(&dto.into()).await?;
        tracing::info!("Created department {} ({})", department.name, department.id);
        Ok(department.into())
    }

    pub async fn update(&self, id: Uuid, dto: DepartmentRequestDto) -> Result<DepartmentResponseDto> {
        let department = self
            .departments
            .update(id, &dto.into())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Department {} not found", id)))?;

        tracing::info!("Updated department {}", id);
        Ok(department.into())
    }

    /// Soft delete a department that no active category still points at
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.require_active(id).await?;

        let categories = self.departments.count_active_categories(id).await?;
        if categories > 0 {
            return Err(AppError::Conflict(format!(
                "Department still has {} active categories",
                categories
            )));
        }

        if !self.departments.deactivate(id).await? {
            return Err(AppError::NotFound(format!("Department {} not found", id)));
        }

        tracing::info!("Deactivated department {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::in_memory::InMemoryStore;

    fn request(name: &str) -> DepartmentRequestDto {
        DepartmentRequestDto {
            name: name.to_string(),
            description: Some("  Roads and bridges  ".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_trims_input_and_lists() {
        let store = InMemoryStore::new();
        let service = DepartmentService::new(store.clone());

        let created = service.create(request("  Public Works ")).await.unwrap();
        assert_eq!(created.name, "Public Works");
        assert_eq!(created.description.as_deref(), Some("Roads and bridges"));

        let page = service.list(PaginationQuery::default()).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, created.id);
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let store = InMemoryStore::new();
        let service = DepartmentService::new(store.clone());

        service.create(request("Sanitation")).await.unwrap();
        let result = service.create(request("sanitation")).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_delete_blocked_by_active_categories() {
        let store = InMemoryStore::new();
        let service = DepartmentService::new(store.clone());

        let department = store.seed_department("Water Supply");
        store.seed_category(department.id, "Leakage");

        let result = service.delete(department.id).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_delete_is_soft_and_hides_department() {
        let store = InMemoryStore::new();
        let service = DepartmentService::new(store.clone());

        let department = store.seed_department("Parks");
        service.delete(department.id).await.unwrap();

        assert!(matches!(
            service.get(department.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(!store.department_row(department.id).unwrap().is_active);
    }
}
