use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{CategoryRequestDto, CategoryResponseDto};
use crate::features::categories::models::{Category, CategoryInput};
use crate::features::categories::repositories::CategoryRepository;
use crate::features::departments::DepartmentRepository;
use crate::shared::types::{Page, PaginationQuery};

pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    departments: Arc<dyn DepartmentRepository>,
}

impl CategoryService {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        departments: Arc<dyn DepartmentRepository>,
    ) -> Self {
        Self {
            categories,
            departments,
        }
    }

    pub async fn list(
        &self,
        department_id: Option<Uuid>,
        page: PaginationQuery,
    ) -> Result<Page<CategoryResponseDto>> {
        Ok(self
            .categories
            .list(department_id, page)
            .await?
            .map(Into::into))
    }

    pub async fn get(&self, id: Uuid) -> Result<CategoryResponseDto> {
        self.require_active(id).await.map(Into::into)
    }

    /// Fetch an active category or fail with NotFound
    pub async fn require_active(&self, id: Uuid) -> Result<Category> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    pub async fn create(&self, dto: CategoryRequestDto) -> Result<CategoryResponseDto> {
        let input: CategoryInput = dto.into();
        self.ensure_department(input.department_id).await?;

        let category = self.categories.create(&input).await?;
        tracing::info!(
            "Created category {} ({}) in department {}",
            category.name,
            category.id,
            category.department_id
        );
        Ok(category.into())
    }

    pub async fn update(&self, id: Uuid, dto: CategoryRequestDto) -> Result<CategoryResponseDto> {
        let input: CategoryInput = dto.into();
        self.ensure_department(input.department_id).await?;

        let category = self
            .categories
            .update(id, &input)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        tracing::info!("Updated category {}", id);
        Ok(category.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.categories.deactivate(id).await? {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }

        tracing::info!("Deactivated category {}", id);
        Ok(())
    }

    async fn ensure_department(&self, department_id: Uuid) -> Result<()> {
        match self.departments.find_by_id(department_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::BadRequest(format!(
                "Department {} does not exist or is inactive",
                department_id
            ))),
        }
    }
}
