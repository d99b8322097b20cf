use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::categories::dtos::{
    CategoryQueryParams, CategoryRequestDto, CategoryResponseDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::types::{ApiResponse, PaginationQuery};

/// List active categories
#[utoipa::path(
    get,
    path = "/api/categories",
    params(CategoryQueryParams, PaginationQuery),
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
    Query(params): Query<CategoryQueryParams>,
    Query(page): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let categories = service.list(params.department_id, page).await?;
    Ok(Json(ApiResponse::paginated(categories)))
}

/// Get category by ID
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Create a category under a department
#[utoipa::path(
    post,
    path = "/api/admin/categories",
    request_body = CategoryRequestDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error or unknown department"),
        (status = 403, description = "Admin access required"),
        (status = 409, description = "Category name already in use")
    ),
    tag = "categories",
    security(("bearer_auth" = []))
)]
pub async fn create_category(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<CategoryService>>,
    ValidatedJson(dto): ValidatedJson<CategoryRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    let category = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(category), None, None)),
    ))
}

/// Update a category
#[utoipa::path(
    put,
    path = "/api/admin/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = CategoryRequestDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category name already in use")
    ),
    tag = "categories",
    security(("bearer_auth" = []))
)]
pub async fn update_category(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CategoryRequestDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Soft delete a category
#[utoipa::path(
    delete,
    path = "/api/admin/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deactivated"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories",
    security(("bearer_auth" = []))
)]
pub async fn delete_category(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Category deactivated".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::routes;
    use crate::shared::in_memory::InMemoryStore;
    use crate::shared::test_helpers::{create_admin_user, create_citizen_user, with_user};
    use axum_test::TestServer;
    use serde_json::json;

    fn setup() -> (Arc<InMemoryStore>, Arc<CategoryService>) {
        let store = InMemoryStore::new();
        let service = Arc::new(CategoryService::new(store.clone(), store.clone()));
        (store, service)
    }

    #[tokio::test]
    async fn test_public_list_filters_by_department_query() {
        let (store, service) = setup();
        let roads = store.seed_department("Roads");
        let water = store.seed_department("Water");
        store.seed_category(roads.id, "Potholes");
        store.seed_category(water.id, "Leakage");

        let server = TestServer::new(routes::routes(service)).unwrap();
        let response = server
            .get("/api/categories")
            .add_query_param("department_id", water.id)
            .add_query_param("page_size", 5)
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["data"][0]["name"], "Leakage");
    }

    #[tokio::test]
    async fn test_admin_create_category() {
        let (store, service) = setup();
        let roads = store.seed_department("Roads");

        let app = with_user(routes::admin_routes(service), create_admin_user());
        let server = TestServer::new(app).unwrap();
        let response = server
            .post("/api/admin/categories")
            .json(&json!({ "department_id": roads.id, "name": "Potholes" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["department_name"], "Roads");
    }

    #[tokio::test]
    async fn test_citizen_cannot_manage_categories() {
        let (store, service) = setup();
        let roads = store.seed_department("Roads");

        let app = with_user(routes::admin_routes(service), create_citizen_user());
        let server = TestServer::new(app).unwrap();
        let response = server
            .post("/api/admin/categories")
            .json(&json!({ "department_id": roads.id, "name": "Potholes" }))
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
    }
}
