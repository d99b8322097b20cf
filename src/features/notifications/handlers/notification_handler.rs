use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::notifications::dtos::{
    MarkAllReadDto, NotificationQueryParams, NotificationResponseDto, UnreadCountDto,
};
use crate::features::notifications::services::NotificationService;
use crate::shared::types::{ApiResponse, PaginationQuery};

/// List the caller's notifications
#[utoipa::path(
    get,
    path = "/api/notifications",
    params(NotificationQueryParams, PaginationQuery),
    responses(
        (status = 200, description = "Notifications, newest first", body = ApiResponse<Vec<NotificationResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn list_notifications(
    user: AuthenticatedUser,
    State(service): State<Arc<NotificationService>>,
    Query(params): Query<NotificationQueryParams>,
    Query(page): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<NotificationResponseDto>>>> {
    let notifications = service.list(&user, params.unread_only, page).await?;
    Ok(Json(ApiResponse::paginated(notifications)))
}

/// Count the caller's unread notifications
#[utoipa::path(
    get,
    path = "/api/notifications/unread-count",
    responses(
        (status = 200, description = "Unread count", body = ApiResponse<UnreadCountDto>)
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn unread_count(
    user: AuthenticatedUser,
    State(service): State<Arc<NotificationService>>,
) -> Result<Json<ApiResponse<UnreadCountDto>>> {
    let unread = service.unread_count(&user).await?;
    Ok(Json(ApiResponse::success(
        Some(UnreadCountDto { unread }),
        None,
        None,
    )))
}

/// Mark one notification as read
#[utoipa::path(
    post,
    path = "/api/notifications/{id}/read",
    params(("id" = Uuid, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification marked as read"),
        (status = 404, description = "Notification not found")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn mark_read(
    user: AuthenticatedUser,
    State(service): State<Arc<NotificationService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.mark_read(&user, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Notification marked as read".to_string()),
        None,
    )))
}

/// Mark all of the caller's notifications as read
#[utoipa::path(
    post,
    path = "/api/notifications/read-all",
    responses(
        (status = 200, description = "Notifications marked as read", body = ApiResponse<MarkAllReadDto>)
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn mark_all_read(
    user: AuthenticatedUser,
    State(service): State<Arc<NotificationService>>,
) -> Result<Json<ApiResponse<MarkAllReadDto>>> {
    let updated = service.mark_all_read(&user).await?;
    Ok(Json(ApiResponse::success(
        Some(MarkAllReadDto { updated }),
        None,
        None,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::notifications::routes;
    use crate::shared::in_memory::InMemoryStore;
    use crate::shared::test_helpers::with_user;
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_unread_filter_and_count() {
        let store = InMemoryStore::new();
        let (user, citizen) = store.seed_citizen("Asha Rao");
        let service = Arc::new(NotificationService::new(
            store.clone(),
            store.clone(),
            store.clone(),
        ));
        service.notify_citizen(citizen.id, "one").await;
        service.notify_citizen(citizen.id, "two").await;

        let server = TestServer::new(with_user(routes::routes(service), user)).unwrap();

        let body: serde_json::Value = server.get("/api/notifications/unread-count").await.json();
        assert_eq!(body["data"]["unread"], 2);

        server
            .post("/api/notifications/read-all")
            .await
            .assert_status_ok();

        let response = server
            .get("/api/notifications")
            .add_query_param("unread_only", true)
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["meta"]["total"], 0);
    }
}
