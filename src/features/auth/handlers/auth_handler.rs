use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::auth::dtos::{
    AuthResponseDto, AuthUserDto, ChangePasswordRequestDto, LoginRequestDto,
    RegisterCitizenRequestDto, RegisterOfficerRequestDto,
};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::AuthService;
use crate::features::officers::dtos::OfficerResponseDto;
use crate::shared::types::ApiResponse;
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

/// Register a citizen account
#[utoipa::path(
    post,
    path = "/api/auth/register/citizen",
    request_body = RegisterCitizenRequestDto,
    responses(
        (status = 201, description = "Citizen registered successfully", body = ApiResponse<AuthResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    ),
    tag = "auth"
)]
pub async fn register_citizen(
    State(service): State<Arc<AuthService>>,
    ValidatedJson(dto): ValidatedJson<RegisterCitizenRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponseDto>>)> {
    let auth_response = service.register_citizen(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(auth_response), None, None)),
    ))
}

/// Register an officer account (pending admin approval)
#[utoipa::path(
    post,
    path = "/api/auth/register/officer",
    request_body = RegisterOfficerRequestDto,
    responses(
        (status = 201, description = "Officer registered, awaiting approval", body = ApiResponse<OfficerResponseDto>),
        (status = 400, description = "Validation error or unknown department"),
        (status = 409, description = "Email already registered")
    ),
    tag = "auth"
)]
pub async fn register_officer(
    State(service): State<Arc<AuthService>>,
    ValidatedJson(dto): ValidatedJson<RegisterOfficerRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<OfficerResponseDto>>)> {
    let officer = service.register_officer(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(officer),
            Some("Registration received. An admin must approve the account before login.".to_string()),
            None,
        )),
    ))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account deactivated or awaiting approval")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    ValidatedJson(dto): ValidatedJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<AuthResponseDto>>> {
    let auth_response = service.login(dto).await?;
    Ok(Json(ApiResponse::success(Some(auth_response), None, None)))
}

/// Get current authenticated user info
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user retrieved successfully", body = ApiResponse<AuthUserDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(
    user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
) -> Result<Json<ApiResponse<AuthUserDto>>> {
    let user_data = service.get_current_user(&user).await?;
    Ok(Json(ApiResponse::success(Some(user_data), None, None)))
}

/// Change the caller's password
#[utoipa::path(
    post,
    path = "/api/auth/change-password",
    request_body = ChangePasswordRequestDto,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Current password is incorrect")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn change_password(
    user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
    ValidatedJson(dto): ValidatedJson<ChangePasswordRequestDto>,
) -> Result<Json<ApiResponse<()>>> {
    service.change_password(&user, dto).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Password changed".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::routes;
    use crate::features::auth::services::TokenService;
    use crate::shared::in_memory::InMemoryStore;
    use crate::shared::test_helpers::test_auth_config;
    use axum_test::TestServer;
    use serde_json::json;

    fn server(store: &Arc<InMemoryStore>) -> TestServer {
        let service = Arc::new(AuthService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            Arc::new(TokenService::new(&test_auth_config())),
        ));
        TestServer::new(routes::public_routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_register_and_login_over_http() {
        let store = InMemoryStore::new();
        let server = server(&store);

        let response = server
            .post("/api/auth/register/citizen")
            .json(&json!({
                "email": "asha@example.com",
                "password": "s3cure-passw0rd",
                "full_name": "Asha Rao"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let response = server
            .post("/api/auth/login")
            .json(&json!({ "email": "asha@example.com", "password": "s3cure-passw0rd" }))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["token_type"], "Bearer");
        assert_eq!(body["data"]["user"]["role"], "citizen");
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let store = InMemoryStore::new();
        let server = server(&store);

        let response = server
            .post("/api/auth/register/citizen")
            .json(&json!({
                "email": "asha@example.com",
                "password": "short",
                "full_name": "Asha Rao"
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_login_with_bad_credentials_is_unauthorized() {
        let store = InMemoryStore::new();
        let server = server(&store);

        server
            .post("/api/auth/login")
            .json(&json!({ "email": "ghost@example.com", "password": "whatever" }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
