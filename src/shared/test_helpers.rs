#[cfg(test)]
use crate::features::auth::model::{AuthenticatedUser, UserRole};

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
pub fn create_user(role: UserRole) -> AuthenticatedUser {
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;

    AuthenticatedUser {
        user_id: Uuid::new_v4(),
        email: SafeEmail().fake(),
        role,
    }
}

#[cfg(test)]
pub fn create_admin_user() -> AuthenticatedUser {
    create_user(UserRole::Admin)
}

#[cfg(test)]
pub fn create_officer_user() -> AuthenticatedUser {
    create_user(UserRole::Officer)
}

#[cfg(test)]
pub fn create_citizen_user() -> AuthenticatedUser {
    create_user(UserRole::Citizen)
}

/// Wrap a router so every request carries `user` as the authenticated principal
#[cfg(test)]
pub fn with_user(router: Router, user: AuthenticatedUser) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let user = user.clone();
            async move {
                request.extensions_mut().insert(user);
                let response: Response = next.run(request).await;
                response
            }
        },
    ))
}

/// Auth settings with a fixed signing secret for token tests
#[cfg(test)]
pub fn test_auth_config() -> crate::core::config::AuthConfig {
    use std::time::Duration;

    crate::core::config::AuthConfig {
        jwt_secret: "test-secret-that-is-at-least-32-bytes!".to_string(),
        issuer: "complaint-portal-test".to_string(),
        access_token_ttl: Duration::from_secs(3600),
        jwt_leeway: Duration::from_secs(0),
    }
}
