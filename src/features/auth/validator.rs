use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::sync::Arc;

use super::model::{AuthenticatedUser, Claims};
use super::repositories::AccountRepository;
use crate::core::config::AuthConfig;
use crate::core::error::AppError;

pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
    accounts: Arc<dyn AccountRepository>,
}

impl JwtValidator {
    pub fn new(config: &AuthConfig, accounts: Arc<dyn AccountRepository>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.leeway = config.jwt_leeway.as_secs();

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            accounts,
        }
    }

    /// Verify signature, issuer and expiry, then confirm the account is still active.
    ///
    /// Role and email come from the database so a role change or deactivation
    /// takes effect before the token expires.
    pub async fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        let claims = token_data.claims;

        let user = self
            .accounts
            .find_by_id(claims.sub)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| AppError::Unauthorized("Account is no longer active".to_string()))?;

        Ok(AuthenticatedUser {
            user_id: user.id,
            email: user.email,
            role: user.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::services::TokenService;
    use crate::shared::in_memory::InMemoryStore;
    use crate::shared::test_helpers::test_auth_config;

    #[tokio::test]
    async fn test_issued_token_round_trips_to_principal() {
        let store = InMemoryStore::new();
        let (principal, _) = store.seed_citizen("Asha Rao");
        let user = store.user_row(principal.user_id).unwrap();

        let config = test_auth_config();
        let token = TokenService::new(&config).issue(&user).unwrap();
        let validator = JwtValidator::new(&config, store.clone());

        let validated = validator.validate_token(&token.access_token).await.unwrap();
        assert_eq!(validated.user_id, principal.user_id);
        assert!(validated.is_citizen());
    }

    #[tokio::test]
    async fn test_token_for_deactivated_account_is_rejected() {
        let store = InMemoryStore::new();
        let (principal, _) = store.seed_citizen("Asha Rao");
        let user = store.user_row(principal.user_id).unwrap();

        let config = test_auth_config();
        let token = TokenService::new(&config).issue(&user).unwrap();
        store.deactivate_user(user.id);

        let result = JwtValidator::new(&config, store.clone())
            .validate_token(&token.access_token)
            .await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret_is_rejected() {
        let store = InMemoryStore::new();
        let (principal, _) = store.seed_citizen("Asha Rao");
        let user = store.user_row(principal.user_id).unwrap();

        let mut other = test_auth_config();
        other.jwt_secret = "a-completely-different-secret-value-0123".to_string();
        let token = TokenService::new(&other).issue(&user).unwrap();

        let result = JwtValidator::new(&test_auth_config(), store.clone())
            .validate_token(&token.access_token)
            .await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_garbage_token_is_rejected() {
        let store = InMemoryStore::new();
        let result = JwtValidator::new(&test_auth_config(), store.clone())
            .validate_token("not.a.jwt")
            .await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }
}
