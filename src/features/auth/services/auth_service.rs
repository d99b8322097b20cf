use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{
    AuthResponseDto, AuthUserDto, ChangePasswordRequestDto, LoginRequestDto,
    RegisterCitizenRequestDto, RegisterOfficerRequestDto,
};
use crate::features::auth::model::{AuthenticatedUser, NewUser, User, UserRole};
use crate::features::auth::password::{hash_password, verify_password, PasswordCheck};
use crate::features::auth::repositories::AccountRepository;
use crate::features::auth::services::TokenService;
use crate::features::citizens::models::NewCitizen;
use crate::features::citizens::CitizenRepository;
use crate::features::departments::DepartmentRepository;
use crate::features::officers::dtos::OfficerResponseDto;
use crate::features::officers::models::NewOfficer;
use crate::features::officers::OfficerRepository;
use crate::shared::constants::TOKEN_TYPE_BEARER;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Service for registration, login and password management
pub struct AuthService {
    accounts: Arc<dyn AccountRepository>,
    citizens: Arc<dyn CitizenRepository>,
    officers: Arc<dyn OfficerRepository>,
    departments: Arc<dyn DepartmentRepository>,
    tokens: Arc<TokenService>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AuthService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        citizens: Arc<dyn CitizenRepository>,
        officers: Arc<dyn OfficerRepository>,
        departments: Arc<dyn DepartmentRepository>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            accounts,
            citizens,
            officers,
            departments,
            tokens,
        }
    }

    /// Register a citizen and sign them in
    pub async fn register_citizen(&self, dto: RegisterCitizenRequestDto) -> Result<AuthResponseDto> {
        let user = NewUser {
            email: normalize_email(&dto.email),
            password_hash: hash_password(&dto.password)?,
            role: UserRole::Citizen,
        };
        let citizen = NewCitizen {
            full_name: dto.full_name.trim().to_string(),
            phone: trimmed(dto.phone),
            address: trimmed(dto.address),
        };

        let (user, citizen) = self.accounts.create_citizen_account(&user, &citizen).await?;
        tracing::info!("Registered citizen {} ({})", citizen.id, user.email);

        let summary = AuthUserDto {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
            profile_id: Some(citizen.id),
            full_name: Some(citizen.full_name),
        };
        self.respond_with_token(&user, summary)
    }

    /// Register an officer; no token until an admin approves the account
    pub async fn register_officer(
        &self,
        dto: RegisterOfficerRequestDto,
    ) -> Result<OfficerResponseDto> {
        if self
            .departments
            .find_by_id(dto.department_id)
            .await?
            .is_none()
        {
            return Err(AppError::BadRequest(format!(
                "Department {} does not exist or is inactive",
                dto.department_id
            )));
        }

        let user = NewUser {
            email: normalize_email(&dto.email),
            password_hash: hash_password(&dto.password)?,
            role: UserRole::Officer,
        };
        let officer = NewOfficer {
            department_id: dto.department_id,
            full_name: dto.full_name.trim().to_string(),
            phone: trimmed(dto.phone),
        };

        let (user, officer) = self.accounts.create_officer_account(&user, &officer).await?;
        tracing::info!(
            "Registered officer {} ({}), awaiting approval",
            officer.id,
            user.email
        );

        Ok(officer.into())
    }

    /// Login with email and password.
    ///
    /// Accounts carried over with plaintext passwords are accepted once and
    /// rehashed with Argon2 on the spot.
    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let user = self
            .accounts
            .find_by_email(&normalize_email(&dto.email))
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        let check = verify_password(&dto.password, &user.password_hash);
        if !check.is_valid() {
            tracing::debug!("Failed login attempt for user {}", user.id);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        if !user.is_active {
            return Err(AppError::Forbidden("Account is deactivated".to_string()));
        }

        let summary = self.summarize(&user).await?;

        if check == PasswordCheck::ValidLegacy {
            self.upgrade_legacy_password(user.id, &dto.password).await;
        }

        tracing::info!("User {} ({}) logged in", user.id, user.role);
        self.respond_with_token(&user, summary)
    }

    /// Current account with its profile summary
    pub async fn get_current_user(&self, principal: &AuthenticatedUser) -> Result<AuthUserDto> {
        let user = self.require_user(principal.user_id).await?;
        self.summarize(&user).await
    }

    pub async fn change_password(
        &self,
        principal: &AuthenticatedUser,
        dto: ChangePasswordRequestDto,
    ) -> Result<()> {
        let user = self.require_user(principal.user_id).await?;

        if !verify_password(&dto.current_password, &user.password_hash).is_valid() {
            return Err(AppError::Unauthorized(
                "Current password is incorrect".to_string(),
            ));
        }
        if dto.current_password == dto.new_password {
            return Err(AppError::BadRequest(
                "New password must differ from the current password".to_string(),
            ));
        }

        let hash = hash_password(&dto.new_password)?;
        self.accounts.update_password_hash(user.id, &hash).await?;

        tracing::info!("User {} changed their password", user.id);
        Ok(())
    }

    /// Create the first admin account; returns false when one already exists
    pub async fn bootstrap_admin(&self, email: &str, password: &str) -> Result<bool> {
        if self.accounts.admin_exists().await? {
            return Ok(false);
        }

        let admin = self
            .accounts
            .create_admin(&NewUser {
                email: normalize_email(email),
                password_hash: hash_password(password)?,
                role: UserRole::Admin,
            })
            .await?;

        tracing::info!("Created bootstrap admin account {}", admin.email);
        Ok(true)
    }

    async fn require_user(&self, user_id: Uuid) -> Result<User> {
        self.accounts
            .find_by_id(user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| AppError::Unauthorized("Account is no longer active".to_string()))
    }

    /// Build the account summary, refusing officers that are not yet approved
    async fn summarize(&self, user: &User) -> Result<AuthUserDto> {
        let (profile_id, full_name) = match user.role {
            UserRole::Admin => (None, None),
            UserRole::Citizen => {
                let citizen = self
                    .citizens
                    .find_by_user_id(user.id)
                    .await?
                    .ok_or_else(|| AppError::Forbidden("Citizen profile is inactive".to_string()))?;
                (Some(citizen.id), Some(citizen.full_name))
            }
            UserRole::Officer => {
                let officer = self
                    .officers
                    .find_by_user_id(user.id)
                    .await?
                    .ok_or_else(|| AppError::Forbidden("Officer profile is inactive".to_string()))?;
                if !officer.is_approved {
                    return Err(AppError::Forbidden(
                        "Officer account is awaiting admin approval".to_string(),
                    ));
                }
                (Some(officer.id), Some(officer.full_name))
            }
        };

        Ok(AuthUserDto {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
            profile_id,
            full_name,
        })
    }

    async fn upgrade_legacy_password(&self, user_id: Uuid, password: &str) {
        let result = match hash_password(password) {
            Ok(hash) => self.accounts.update_password_hash(user_id, &hash).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => tracing::info!("Upgraded legacy password for user {}", user_id),
            Err(e) => tracing::warn!("Could not upgrade legacy password for {}: {}", user_id, e),
        }
    }

    fn respond_with_token(&self, user: &User, summary: AuthUserDto) -> Result<AuthResponseDto> {
        let token = self.tokens.issue(user)?;
        Ok(AuthResponseDto {
            access_token: token.access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: token.expires_in,
            user: summary,
        })
    }
}
