use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{AdminStatusDto, AuthResponseDto};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::password::{
    hash_password_blocking, verify_password_blocking,
};
use crate::features::auth::services::token_service::{IssuedToken, TokenService};
use crate::features::users::models::{CreateUser, User};
use crate::features::users::services::UserService;

/// Identity plus the token that proves it
#[derive(Debug, Clone)]
pub struct Session {
    pub user: AuthenticatedUser,
    pub token: IssuedToken,
}

impl Session {
    pub fn into_response_dto(self) -> AuthResponseDto {
        AuthResponseDto {
            access_token: self.token.token,
            token_type: "Bearer".to_string(),
            expires_in: self.token.expires_in,
            user: self.user.into(),
        }
    }
}

/// Service for registration, login and session refresh
pub struct AuthService {
    users: Arc<UserService>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(users: Arc<UserService>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Create a regular (non-admin) account
    pub async fn register(&self, fullname: &str, email: &str, password: &str) -> Result<User> {
        let fullname = fullname.trim();
        let email = normalize_email(email);
        if fullname.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "Full name, email and password are required".to_string(),
            ));
        }

        let password_hash = hash_password_blocking(password.to_string()).await?;

        self.users
            .create(CreateUser {
                fullname: fullname.to_string(),
                email,
                password_hash,
            })
            .await
    }

    /// Register then sign the new account in
    pub async fn register_session(
        &self,
        fullname: &str,
        email: &str,
        password: &str,
    ) -> Result<Session> {
        let user = self.register(fullname, email, password).await?;
        self.session_for(&user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let email = normalize_email(email);
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(invalid_credentials)?;

        let Some(hash) = user.password.clone() else {
            return Err(invalid_credentials());
        };

        if !hash.starts_with("$argon2") {
            tracing::warn!(
                "User {} has a password hash in an unsupported format, a reset is required",
                user.id
            );
        }

        if !verify_password_blocking(password.to_string(), hash).await {
            return Err(invalid_credentials());
        }

        tracing::info!("User logged in: id={}", user.id);
        self.session_for(&user)
    }

    /// Sign a token for the current state of the account
    pub fn session_for(&self, user: &User) -> Result<Session> {
        let identity = AuthenticatedUser::from(user);
        let token = self.tokens.issue(&identity)?;
        Ok(Session {
            user: identity,
            token,
        })
    }

    /// Compare the stored admin flag with the one carried by the caller's token.
    ///
    /// A changed flag gets a freshly signed session.
    pub async fn refresh_admin_status(
        &self,
        current: &AuthenticatedUser,
    ) -> Result<(AdminStatusDto, Option<Session>)> {
        let user = self.users.find_by_id(current.user_id).await?;
        let is_admin = user.is_admin();

        if is_admin == current.is_admin {
            return Ok((
                AdminStatusDto {
                    is_admin,
                    token: None,
                },
                None,
            ));
        }

        tracing::info!(
            "Admin flag changed for user {}: {} -> {}",
            user.id,
            current.is_admin,
            is_admin
        );
        let session = self.session_for(&user)?;
        Ok((
            AdminStatusDto {
                is_admin,
                token: Some(session.token.token.clone()),
            },
            Some(session),
        ))
    }

    /// Promote the configured account at startup
    pub async fn bootstrap_admin(&self, email: &str) -> Result<()> {
        let email = normalize_email(email);
        if self.users.promote_to_admin(&email).await? {
            tracing::info!("Bootstrap admin granted to {}", email);
        } else {
            tracing::warn!("Bootstrap admin email {} has no account yet", email);
        }
        Ok(())
    }
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".to_string())
}

/// Emails are stored trimmed and lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
