use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::{hash_password_blocking, normalize_email, AuthService, Session};
use crate::features::users::dtos::UserSummaryDto;
use crate::features::users::services::UserService;
use crate::shared::constants::MIN_PASSWORD_LEN;

/// Outcome of an email change request
#[derive(Debug)]
pub enum EmailChange {
    Unchanged(String),
    Changed(Session),
}

/// Self-service account management for the logged-in user
pub struct ProfileService {
    users: Arc<UserService>,
    auth: Arc<AuthService>,
}

impl ProfileService {
    pub fn new(users: Arc<UserService>, auth: Arc<AuthService>) -> Self {
        Self { users, auth }
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    /// Profile form: set email and password together and re-sign the session
    pub async fn update_profile(
        &self,
        current: &AuthenticatedUser,
        email: &str,
        password: &str,
    ) -> Result<Session> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let password_hash = hash_password_blocking(password.to_string()).await?;
        let user = self
            .users
            .update_credentials(current.user_id, &email, &password_hash)
            .await?;

        tracing::info!("Profile updated for user {}", user.id);
        self.auth.session_for(&user)
    }

    pub async fn update_email(&self, current: &AuthenticatedUser, email: &str) -> Result<EmailChange> {
        let email = normalize_email(email);
        if email.eq_ignore_ascii_case(&current.email) {
            return Ok(EmailChange::Unchanged(email));
        }

        let user = self.users.update_email(current.user_id, &email).await?;
        tracing::info!("Email changed for user {}", user.id);
        Ok(EmailChange::Changed(self.auth.session_for(&user)?))
    }

    pub async fn update_password(&self, current: &AuthenticatedUser, password: &str) -> Result<()> {
        let password = validate_new_password(password)?;
        let password_hash = hash_password_blocking(password).await?;
        self.users
            .update_password(current.user_id, &password_hash)
            .await?;

        tracing::info!("Password changed for user {}", current.user_id);
        Ok(())
    }

    pub async fn search(&self, query: &str) -> Result<Vec<UserSummaryDto>> {
        let rows = self.users.search(query).await?;
        Ok(rows.into_iter().map(UserSummaryDto::from).collect())
    }
}

/// Trim and enforce the minimum length, counted in characters
pub fn validate_new_password(password: &str) -> Result<String> {
    let password = password.trim();
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(password.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{lazy_pool, regular_user, test_tokens};

    fn service() -> ProfileService {
        let users = Arc::new(UserService::new(lazy_pool()));
        let auth = Arc::new(AuthService::new(Arc::clone(&users), test_tokens()));
        ProfileService::new(users, auth)
    }

    #[test]
    fn test_password_is_trimmed_before_length_check() {
        assert!(validate_new_password("  abc12  ").is_err());
        assert_eq!(validate_new_password(" abc123 ").unwrap(), "abc123");
    }

    #[test]
    fn test_password_length_counts_characters() {
        assert!(validate_new_password("şğüıöç").is_ok());
    }

    #[tokio::test]
    async fn test_same_email_in_other_case_is_unchanged() {
        let user = regular_user();
        let change = service()
            .update_email(&user, &user.email.to_uppercase())
            .await
            .unwrap();
        assert!(matches!(change, EmailChange::Unchanged(email) if email == user.email));
    }

    #[tokio::test]
    async fn test_profile_update_requires_both_fields() {
        let result = service().update_profile(&regular_user(), "", "x").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_short_search_returns_nothing_without_query() {
        let rows = service().search("a").await.unwrap();
        assert!(rows.is_empty());
    }
}
