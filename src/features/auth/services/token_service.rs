use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::core::config::SessionConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, SessionClaims};
use crate::shared::constants::SESSION_COOKIE;

/// A freshly signed session token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

/// Issues and verifies HS256 session tokens.
///
/// The token carries the admin flag so guards do not hit the database on every
/// request. It is re-issued on login and whenever the account changes.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
    cookie_secure: bool,
}

impl TokenService {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl_secs: config.ttl.as_secs() as i64,
            cookie_secure: config.cookie_secure,
        }
    }

    pub fn issue(&self, user: &AuthenticatedUser) -> Result<IssuedToken> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user.user_id.to_string(),
            fullname: user.fullname.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
            iat: now,
            exp: now + self.ttl_secs,
        };

        Ok(IssuedToken {
            token: self.encode_claims(&claims)?,
            expires_in: self.ttl_secs,
        })
    }

    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid session token: {}", e)))?;

        let claims = data.claims;
        let user_id = claims
            .sub
            .parse::<i32>()
            .map_err(|_| AppError::Unauthorized("Invalid session subject".to_string()))?;

        Ok(AuthenticatedUser {
            user_id,
            fullname: claims.fullname,
            email: claims.email,
            is_admin: claims.is_admin,
        })
    }

    /// Cookie carrying the token for browser sessions
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.cookie_secure)
            .build()
    }

    /// Cookie used to clear the browser session
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, "")).path("/").build()
    }

    fn encode_claims(&self, claims: &SessionClaims) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign session token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{regular_user, test_token_service};

    #[test]
    fn test_issue_then_verify_keeps_identity() {
        let service = test_token_service();
        let user = regular_user();

        let issued = service.issue(&user).unwrap();
        assert!(issued.expires_in > 0);

        let verified = service.verify(&issued.token).unwrap();
        assert_eq!(verified, user);
    }

    #[test]
    fn test_verify_rejects_tampered_token() {
        let service = test_token_service();
        let regular = service.issue(&regular_user()).unwrap().token;
        let mut promoted = regular_user();
        promoted.is_admin = true;
        let admin = service.issue(&promoted).unwrap().token;

        // Admin claims under the regular token's signature
        let regular_parts: Vec<&str> = regular.split('.').collect();
        let admin_parts: Vec<&str> = admin.split('.').collect();
        let forged = format!(
            "{}.{}.{}",
            regular_parts[0], admin_parts[1], regular_parts[2]
        );

        assert!(matches!(
            service.verify(&forged),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_verify_rejects_other_secret() {
        let issued = test_token_service().issue(&regular_user()).unwrap();

        let other = TokenService::new(&SessionConfig {
            secret: "another-secret-that-is-long-enough-0000".to_string(),
            ttl: std::time::Duration::from_secs(60),
            cookie_secure: false,
        });
        assert!(other.verify(&issued.token).is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let service = test_token_service();
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: "7".to_string(),
            fullname: "Eski Oturum".to_string(),
            email: "eski@example.com".to_string(),
            is_admin: false,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = service.encode_claims(&claims).unwrap();

        assert!(service.verify(&token).is_err());
    }

    #[test]
    fn test_session_cookie_is_http_only() {
        let service = test_token_service();
        let cookie = service.session_cookie("abc".to_string());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }
}
