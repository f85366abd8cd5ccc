use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::auth::model::AuthenticatedUser;

/// Registration posted from the HTML form
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterFormDto {
    #[validate(length(min = 1, message = "Full name is required"))]
    #[serde(default)]
    pub fullname: String,

    #[validate(email(message = "Invalid email format"))]
    #[serde(default)]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    #[serde(default)]
    pub password: String,
}

/// Registration from the mobile client
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub fullname: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(length(min = 1, message = "Email is required"))]
    #[serde(default)]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    #[serde(default)]
    pub password: String,
}

/// Response for mobile login and registration
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponseDto {
    /// Signed session token
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user: AuthUserDto,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthUserDto {
    pub id: i32,
    pub fullname: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<AuthenticatedUser> for AuthUserDto {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            id: user.user_id,
            fullname: user.fullname,
            email: user.email,
            is_admin: user.is_admin,
        }
    }
}

/// Current admin flag, with a fresh token when it changed since the last one
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminStatusDto {
    pub is_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;

    #[test]
    fn test_mobile_register_requires_six_char_password() {
        let dto = RegisterRequestDto {
            fullname: Name().fake(),
            email: SafeEmail().fake(),
            password: "12345".to_string(),
        };
        assert!(dto.validate().is_err());

        let dto = RegisterRequestDto {
            password: "123456".to_string(),
            ..dto
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_register_form_rejects_bad_email() {
        let dto = RegisterFormDto {
            fullname: Name().fake(),
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_login_requires_both_fields() {
        let dto: LoginRequestDto = serde_json::from_str(r#"{"email": "a@b.c"}"#).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_admin_status_omits_missing_token() {
        let json = serde_json::to_value(AdminStatusDto {
            is_admin: false,
            token: None,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "is_admin": false }));
    }
}
