use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::users::models::UserSummary;

/// Profile form: both fields are required, the password is always re-hashed
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileFormDto {
    #[validate(email(message = "Invalid email format"))]
    #[serde(default)]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateEmailDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdatePasswordDto {
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmailUpdatedDto {
    pub email: String,
    /// Present when the email changed and the session was re-signed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct UserSearchQuery {
    /// Part of the full name, at least 2 characters
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserSummaryDto {
    pub id: i32,
    pub fullname: String,
}

impl From<UserSummary> for UserSummaryDto {
    fn from(row: UserSummary) -> Self {
        Self {
            id: row.id,
            fullname: row.fullname.unwrap_or_default(),
        }
    }
}
