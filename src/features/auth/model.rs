use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::users::models::User;

/// Caller identity resolved from a verified session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub fullname: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            fullname: user.display_name().to_string(),
            email: user.email_address().to_string(),
            is_admin: user.is_admin(),
        }
    }
}

/// Claims carried by the signed session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id
    pub sub: String,
    pub fullname: String,
    pub email: String,
    pub is_admin: bool,
    pub iat: i64,
    pub exp: i64,
}
