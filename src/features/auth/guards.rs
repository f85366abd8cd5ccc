//! Authorization guards for API routes and HTML pages.
//!
//! All guards read the `AuthenticatedUser` that the session middleware placed in the
//! request extensions. API guards reject with a JSON error, page guards redirect.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use crate::shared::notice::{redirect_with_notice, NoticeKind};

pub const ADMIN_ONLY_NOTICE: &str = "You are not allowed to access this page";

fn session_user(parts: &Parts) -> Option<AuthenticatedUser> {
    parts.extensions.get::<AuthenticatedUser>().cloned()
}

/// Any logged-in user.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireUser(user): RequireUser) { ... }
/// ```
pub struct RequireUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session_user(parts)
            .map(RequireUser)
            .ok_or_else(|| AppError::Unauthorized("Login required".to_string()))
    }
}

/// A logged-in user whose session carries the admin flag.
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = session_user(parts)
            .ok_or_else(|| AppError::Unauthorized("Login required".to_string()))?;

        if !user.is_admin {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(user))
    }
}

/// Page variant of [`RequireUser`], anonymous callers go to the login page.
pub struct PageUser(pub AuthenticatedUser);

pub struct PageRedirect(Redirect);

impl IntoResponse for PageRedirect {
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}

impl<S> FromRequestParts<S> for PageUser
where
    S: Send + Sync,
{
    type Rejection = PageRedirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session_user(parts)
            .map(PageUser)
            .ok_or_else(|| PageRedirect(Redirect::to("/login")))
    }
}

/// Page variant of [`RequireAdmin`], non-admins are sent home with a notice.
pub struct PageAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for PageAdmin
where
    S: Send + Sync,
{
    type Rejection = PageRedirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = session_user(parts).ok_or_else(|| PageRedirect(Redirect::to("/login")))?;

        if !user.is_admin {
            return Err(PageRedirect(redirect_with_notice(
                "/",
                NoticeKind::Error,
                ADMIN_ONLY_NOTICE,
            )));
        }

        Ok(PageAdmin(user))
    }
}
