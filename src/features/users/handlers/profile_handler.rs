use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::{PageUser, RequireUser};
use crate::features::users::dtos::{
    EmailUpdatedDto, UpdateEmailDto, UpdatePasswordDto, UpdateProfileFormDto, UserSearchQuery,
    UserSummaryDto,
};
use crate::features::users::services::{EmailChange, ProfileService};
use crate::shared::notice::{redirect_with_notice, NoticeKind};
use crate::shared::types::{ApiResponse, Meta};

/// Profile form post, redirects back to the profile page with a notice
pub async fn update_profile_form(
    State(service): State<Arc<ProfileService>>,
    PageUser(user): PageUser,
    jar: CookieJar,
    Form(dto): Form<UpdateProfileFormDto>,
) -> Response {
    if dto.validate().is_err() {
        return redirect_with_notice(
            "/profile",
            NoticeKind::Error,
            "A valid email and a password are required",
        )
        .into_response();
    }

    match service.update_profile(&user, &dto.email, &dto.password).await {
        Ok(session) => {
            let jar = jar.add(service.auth().tokens().session_cookie(session.token.token));
            (
                jar,
                redirect_with_notice("/profile", NoticeKind::Success, "Profile updated"),
            )
                .into_response()
        }
        Err(e) => {
            redirect_with_notice("/profile", NoticeKind::Error, &e.public_message()).into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/profile/email",
    request_body = UpdateEmailDto,
    responses(
        (status = 200, description = "Email updated", body = ApiResponse<EmailUpdatedDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Email used by another user")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_email(
    State(service): State<Arc<ProfileService>>,
    RequireUser(user): RequireUser,
    jar: CookieJar,
    AppJson(dto): AppJson<UpdateEmailDto>,
) -> Result<(CookieJar, Json<ApiResponse<EmailUpdatedDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    match service.update_email(&user, &dto.email).await? {
        EmailChange::Unchanged(email) => Ok((
            jar,
            Json(ApiResponse::success(
                Some(EmailUpdatedDto { email, token: None }),
                Some("Email is already up to date".to_string()),
                None,
            )),
        )),
        EmailChange::Changed(session) => {
            let token = session.token.token;
            let jar = jar.add(service.auth().tokens().session_cookie(token.clone()));
            Ok((
                jar,
                Json(ApiResponse::success(
                    Some(EmailUpdatedDto {
                        email: session.user.email,
                        token: Some(token),
                    }),
                    Some("Email updated".to_string()),
                    None,
                )),
            ))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/profile/password",
    request_body = UpdatePasswordDto,
    responses(
        (status = 200, description = "Password updated"),
        (status = 400, description = "Password too short"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_password(
    State(service): State<Arc<ProfileService>>,
    RequireUser(user): RequireUser,
    AppJson(dto): AppJson<UpdatePasswordDto>,
) -> Result<Json<ApiResponse<()>>> {
    service.update_password(&user, &dto.password).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Password updated".to_string()),
        None,
    )))
}

#[utoipa::path(
    get,
    path = "/api/users/search",
    params(UserSearchQuery),
    responses(
        (status = 200, description = "Matching users", body = ApiResponse<Vec<UserSummaryDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn search_users(
    State(service): State<Arc<ProfileService>>,
    RequireUser(_user): RequireUser,
    Query(query): Query<UserSearchQuery>,
) -> Result<Json<ApiResponse<Vec<UserSummaryDto>>>> {
    let users = service.search(&query.q).await?;
    let total = users.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(users),
        None,
        Some(Meta { total }),
    )))
}
