use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{
    AdminStatusDto, AuthResponseDto, LoginRequestDto, RegisterFormDto, RegisterRequestDto,
};
use crate::features::auth::guards::RequireUser;
use crate::features::auth::services::AuthService;
use crate::shared::notice::{redirect_with_notice, NoticeKind};
use crate::shared::types::ApiResponse;

/// Registration from the HTML form
pub async fn register_form(
    State(service): State<Arc<AuthService>>,
    Form(dto): Form<RegisterFormDto>,
) -> Redirect {
    if let Err(e) = dto.validate() {
        tracing::debug!("Registration form rejected: {}", e);
        return redirect_with_notice(
            "/register",
            NoticeKind::Error,
            "Please fill in your full name, a valid email and a password",
        );
    }

    match service
        .register(&dto.fullname, &dto.email, &dto.password)
        .await
    {
        Ok(_) => redirect_with_notice(
            "/login",
            NoticeKind::Success,
            "Registration successful, you can now log in",
        ),
        Err(e) => redirect_with_notice("/register", NoticeKind::Error, &e.public_message()),
    }
}

/// Login from the HTML form, the token lands in the session cookie
pub async fn login_form(
    State(service): State<Arc<AuthService>>,
    jar: CookieJar,
    Form(dto): Form<LoginRequestDto>,
) -> Response {
    if dto.validate().is_err() {
        return redirect_with_notice(
            "/login",
            NoticeKind::Error,
            "Email and password are required",
        )
        .into_response();
    }

    match service.login(&dto.email, &dto.password).await {
        Ok(session) => {
            let jar = jar.add(service.tokens().session_cookie(session.token.token));
            (jar, Redirect::to("/")).into_response()
        }
        Err(e) => {
            redirect_with_notice("/login", NoticeKind::Error, &e.public_message()).into_response()
        }
    }
}

pub async fn logout(State(service): State<Arc<AuthService>>, jar: CookieJar) -> Response {
    let jar = jar.remove(service.tokens().removal_cookie());
    (jar, Redirect::to("/")).into_response()
}

/// Login for the mobile client
#[utoipa::path(
    post,
    path = "/api/mobile-login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn mobile_login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<AuthResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let session = service.login(&dto.email, &dto.password).await?;
    Ok(Json(ApiResponse::success(
        Some(session.into_response_dto()),
        Some("Login successful".to_string()),
        None,
    )))
}

/// Register a new account from the mobile client
#[utoipa::path(
    post,
    path = "/api/mobile-register",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "User registered successfully", body = ApiResponse<AuthResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    ),
    tag = "auth"
)]
pub async fn mobile_register(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<RegisterRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let session = service
        .register_session(&dto.fullname, &dto.email, &dto.password)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(session.into_response_dto()),
            Some("Registration successful".to_string()),
            None,
        )),
    ))
}

/// Re-read the admin flag; a changed flag comes back with a new token
#[utoipa::path(
    get,
    path = "/check-admin-status",
    responses(
        (status = 200, description = "Current admin flag", body = ApiResponse<AdminStatusDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn check_admin_status(
    State(service): State<Arc<AuthService>>,
    RequireUser(user): RequireUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<AdminStatusDto>>)> {
    let (status, session) = service.refresh_admin_status(&user).await?;

    let jar = match session {
        Some(session) => jar.add(service.tokens().session_cookie(session.token.token)),
        None => jar,
    };

    Ok((jar, Json(ApiResponse::success(Some(status), None, None))))
}
