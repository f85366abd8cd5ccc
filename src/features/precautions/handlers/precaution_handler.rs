use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{is_json_request, AppJson, JsonOrForm};
use crate::features::auth::guards::RequireAdmin;
use crate::features::precautions::dtos::{
    CreatePrecautionDto, DeletePrecautionsDto, DeletedPrecautionsDto, PrecautionResponseDto,
};
use crate::features::precautions::services::PrecautionService;
use crate::shared::notice::{redirect_with_notice, NoticeKind};
use crate::shared::types::{ApiResponse, Meta};

#[utoipa::path(
    get,
    path = "/api/precautions",
    responses(
        (status = 200, description = "All precautions ordered by id", body = ApiResponse<Vec<PrecautionResponseDto>>),
    ),
    tag = "precautions"
)]
pub async fn list_precautions(
    State(service): State<Arc<PrecautionService>>,
) -> Result<Json<ApiResponse<Vec<PrecautionResponseDto>>>> {
    let precautions = service.list().await?;
    let total = precautions.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(precautions),
        None,
        Some(Meta { total }),
    )))
}

/// Add a precaution (admin).
///
/// JSON callers get the created row. A browser form post is redirected back to
/// `/precautions` with the outcome as a notice.
#[utoipa::path(
    post,
    path = "/submit-precautions",
    request_body = CreatePrecautionDto,
    responses(
        (status = 201, description = "Precaution created", body = ApiResponse<PrecautionResponseDto>),
        (status = 303, description = "Form post redirected to /precautions with a notice"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 409, description = "Duplicate title")
    ),
    tag = "precautions",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn submit_precaution(
    State(service): State<Arc<PrecautionService>>,
    RequireAdmin(_admin): RequireAdmin,
    headers: HeaderMap,
    JsonOrForm(dto): JsonOrForm<CreatePrecautionDto>,
) -> Response {
    let result = create_precaution(&service, dto).await;

    if is_json_request(&headers) {
        return match result {
            Ok(precaution) => (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    Some(precaution),
                    Some("Precaution added".to_string()),
                    None,
                )),
            )
                .into_response(),
            Err(e) => e.into_response(),
        };
    }

    let redirect = match result {
        Ok(_) => redirect_with_notice("/precautions", NoticeKind::Success, "Precaution added"),
        Err(e) => redirect_with_notice("/precautions", NoticeKind::Error, &e.public_message()),
    };
    redirect.into_response()
}

async fn create_precaution(
    service: &PrecautionService,
    dto: CreatePrecautionDto,
) -> Result<PrecautionResponseDto> {
    let dto = dto.trimmed();
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.create(dto).await
}

/// Delete precautions by id (admin)
#[utoipa::path(
    post,
    path = "/delete-precautions",
    request_body = DeletePrecautionsDto,
    responses(
        (status = 200, description = "Existing ids deleted", body = ApiResponse<DeletedPrecautionsDto>),
        (status = 400, description = "Empty id list"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "None of the ids exist")
    ),
    tag = "precautions",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_precautions(
    State(service): State<Arc<PrecautionService>>,
    RequireAdmin(_admin): RequireAdmin,
    AppJson(dto): AppJson<DeletePrecautionsDto>,
) -> Result<Json<ApiResponse<DeletedPrecautionsDto>>> {
    let deleted_count = service.delete_many(&dto.ids).await?;
    Ok(Json(ApiResponse::success(
        Some(DeletedPrecautionsDto { deleted_count }),
        Some(format!("{} precautions deleted", deleted_count)),
        None,
    )))
}
