use std::sync::Arc;

use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, Utc};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::{RequireAdmin, RequireUser};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::reports::dtos::{
    MobileEventReportDto, NewReportsDto, ReportListQuery, ReportPage, ReportResponseDto,
    SubmittedReportDto,
};
use crate::features::reports::handlers::report_form::{store_images, ReportForm};
use crate::features::reports::models::{EventSubmission, NewReport, RiskSubmission};
use crate::features::reports::services::ReportService;
use crate::modules::storage::LocalStorage;
use crate::shared::constants::{
    NEW_REPORT_WINDOW_SECS, REPORT_TYPE_EMERGENCY, REPORT_TYPE_EVENT, REPORT_TYPE_RISK,
};
use crate::shared::types::{ApiResponse, Page};

/// State for report handlers
#[derive(Clone)]
pub struct ReportState {
    pub report_service: Arc<ReportService>,
    pub storage: Arc<LocalStorage>,
}

type Created = (StatusCode, Json<ApiResponse<SubmittedReportDto>>);

async fn save_report(
    state: &ReportState,
    user: &AuthenticatedUser,
    report_type: &str,
    details: Option<String>,
    witnesses: Option<String>,
    department: Option<String>,
    images: Vec<String>,
) -> Result<Created> {
    let id = state
        .report_service
        .create(NewReport {
            user_id: user.user_id,
            report_type: report_type.to_string(),
            fullname: user.fullname.clone(),
            details,
            witnesses,
            department,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(SubmittedReportDto {
                id,
                report_type: report_type.to_string(),
                images,
            }),
            Some("Report submitted".to_string()),
            None,
        )),
    ))
}

/// Submit a risk report with optional images
#[utoipa::path(
    post,
    path = "/submit-risk-report",
    request_body(
        content_type = "multipart/form-data",
        description = "department, risk_type[] (repeated), details, images[] (up to 5)",
    ),
    responses(
        (status = 201, description = "Report stored", body = ApiResponse<SubmittedReportDto>),
        (status = 400, description = "Missing or invalid fields"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "reports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn submit_risk_report(
    State(state): State<ReportState>,
    RequireUser(user): RequireUser,
    multipart: Multipart,
) -> Result<Created> {
    let form = ReportForm::from_multipart(multipart).await?;
    let submission = RiskSubmission::new(
        form.text("department"),
        form.list("risk_type"),
        form.text("details"),
    )?;

    let images = store_images(&state.storage, user.user_id, form.into_images()).await;
    let details = submission.compose_details(&images);

    save_report(
        &state,
        &user,
        REPORT_TYPE_RISK,
        Some(details),
        None,
        Some(submission.department),
        images,
    )
    .await
}

/// Submit an event report with optional images
#[utoipa::path(
    post,
    path = "/submit-event-report",
    request_body(
        content_type = "multipart/form-data",
        description = "department, event_type[] (repeated), location, details, witnesses, images[] (up to 5)",
    ),
    responses(
        (status = 201, description = "Report stored", body = ApiResponse<SubmittedReportDto>),
        (status = 400, description = "Missing or invalid fields"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "reports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn submit_event_report(
    State(state): State<ReportState>,
    RequireUser(user): RequireUser,
    multipart: Multipart,
) -> Result<Created> {
    let form = ReportForm::from_multipart(multipart).await?;
    let submission = EventSubmission::new(
        form.text("department"),
        form.list("event_type"),
        form.text("location"),
        form.text("details"),
        form.text("witnesses"),
        true,
    )?;

    let images = store_images(&state.storage, user.user_id, form.into_images()).await;
    let details = submission.compose_details(&images);

    save_report(
        &state,
        &user,
        REPORT_TYPE_EVENT,
        Some(details),
        submission.witnesses,
        Some(submission.department),
        images,
    )
    .await
}

/// One-tap emergency signal
#[utoipa::path(
    post,
    path = "/submit-emergency-report",
    responses(
        (status = 201, description = "Signal stored", body = ApiResponse<SubmittedReportDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "reports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn submit_emergency_report(
    State(state): State<ReportState>,
    RequireUser(user): RequireUser,
) -> Result<Created> {
    tracing::warn!("Emergency signal from user {}", user.user_id);
    save_report(
        &state,
        &user,
        REPORT_TYPE_EMERGENCY,
        None,
        None,
        None,
        Vec::new(),
    )
    .await
}

/// Event report from the mobile client
#[utoipa::path(
    post,
    path = "/api/mobile-event-report",
    request_body = MobileEventReportDto,
    responses(
        (status = 201, description = "Report stored", body = ApiResponse<SubmittedReportDto>),
        (status = 400, description = "Missing or invalid fields"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "reports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn submit_mobile_event_report(
    State(state): State<ReportState>,
    RequireUser(user): RequireUser,
    AppJson(dto): AppJson<MobileEventReportDto>,
) -> Result<Created> {
    let submission = EventSubmission::new(
        dto.department.as_deref(),
        &dto.event_types,
        dto.location.as_deref(),
        dto.details.as_deref(),
        dto.witnesses.as_deref(),
        false,
    )?;

    let photos: Vec<String> = dto
        .photos
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();
    let details = submission.compose_details(&photos);

    save_report(
        &state,
        &user,
        REPORT_TYPE_EVENT,
        Some(details),
        submission.witnesses,
        Some(submission.department),
        photos,
    )
    .await
}

/// Paginated, filterable report listing (admin)
#[utoipa::path(
    get,
    path = "/api/reports",
    params(ReportListQuery),
    responses(
        (status = 200, description = "One page of reports, newest first", body = ApiResponse<Page<ReportResponseDto>>),
        (status = 400, description = "Invalid date filter"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    tag = "reports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_reports(
    State(state): State<ReportState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<ReportListQuery>,
) -> Result<Json<ApiResponse<ReportPage>>> {
    let filter = query.filter()?;
    let page = query.page();
    let (limit, offset) = (page.limit(), page.offset());

    let (rows, total) = state.report_service.list(&filter, limit, offset).await?;
    let items: Vec<ReportResponseDto> = rows.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(
        Some(ReportPage::new(items, total, offset)),
        None,
        None,
    )))
}

/// Reports from the last few seconds, polled by the admin page
#[utoipa::path(
    get,
    path = "/check-new-reports",
    responses(
        (status = 200, description = "Recently submitted reports", body = ApiResponse<NewReportsDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    tag = "reports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn check_new_reports(
    State(state): State<ReportState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<ApiResponse<NewReportsDto>>> {
    let since = Utc::now() - Duration::seconds(NEW_REPORT_WINDOW_SECS);
    let rows = state.report_service.submitted_since(since).await?;
    let new_reports: Vec<ReportResponseDto> = rows.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(
        Some(NewReportsDto {
            count: new_reports.len(),
            new_reports,
        }),
        None,
        None,
    )))
}
