use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use minijinja::{context, Value};

use crate::features::auth::guards::{PageAdmin, PageUser};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::categories::models::CategoryKind;
use crate::features::categories::services::CategoryService;
use crate::features::precautions::services::PrecautionService;
use crate::shared::notice::{redirect_with_notice, NoticeKind, NoticeQuery};
use crate::shared::templates::render_page;

fn render(template: &str, ctx: Value) -> Response {
    match render_page(template, ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render {}: {}", template, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}

/// Render a page that needs nothing beyond the layout context
fn simple_page(
    template: &str,
    active_page: &str,
    user: Option<AuthenticatedUser>,
    notice: NoticeQuery,
) -> Response {
    render(
        template,
        context! {
            active_page => active_page,
            user => user,
            notice => notice.notice,
            notice_kind => notice.notice_kind,
        },
    )
}

pub async fn index_page(
    user: Option<AuthenticatedUser>,
    Query(notice): Query<NoticeQuery>,
) -> Response {
    simple_page("index.html", "index", user, notice)
}

pub async fn educations_page(
    user: Option<AuthenticatedUser>,
    Query(notice): Query<NoticeQuery>,
) -> Response {
    simple_page("educations.html", "education", user, notice)
}

/// Report form with one checkbox per category label.
///
/// Falls back to the default labels when the database is unreachable.
async fn report_form_page(
    service: &CategoryService,
    kind: CategoryKind,
    template: &str,
    active_page: &str,
    user: Option<AuthenticatedUser>,
    notice: NoticeQuery,
) -> Response {
    let categories = match service.list(kind).await {
        Ok(labels) => labels,
        Err(e) => {
            tracing::warn!("Using default {} categories: {}", kind, e);
            kind.defaults().iter().map(|s| s.to_string()).collect()
        }
    };

    render(
        template,
        context! {
            active_page => active_page,
            user => user,
            categories => categories,
            notice => notice.notice,
            notice_kind => notice.notice_kind,
        },
    )
}

pub async fn risk_report_page(
    State(service): State<Arc<CategoryService>>,
    user: Option<AuthenticatedUser>,
    Query(notice): Query<NoticeQuery>,
) -> Response {
    report_form_page(
        &service,
        CategoryKind::Risk,
        "riskreport.html",
        "risk",
        user,
        notice,
    )
    .await
}

pub async fn event_report_page(
    State(service): State<Arc<CategoryService>>,
    user: Option<AuthenticatedUser>,
    Query(notice): Query<NoticeQuery>,
) -> Response {
    report_form_page(
        &service,
        CategoryKind::Event,
        "eventreport.html",
        "event",
        user,
        notice,
    )
    .await
}

pub async fn login_page(
    user: Option<AuthenticatedUser>,
    Query(notice): Query<NoticeQuery>,
) -> Response {
    simple_page("login.html", "login", user, notice)
}

pub async fn register_page(
    user: Option<AuthenticatedUser>,
    Query(notice): Query<NoticeQuery>,
) -> Response {
    simple_page("register.html", "register", user, notice)
}

pub async fn profile_page(PageUser(user): PageUser, Query(notice): Query<NoticeQuery>) -> Response {
    simple_page("profile.html", "profile", Some(user), notice)
}

/// Admin report dashboard; the table itself is filled from `/api/reports`
pub async fn reports_page(
    PageAdmin(user): PageAdmin,
    Query(notice): Query<NoticeQuery>,
) -> Response {
    simple_page("reports.html", "reports", Some(user), notice)
}

pub async fn precautions_page(
    State(service): State<Arc<PrecautionService>>,
    user: Option<AuthenticatedUser>,
    Query(notice): Query<NoticeQuery>,
) -> Response {
    let precautions = match service.list().await {
        Ok(rows) => rows,
        Err(e) => {
            return redirect_with_notice("/", NoticeKind::Error, &e.public_message())
                .into_response();
        }
    };

    render(
        "precautions.html",
        context! {
            active_page => "precautions",
            user => user,
            precautions => precautions,
            notice => notice.notice,
            notice_kind => notice.notice_kind,
        },
    )
}
