use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::pages::handlers as pages;
use crate::features::reports::handlers::{self, ReportState};
use crate::features::reports::services::ReportService;
use crate::modules::storage::LocalStorage;

/// Submissions need a session, the listing needs an admin session
pub fn routes(report_service: Arc<ReportService>, storage: Arc<LocalStorage>) -> Router {
    let state = ReportState {
        report_service,
        storage,
    };

    Router::new()
        .route("/raporlar", get(pages::reports_page))
        .route("/submit-risk-report", post(handlers::submit_risk_report))
        .route("/submit-event-report", post(handlers::submit_event_report))
        .route(
            "/submit-emergency-report",
            post(handlers::submit_emergency_report),
        )
        .route(
            "/api/mobile-event-report",
            post(handlers::submit_mobile_event_report),
        )
        .route("/api/reports", get(handlers::list_reports))
        .route("/check-new-reports", get(handlers::check_new_reports))
        .with_state(state)
}
