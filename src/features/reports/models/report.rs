use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Report row joined with the submitting user
#[derive(Debug, Clone, FromRow)]
pub struct ReportRow {
    pub id: i64,
    pub user_id: Option<i32>,
    #[sqlx(rename = "type")]
    pub report_type: Option<String>,
    pub date: DateTime<Utc>,
    /// Name snapshot taken at submission
    pub fullname: Option<String>,
    /// Current name of the submitting user
    pub reporter_name: Option<String>,
    pub details: Option<String>,
    pub witnesses: Option<String>,
    pub department: Option<String>,
}

/// Data for inserting a report
#[derive(Debug, Clone)]
pub struct NewReport {
    pub user_id: i32,
    pub report_type: String,
    pub fullname: String,
    pub details: Option<String>,
    pub witnesses: Option<String>,
    pub department: Option<String>,
}
