use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::error::{AppError, Result};
use crate::features::reports::models::ReportRow;
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::types::{OffsetQuery, Page};
use crate::shared::validation::non_blank;

/// Query for the admin report listing
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ReportListQuery {
    /// Number of items to return (default: 20, clamped to 1..=100)
    pub limit: Option<i64>,
    /// Number of items to skip (default: 0)
    pub offset: Option<i64>,
    /// Case-insensitive part of the reporter's name
    pub q: Option<String>,
    /// Exact report type, ignoring case
    #[serde(rename = "type")]
    pub report_type: Option<String>,
    /// Inclusive lower bound, `YYYY-MM-DD` or an ISO 8601 timestamp
    pub date_from: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD` or an ISO 8601 timestamp
    pub date_to: Option<String>,
}

impl ReportListQuery {
    pub fn page(&self) -> OffsetQuery {
        OffsetQuery {
            limit: self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            offset: self.offset.unwrap_or(0),
        }
    }

    pub fn filter(&self) -> Result<ReportFilter> {
        Ok(ReportFilter {
            name: non_blank(self.q.as_deref()),
            report_type: non_blank(self.report_type.as_deref()),
            from: non_blank(self.date_from.as_deref())
                .map(|v| parse_lower_bound(&v))
                .transpose()?,
            to: non_blank(self.date_to.as_deref())
                .map(|v| parse_upper_bound(&v))
                .transpose()?,
        })
    }
}

/// Upper end of a date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpperBound {
    /// `date <= t`, from a full timestamp
    Inclusive(DateTime<Utc>),
    /// `date < t`, from a calendar day (t is the next midnight)
    Before(DateTime<Utc>),
}

/// Parsed listing filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub name: Option<String>,
    pub report_type: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<UpperBound>,
}

enum ParsedDate {
    Day(NaiveDate),
    Instant(DateTime<Utc>),
}

fn parse_date(value: &str) -> Result<ParsedDate> {
    if let Ok(day) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(ParsedDate::Day(day));
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ParsedDate::Instant(ts.with_timezone(&Utc)));
    }
    // ISO timestamp without offset, taken as UTC
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(ParsedDate::Instant(ts.and_utc()));
        }
    }

    Err(AppError::BadRequest(format!(
        "Invalid date '{}', expected YYYY-MM-DD or an ISO 8601 timestamp",
        value
    )))
}

fn parse_lower_bound(value: &str) -> Result<DateTime<Utc>> {
    Ok(match parse_date(value)? {
        ParsedDate::Day(day) => day.and_time(chrono::NaiveTime::MIN).and_utc(),
        ParsedDate::Instant(ts) => ts,
    })
}

fn parse_upper_bound(value: &str) -> Result<UpperBound> {
    Ok(match parse_date(value)? {
        ParsedDate::Day(day) => UpperBound::Before(
            (day.and_time(chrono::NaiveTime::MIN) + Duration::days(1)).and_utc(),
        ),
        ParsedDate::Instant(ts) => UpperBound::Inclusive(ts),
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: i64,
    pub user_id: Option<i32>,
    #[serde(rename = "type")]
    pub report_type: Option<String>,
    pub date: DateTime<Utc>,
    pub fullname: Option<String>,
    /// Current account name, falls back to the snapshot
    pub reporter_name: Option<String>,
    pub details: Option<String>,
    pub witnesses: Option<String>,
    pub department: Option<String>,
}

impl From<ReportRow> for ReportResponseDto {
    fn from(row: ReportRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            report_type: row.report_type,
            date: row.date,
            reporter_name: row.reporter_name.or_else(|| row.fullname.clone()),
            fullname: row.fullname,
            details: row.details,
            witnesses: row.witnesses,
            department: row.department,
        }
    }
}

/// One page of the admin report listing
pub type ReportPage = Page<ReportResponseDto>;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NewReportsDto {
    pub new_reports: Vec<ReportResponseDto>,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmittedReportDto {
    pub id: i64,
    #[serde(rename = "type")]
    pub report_type: String,
    /// Public URLs of the images that were stored
    pub images: Vec<String>,
}

/// Event report from the mobile client. Photos are already-uploaded URLs.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct MobileEventReportDto {
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub event_types: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub witnesses: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
}
