/// Default page size for report listings
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// SESSION
// =============================================================================

/// Cookie carrying the signed session token for browser clients
pub const SESSION_COOKIE: &str = "session";

// =============================================================================
// REPORTS
// =============================================================================

/// At most this many image parts are considered per submission
pub const MAX_REPORT_IMAGES: usize = 5;

/// Width of `reports.department`, counted in characters
pub const MAX_DEPARTMENT_LEN: usize = 50;

/// Minimum length of the free-text details of a report
pub const MIN_REPORT_DETAILS_LEN: usize = 5;

/// Window used by the admin "new reports" poller
pub const NEW_REPORT_WINDOW_SECS: i64 = 10;

pub const REPORT_TYPE_RISK: &str = "Risk Bildirim Raporlaması";
pub const REPORT_TYPE_EVENT: &str = "Olay Bildirim Raporlaması";
pub const REPORT_TYPE_EMERGENCY: &str = "Acil Yardım Sinyali";

// =============================================================================
// USERS
// =============================================================================

/// Minimum password length for the JSON profile and mobile endpoints
pub const MIN_PASSWORD_LEN: usize = 6;

/// Shortest query accepted by the user search
pub const MIN_USER_SEARCH_LEN: usize = 2;

/// Maximum number of rows returned by the user search
pub const USER_SEARCH_LIMIT: i64 = 10;
