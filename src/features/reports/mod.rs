//! Risk, event and emergency reports.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/submit-risk-report` | Multipart risk report with images |
//! | POST | `/submit-event-report` | Multipart event report with images |
//! | POST | `/submit-emergency-report` | Emergency signal |
//! | POST | `/api/mobile-event-report` | JSON event report |
//! | GET | `/api/reports` | Filtered listing (admin) |
//! | GET | `/check-new-reports` | Reports from the last seconds (admin) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ReportService;
