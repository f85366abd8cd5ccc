mod report;
mod submission;

pub use report::{NewReport, ReportRow};
pub use submission::{EventSubmission, RiskSubmission};
