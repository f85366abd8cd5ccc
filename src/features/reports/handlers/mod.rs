pub mod report_form;
pub mod report_handler;

pub use report_handler::{
    __path_check_new_reports, __path_list_reports, __path_submit_emergency_report,
    __path_submit_event_report, __path_submit_mobile_event_report, __path_submit_risk_report,
    check_new_reports, list_reports, submit_emergency_report, submit_event_report,
    submit_mobile_event_report, submit_risk_report, ReportState,
};
