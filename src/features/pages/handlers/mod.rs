pub mod page_handler;

pub use page_handler::{
    educations_page, event_report_page, index_page, login_page, precautions_page, profile_page,
    register_page, reports_page, risk_report_page,
};
