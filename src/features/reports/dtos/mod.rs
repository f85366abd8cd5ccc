mod report_dto;

pub use report_dto::{
    MobileEventReportDto, NewReportsDto, ReportFilter, ReportListQuery, ReportPage,
    ReportResponseDto, SubmittedReportDto, UpperBound,
};
