mod precaution_service;

pub use precaution_service::PrecautionService;
