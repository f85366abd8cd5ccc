use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::categories::{
    dtos as categories_dtos, handlers as categories_handlers, models as categories_models,
};
use crate::features::precautions::{dtos as precautions_dtos, handlers as precautions_handlers};
use crate::features::reports::{dtos as reports_dtos, handlers as reports_handlers};
use crate::features::system::handlers as system_handlers;
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::shared::types::{ApiResponse, Meta, Page};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::mobile_login,
        auth::handlers::mobile_register,
        auth::handlers::check_admin_status,
        // Users
        users_handlers::update_email,
        users_handlers::update_password,
        users_handlers::search_users,
        // Precautions
        precautions_handlers::list_precautions,
        precautions_handlers::submit_precaution,
        precautions_handlers::delete_precautions,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::list_mobile_event_categories,
        categories_handlers::add_category,
        categories_handlers::bulk_delete_categories,
        // Reports
        reports_handlers::submit_risk_report,
        reports_handlers::submit_event_report,
        reports_handlers::submit_emergency_report,
        reports_handlers::submit_mobile_event_report,
        reports_handlers::list_reports,
        reports_handlers::check_new_reports,
        // System
        system_handlers::health_check,
        system_handlers::db_ping,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::AuthenticatedUser,
            auth::dtos::RegisterRequestDto,
            auth::dtos::LoginRequestDto,
            auth::dtos::AuthResponseDto,
            auth::dtos::AuthUserDto,
            auth::dtos::AdminStatusDto,
            ApiResponse<auth::dtos::AuthResponseDto>,
            ApiResponse<auth::dtos::AdminStatusDto>,
            // Users
            users_dtos::UpdateEmailDto,
            users_dtos::UpdatePasswordDto,
            users_dtos::EmailUpdatedDto,
            users_dtos::UserSummaryDto,
            ApiResponse<users_dtos::EmailUpdatedDto>,
            ApiResponse<Vec<users_dtos::UserSummaryDto>>,
            // Precautions
            precautions_dtos::CreatePrecautionDto,
            precautions_dtos::DeletePrecautionsDto,
            precautions_dtos::DeletedPrecautionsDto,
            precautions_dtos::PrecautionResponseDto,
            ApiResponse<Vec<precautions_dtos::PrecautionResponseDto>>,
            ApiResponse<precautions_dtos::PrecautionResponseDto>,
            ApiResponse<precautions_dtos::DeletedPrecautionsDto>,
            // Categories
            categories_models::CategoryKind,
            categories_dtos::AddCategoryDto,
            categories_dtos::BulkDeleteCategoriesDto,
            categories_dtos::CategoryAddedDto,
            categories_dtos::CategoriesDeletedDto,
            ApiResponse<Vec<String>>,
            ApiResponse<categories_dtos::CategoryAddedDto>,
            ApiResponse<categories_dtos::CategoriesDeletedDto>,
            // Reports
            reports_dtos::ReportResponseDto,
            reports_dtos::NewReportsDto,
            reports_dtos::SubmittedReportDto,
            reports_dtos::MobileEventReportDto,
            Page<reports_dtos::ReportResponseDto>,
            ApiResponse<Page<reports_dtos::ReportResponseDto>>,
            ApiResponse<reports_dtos::NewReportsDto>,
            ApiResponse<reports_dtos::SubmittedReportDto>,
        )
    ),
    tags(
        (name = "auth", description = "Registration, login and session tokens"),
        (name = "users", description = "Profile management and user search"),
        (name = "precautions", description = "Safety advisories (admin managed)"),
        (name = "categories", description = "Risk and event category labels"),
        (name = "reports", description = "Risk, event and emergency reports"),
        (name = "system", description = "Health checks"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Safety Reports API",
        version = "0.1.0",
        description = "API documentation for the workplace safety reporting service",
    )
)]
pub struct ApiDoc;

/// Adds the bearer session token scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_report_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/api/reports", "/submit-risk-report", "/api/precautions", "/db-ping"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }

    #[test]
    fn test_info_modifier_overrides_title() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Custom".to_string(),
            version: "9.9.9".to_string(),
            description: "d".to_string(),
        }
        .modify(&mut doc);
        assert_eq!(doc.info.title, "Custom");
        assert_eq!(doc.info.version, "9.9.9");
    }
}
