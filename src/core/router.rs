use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    Router,
};
use sqlx::PgPool;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::Config;
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::auth::{routes as auth_routes, AuthService, TokenService};
use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::pages::routes as pages_routes;
use crate::features::precautions::{routes as precautions_routes, PrecautionService};
use crate::features::reports::{routes as reports_routes, ReportService};
use crate::features::system::routes as system_routes;
use crate::features::users::{routes as users_routes, ProfileService};
use crate::modules::storage::LocalStorage;

/// Everything the routers hand to their handlers
pub struct AppServices {
    pub pool: PgPool,
    pub tokens: Arc<TokenService>,
    pub auth: Arc<AuthService>,
    pub profile: Arc<ProfileService>,
    pub precautions: Arc<PrecautionService>,
    pub categories: Arc<CategoryService>,
    pub reports: Arc<ReportService>,
    pub storage: Arc<LocalStorage>,
}

fn swagger_router(config: &Config) -> Router {
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger =
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));

    if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        swagger.layer(from_fn(middleware::basic_auth_middleware(Arc::new(
            credentials,
        ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        swagger
    }
}

/// Assemble feature routers and the shared middleware stack.
///
/// The session middleware runs for every route and only attaches the caller, so guards on
/// individual handlers decide between anonymous, user and admin access.
pub fn build_router(config: &Config, services: AppServices) -> Router {
    let app_routes = Router::new()
        .merge(pages_routes::routes(Arc::clone(&services.categories)))
        .merge(auth_routes::routes(services.auth))
        .merge(users_routes::routes(services.profile))
        .merge(precautions_routes::routes(services.precautions))
        .merge(categories_routes::routes(services.categories))
        .merge(reports_routes::routes(services.reports, services.storage))
        .merge(system_routes::routes(services.pool))
        .nest_service("/static", ServeDir::new(&config.storage.static_dir))
        .layer(from_fn_with_state(
            services.tokens,
            middleware::session_middleware,
        ))
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size));

    Router::new()
        .merge(swagger_router(config))
        .merge(app_routes)
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}
