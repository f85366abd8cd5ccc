use std::sync::Arc;
use std::time::Duration;

use axum::{extract::Request, middleware::Next, response::Response, Router};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::core::config::SessionConfig;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::TokenService;

pub const TEST_SESSION_SECRET: &str = "test-session-secret-with-enough-bytes-0123";

pub fn test_session_config() -> SessionConfig {
    SessionConfig {
        secret: TEST_SESSION_SECRET.to_string(),
        ttl: Duration::from_secs(3600),
        cookie_secure: false,
    }
}

pub fn test_token_service() -> TokenService {
    TokenService::new(&test_session_config())
}

pub fn test_tokens() -> Arc<TokenService> {
    Arc::new(test_token_service())
}

/// A pool that never connects until a query runs.
///
/// Router tests only exercise paths that reject before touching the database.
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy("postgres://postgres@127.0.0.1:1/unused")
        .expect("lazy pool url should parse")
}

pub fn regular_user() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: 7,
        fullname: "Ayşe Yılmaz".to_string(),
        email: "ayse@example.com".to_string(),
        is_admin: false,
    }
}

pub fn admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: 1,
        fullname: "Mehmet Demir".to_string(),
        email: "admin@example.com".to_string(),
        is_admin: true,
    }
}

/// Bearer header value for the given user
pub fn bearer_for(user: &AuthenticatedUser) -> String {
    let issued = test_token_service()
        .issue(user)
        .expect("token should be issued");
    format!("Bearer {}", issued.token)
}

async fn inject_admin_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(admin_user());
    next.run(request).await
}

async fn inject_regular_user_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(regular_user());
    next.run(request).await
}

pub fn with_admin_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_admin_middleware))
}

pub fn with_regular_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_regular_user_middleware))
}
