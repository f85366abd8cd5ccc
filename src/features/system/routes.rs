use axum::{routing::get, Router};
use sqlx::PgPool;

use crate::features::system::handlers;

pub fn routes(pool: PgPool) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/db-ping", get(handlers::db_ping))
        .with_state(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::lazy_pool;
    use axum::http::StatusCode;
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_health_is_ok() {
        let server = TestServer::new(routes(lazy_pool())).unwrap();
        let response = server.get("/health").await;
        response.assert_status_ok();
        assert!(response.text().is_empty());
    }

    #[tokio::test]
    async fn test_db_ping_reports_failure() {
        let server = TestServer::new(routes(lazy_pool())).unwrap();
        let response = server.get("/db-ping").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.text().starts_with("DB FAIL"));
    }
}
