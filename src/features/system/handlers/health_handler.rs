use axum::{extract::State, http::StatusCode};
use sqlx::PgPool;

/// Liveness check
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Process is up")),
    tag = "system"
)]
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Round trip to the database
#[utoipa::path(
    get,
    path = "/db-ping",
    responses(
        (status = 200, description = "Server version and database name", body = String),
        (status = 500, description = "Database unreachable", body = String)
    ),
    tag = "system"
)]
pub async fn db_ping(State(pool): State<PgPool>) -> (StatusCode, String) {
    let row: Result<(String, String), sqlx::Error> =
        sqlx::query_as("SELECT version(), current_database()")
            .fetch_one(&pool)
            .await;

    match row {
        Ok((version, database)) => (StatusCode::OK, format!("OK {} | DB={}", version, database)),
        Err(e) => {
            tracing::error!("Database ping failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("DB FAIL {}", e),
            )
        }
    }
}
