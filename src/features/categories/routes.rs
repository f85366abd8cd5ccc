use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Listing is public, changes need an admin session
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/api/categories",
            get(handlers::list_categories).post(handlers::add_category),
        )
        .route(
            "/api/categories/bulk-delete",
            post(handlers::bulk_delete_categories),
        )
        .route(
            "/api/mobile-event-categories",
            get(handlers::list_mobile_event_categories),
        )
        .with_state(service)
}
