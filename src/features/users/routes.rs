use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::pages::handlers as pages;
use crate::features::users::handlers;
use crate::features::users::services::ProfileService;

pub fn routes(service: Arc<ProfileService>) -> Router {
    Router::new()
        .route("/profile", get(pages::profile_page))
        .route("/update-profile", post(handlers::update_profile_form))
        .route("/api/profile/email", post(handlers::update_email))
        .route("/api/profile/password", post(handlers::update_password))
        .route("/api/users/search", get(handlers::search_users))
        .with_state(service)
}
