use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;
use crate::features::pages::handlers as pages;

pub fn routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route(
            "/register",
            get(pages::register_page).post(handlers::register_form),
        )
        .route("/login", get(pages::login_page).post(handlers::login_form))
        .route("/logout", get(handlers::logout))
        .route("/api/mobile-login", post(handlers::mobile_login))
        .route("/api/mobile-register", post(handlers::mobile_register))
        .route("/check-admin-status", get(handlers::check_admin_status))
        .with_state(service)
}
