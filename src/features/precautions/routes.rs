use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::pages::handlers as pages;
use crate::features::precautions::handlers;
use crate::features::precautions::services::PrecautionService;

pub fn routes(service: Arc<PrecautionService>) -> Router {
    Router::new()
        .route("/precautions", get(pages::precautions_page))
        .route("/api/precautions", get(handlers::list_precautions))
        .route("/submit-precautions", post(handlers::submit_precaution))
        .route("/delete-precautions", post(handlers::delete_precautions))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{lazy_pool, with_admin_auth};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    fn router() -> Router {
        routes(Arc::new(PrecautionService::new(lazy_pool())))
    }

    #[tokio::test]
    async fn test_submit_requires_login() {
        let server = TestServer::new(router()).unwrap();
        server
            .post("/submit-precautions")
            .json(&json!({ "title": "Baret kullanımı", "explanation": "Sahada baret zorunludur" }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_short_title_is_rejected_before_insert() {
        let server = TestServer::new(with_admin_auth(router())).unwrap();
        let response = server
            .post("/submit-precautions")
            .json(&json!({ "title": "Kask", "explanation": "Sahada baret zorunludur" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_form_post_redirects_back_with_error_notice() {
        let server = TestServer::new(with_admin_auth(router())).unwrap();
        let response = server
            .post("/submit-precautions")
            .form(&[("title", "Kask"), ("explanation", "Sahada baret zorunludur")])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        let location = response.header("location");
        let location = location.to_str().unwrap();
        assert!(location.starts_with("/precautions?notice="));
        assert!(location.ends_with("notice_kind=error"));
    }

    #[tokio::test]
    async fn test_admin_delete_with_empty_ids_is_bad_request() {
        let server = TestServer::new(with_admin_auth(router())).unwrap();
        server
            .post("/delete-precautions")
            .json(&json!({ "ids": [] }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_takes_json_only() {
        let server = TestServer::new(with_admin_auth(router())).unwrap();
        let response = server
            .post("/delete-precautions")
            .form(&[("ids", "1"), ("ids", "2")])
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Missing JSON content type"));
    }
}
