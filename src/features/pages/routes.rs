use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::categories::services::CategoryService;
use crate::features::pages::handlers;

/// Public pages without their own feature. Pages tied to a feature are routed there.
pub fn routes(categories: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/", get(handlers::index_page))
        .route("/egitimler", get(handlers::educations_page))
        .route("/risk-bildir", get(handlers::risk_report_page))
        .route("/olay-bildir", get(handlers::event_report_page))
        .with_state(categories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::models::CategoryKind;
    use crate::shared::test_helpers::{lazy_pool, with_admin_auth, with_regular_auth};
    use axum::http::StatusCode;
    use axum_test::TestServer;

    fn router() -> Router {
        routes(Arc::new(CategoryService::new(lazy_pool())))
    }

    #[tokio::test]
    async fn test_public_pages_render() {
        let server = TestServer::new(router()).unwrap();
        for path in ["/", "/egitimler", "/risk-bildir", "/olay-bildir"] {
            server.get(path).await.assert_status(StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn test_notice_is_shown() {
        let server = TestServer::new(router()).unwrap();
        let response = server
            .get("/")
            .add_query_param("notice", "Kayıt başarılı")
            .add_query_param("notice_kind", "success")
            .await;
        response.assert_status(StatusCode::OK);
        assert!(response.text().contains("Kayıt başarılı"));
    }

    #[tokio::test]
    async fn test_layout_shows_logged_in_user() {
        let server = TestServer::new(with_admin_auth(router())).unwrap();
        let response = server.get("/").await;
        assert!(response.text().contains("Mehmet Demir"));
    }

    #[tokio::test]
    async fn test_report_forms_list_category_checkboxes() {
        let server = TestServer::new(router()).unwrap();

        let risk = server.get("/risk-bildir").await.text();
        for label in CategoryKind::Risk.defaults() {
            assert!(risk.contains(&format!(
                r#"<input type="checkbox" name="risk_type[]" value="{}">"#,
                label
            )));
        }

        let event = server.get("/olay-bildir").await.text();
        assert!(event.contains(r#"name="event_type[]""#));
        assert!(!event.contains(r#"name="risk_type[]""#));
    }

    #[tokio::test]
    async fn test_layout_loads_page_script() {
        let server = TestServer::new(with_regular_auth(router())).unwrap();
        let html = server.get("/").await.text();
        assert!(html.contains(r#"<script src="/static/script.js" defer></script>"#));
        assert!(html.contains(r#"data-logged-in="1""#));
        assert!(!html.contains("notification-container"));
    }

    #[tokio::test]
    async fn test_admin_layout_has_report_alert() {
        let server = TestServer::new(with_admin_auth(router())).unwrap();
        let html = server.get("/").await.text();
        assert!(html.contains(r#"id="notification-container""#));
    }
}
