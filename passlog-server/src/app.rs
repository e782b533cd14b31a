//! Demo application: three illustrative endpoints behind the request
//! logger. The endpoints are consumers of the logging middleware, not part
//! of its interface.

use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use passlog_middleware::log_requests;
use passlog_sink::LogSink;
use serde_json::json;
use std::sync::Arc;

/// Build the demo router with the request logger installed.
pub fn build_app(sink: Arc<LogSink>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/items/{item_id}", get(read_item))
        .route("/error", get(trigger_error))
        .layer(middleware::from_fn_with_state(sink, log_requests))
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({"message": "Hello World"}))
}

async fn read_item(Path(item_id): Path<i64>) -> Response {
    if item_id < 0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Item ID must be positive"})),
        )
            .into_response();
    }
    Json(json!({"item_id": item_id, "name": format!("Item {item_id}")})).into_response()
}

/// Fails without producing a response; the request logger converts the
/// panic into a generic 500.
async fn trigger_error() -> Response {
    panic!("Internal server error example")
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request};
    use passlog_core::SinkConfig;
    use tower::ServiceExt; // .oneshot()

    fn console_app() -> Router {
        let sink = Arc::new(LogSink::new(&SinkConfig::default()).unwrap());
        build_app(sink)
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn root_returns_hello_world() {
        let resp = console_app().oneshot(get_req("/")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, json!({"message": "Hello World"}));
    }

    #[tokio::test]
    async fn read_item_returns_item_payload() {
        let resp = console_app().oneshot(get_req("/items/7")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            body_json(resp).await,
            json!({"item_id": 7, "name": "Item 7"})
        );
    }

    #[tokio::test]
    async fn negative_item_id_is_rejected_with_400() {
        let resp = console_app().oneshot(get_req("/items/-1")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp).await,
            json!({"detail": "Item ID must be positive"})
        );
    }

    #[tokio::test]
    async fn error_route_is_recovered_to_generic_500() {
        let resp = console_app().oneshot(get_req("/error")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(resp).await,
            json!({"detail": "Internal server error"})
        );
    }

    #[tokio::test]
    async fn requests_land_in_the_configured_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.log");
        let sink = Arc::new(LogSink::new(&SinkConfig::default().with_file(&path)).unwrap());
        let app = build_app(sink);

        app.oneshot(get_req("/")).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let entry: serde_json::Value =
            serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert_eq!(entry["path"], "/");
        assert_eq!(entry["status"], 200);
    }
}
