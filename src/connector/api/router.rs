use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::domain::{ConversionResult, DomainError};

use super::container::Container;
use super::controller::{ConvertController, PageController};

type SharedContainer = Arc<Container>;

/// Form fields posted by the HTML page.
#[derive(Debug, Deserialize)]
struct PageForm {
    #[serde(default)]
    message: String,
    #[serde(rename = "mbtiType", default)]
    mbti_type: String,
}

impl IntoResponse for ConversionResult {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, self.user_message()).into_response()
    }
}

pub fn build_router(container: SharedContainer) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .route("/api/convert", post(convert))
        .route("/healthz", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(container)
}

async fn convert(State(container): State<SharedContainer>, body: Bytes) -> ConversionResult {
    ConvertController::new(&container).convert(&body).await
}

async fn index(State(container): State<SharedContainer>) -> Result<Html<String>, DomainError> {
    PageController::new(container).index().map(Html)
}

async fn submit(
    State(container): State<SharedContainer>,
    Form(form): Form<PageForm>,
) -> Result<Html<String>, DomainError> {
    PageController::new(container)
        .submit(form.message, form.mbti_type)
        .await
        .map(Html)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": "mbti-convert" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{self, Body};
    use axum::http::{header, Request};
    use tower::ServiceExt;

    use crate::connector::adapter::MockCompletion;
    use crate::domain::ApiKey;

    fn test_router(mock: Arc<MockCompletion>, api_key: Option<ApiKey>) -> Router {
        build_router(Arc::new(Container::with_completion(mock, api_key)))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn convert_request(body: &str) -> Request<Body> {
        Request::post("/api/convert")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_convert_ok() {
        let mock = Arc::new(MockCompletion::with_reply("\n 了解です！😊 \n"));
        let router = test_router(mock.clone(), ApiKey::new("sk-test"));

        let response = router
            .oneshot(convert_request(
                r#"{"message":"明日の会議は延期します","mbtiType":"INFP"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "convertedMessage": "了解です！😊" })
        );
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_convert_missing_field_is_400() {
        let mock = Arc::new(MockCompletion::new());
        let router = test_router(mock.clone(), ApiKey::new("sk-test"));

        let response = router
            .oneshot(convert_request(r#"{"message":"hello"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "メッセージとMBTIタイプは必須です" })
        );
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_convert_positional_array_is_400() {
        let mock = Arc::new(MockCompletion::new());
        let router = test_router(mock.clone(), ApiKey::new("sk-test"));

        let response = router
            .oneshot(convert_request(r#"["hello","INFP"]"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_convert_without_key_is_500() {
        let mock = Arc::new(MockCompletion::new());
        let router = test_router(mock.clone(), None);

        let response = router
            .oneshot(convert_request(r#"{"message":"hello","mbtiType":"INTJ"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "OpenAI APIキーが設定されていません" })
        );
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_index_renders_form() {
        let router = test_router(Arc::new(MockCompletion::new()), None);

        let response = router
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains(r#"<form id="convert-form""#));
    }

    #[tokio::test]
    async fn test_page_submit_renders_result() {
        let mock = Arc::new(MockCompletion::new());
        let router = test_router(mock.clone(), ApiKey::new("sk-test"));

        let response = router
            .oneshot(
                Request::post("/")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("message=hello&mbtiType=ENFP"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("[ENFP向けのメッセージ]: hello"));
        assert!(html.contains(r#"<option value="ENFP" selected>"#));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_page_submit_empty_message_sends_nothing() {
        let mock = Arc::new(MockCompletion::new());
        let router = test_router(mock.clone(), ApiKey::new("sk-test"));

        let response = router
            .oneshot(
                Request::post("/")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("message=&mbtiType=ENFP"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(!html.contains(r#"id="result""#));
        assert!(!html.contains(r#"id="error""#));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_health() {
        let router = test_router(Arc::new(MockCompletion::new()), None);

        let response = router
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "status": "ok", "service": "mbti-convert" })
        );
    }
}
