//! HTTP surface: a single JSON endpoint wrapping [`analyze`].

use crate::analyzer::{analyze, AnalysisResult};
use crate::config::{Config, ServerConfig};
use axum::{
    body::Bytes,
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};

pub const ANALYZE_ROUTE: &str = "/api/analyze-email";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub email_content: String,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Missing email_content")]
    MissingField,
    #[error("email_content must be a string")]
    InvalidType,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

/// Validate a raw request body, whatever its declared content type.
///
/// Anything that is not a JSON object carrying `email_content` counts as a
/// missing field; a present but non-string value is a type error.
pub fn parse_request(body: &[u8]) -> Result<AnalysisRequest, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| ApiError::MissingField)?;

    let Value::Object(mut fields) = value else {
        return Err(ApiError::MissingField);
    };

    match fields.remove("email_content") {
        None => Err(ApiError::MissingField),
        Some(Value::String(email_content)) => Ok(AnalysisRequest { email_content }),
        Some(_) => Err(ApiError::InvalidType),
    }
}

pub async fn analyze_email(body: Bytes) -> Result<Json<AnalysisResult>, ApiError> {
    let request = parse_request(&body).inspect_err(|e| {
        log::warn!("Rejected analysis request: {e}");
    })?;

    Ok(Json(analyze(&request.email_content)))
}

pub fn create_router(server: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(ANALYZE_ROUTE, post(analyze_email))
        .layer(DefaultBodyLimit::max(server.max_body_bytes))
        .layer(cors)
}

/// Serve until Ctrl-C.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let app = create_router(&config.server);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}{}", listener.local_addr()?, ANALYZE_ROUTE);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    log::info!("Received shutdown signal, stopping...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    async fn post_body(body: &'static str) -> (StatusCode, Value) {
        let app = create_router(&ServerConfig::default());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(ANALYZE_ROUTE)
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_parse_request() {
        assert_eq!(
            parse_request(br#"{"email_content": "hi"}"#),
            Ok(AnalysisRequest {
                email_content: "hi".to_string()
            })
        );
        assert_eq!(parse_request(b""), Err(ApiError::MissingField));
        assert_eq!(parse_request(b"not json"), Err(ApiError::MissingField));
        assert_eq!(parse_request(b"{}"), Err(ApiError::MissingField));
        assert_eq!(parse_request(b"[\"email_content\"]"), Err(ApiError::MissingField));
        assert_eq!(parse_request(br#"{"body": "x"}"#), Err(ApiError::MissingField));
        assert_eq!(
            parse_request(br#"{"email_content": 123}"#),
            Err(ApiError::InvalidType)
        );
        assert_eq!(
            parse_request(br#"{"email_content": null}"#),
            Err(ApiError::InvalidType)
        );
    }

    #[tokio::test]
    async fn test_analyze_success() {
        let (status, body) = post_body(
            r#"{"email_content": "URGENT: Your account suspended! Click http://bit.ly/x now. Contact us at support@co.com"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["threat_level"], "High Risk");
        assert_eq!(
            body["indicators"],
            serde_json::json!([
                "Urgent language detected: urgent, account suspended",
                "Links found: http://bit.ly/x"
            ])
        );
    }

    #[tokio::test]
    async fn test_empty_content_is_low_risk() {
        let (status, body) = post_body(r#"{"email_content": ""}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({"threat_level": "Low Risk", "indicators": []})
        );
    }

    #[tokio::test]
    async fn test_missing_email_content() {
        let (status, body) = post_body(r#"{"subject": "hello"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"error": "Missing email_content"}));
    }

    #[tokio::test]
    async fn test_invalid_json_body() {
        let (status, body) = post_body("{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"error": "Missing email_content"}));
    }

    #[tokio::test]
    async fn test_non_string_email_content() {
        let (status, body) = post_body(r#"{"email_content": 123}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            serde_json::json!({"error": "email_content must be a string"})
        );
    }

    #[tokio::test]
    async fn test_content_type_not_required() {
        let app = create_router(&ServerConfig::default());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(ANALYZE_ROUTE)
                    .header("content-type", "text/plain")
                    .body(Body::from(r#"{"email_content": "urgent"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let server = ServerConfig {
            max_body_bytes: 16,
            ..ServerConfig::default()
        };
        let response = create_router(&server)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(ANALYZE_ROUTE)
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"email_content": "this body is too long"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let app = create_router(&ServerConfig::default());
        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri(ANALYZE_ROUTE)
                    .header("origin", "http://localhost:3000")
                    .header("access-control-request-method", "POST")
                    .header("access-control-request-headers", "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let app = create_router(&ServerConfig::default());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(ANALYZE_ROUTE)
                    .header("origin", "http://localhost:3000")
                    .body(Body::from(r#"{"email_content": "hi"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "*"
        );
    }
}
