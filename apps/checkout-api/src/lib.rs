//! # Ateliux Checkout API
//!
//! Stub checkout endpoint for the storefront.
//!
//! ## Routes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout API Routes                              │
//! │                                                                         │
//! │  POST /api/checkout   {"lines":[{"slug":"headsound","qty":2}]}          │
//! │       ├── valid   → 200 {"url": "/checkout/success"}                    │
//! │       └── invalid → 400 {"error": "Invalid payload"}                    │
//! │                                                                         │
//! │  GET  /health         → 200 "OK"                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A valid payload has a non-empty `lines` array where every line has a
//! string `slug` and a numeric `qty`. Nothing is stored and nothing is
//! charged.

pub mod config;
pub mod error;

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use ateliux_core::checkout::validate_checkout_payload;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};

/// Successful checkout response.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub url: String,
}

/// Builds the application router.
pub fn router(config: ApiConfig) -> Router {
    Router::new()
        .route("/api/checkout", post(checkout_handler))
        .route("/health", get(health_handler))
        .with_state(Arc::new(config))
}

// =============================================================================
// Handlers
// =============================================================================

/// Validates the checkout payload and returns the success URL.
///
/// The raw body is parsed here rather than through the `Json` extractor so
/// that a missing content type or malformed JSON gets the same 400 body as
/// any other rejected payload.
async fn checkout_handler(
    State(config): State<Arc<ApiConfig>>,
    body: Bytes,
) -> ApiResult<Json<CheckoutResponse>> {
    let payload: Value = serde_json::from_slice(&body)?;
    validate_checkout_payload(&payload)?;

    let lines = payload["lines"].as_array().map_or(0, Vec::len);
    info!(lines, "Checkout accepted");

    Ok(Json(CheckoutResponse {
        url: config.success_url.clone(),
    }))
}

/// Health check endpoint.
async fn health_handler() -> impl IntoResponse {
    "OK"
}

// =============================================================================
// Router Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn post_checkout(body: &str) -> (StatusCode, Value) {
        let response = router(ApiConfig::default())
            .oneshot(
                Request::post("/api/checkout")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
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

    #[tokio::test]
    async fn test_valid_payload_returns_success_url() {
        let (status, body) =
            post_checkout(r#"{"lines":[{"slug":"headsound","qty":2},{"slug":"lamp","qty":1}]}"#)
                .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"url": "/checkout/success"}));
    }

    #[tokio::test]
    async fn test_configured_success_url() {
        let config = ApiConfig {
            success_url: "https://shop.example/obrigado".to_string(),
            ..ApiConfig::default()
        };
        let response = router(config)
            .oneshot(
                Request::post("/api/checkout")
                    .body(Body::from(r#"{"lines":[{"slug":"a","qty":1}]}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["url"], "https://shop.example/obrigado");
    }

    #[tokio::test]
    async fn test_invalid_payloads_rejected() {
        let cases = [
            r#"{"lines":[]}"#,
            r#"{"lines":{"slug":"a","qty":1}}"#,
            r#"{}"#,
            r#"{"lines":[{"slug":7,"qty":1}]}"#,
            r#"{"lines":[{"slug":"a","qty":"2"}]}"#,
            r#"{"lines":[{"slug":"a"}]}"#,
            r#"{"lines":[{"slug":"a","qty":1},"oops"]}"#,
            r#"{"lines": ["#,
            "",
        ];

        for body in cases {
            let (status, json) = post_checkout(body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
            assert_eq!(json["error"], "Invalid payload", "body: {}", body);
        }
    }

    #[tokio::test]
    async fn test_health() {
        let response = router(ApiConfig::default())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"OK");
    }
}
