//! # API Error Type
//!
//! Unified error type for checkout API handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Checkout API                       │
//! │                                                                         │
//! │  POST /api/checkout                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Body not JSON? ──────────────┐                                         │
//! │         │                     │                                         │
//! │         ▼                     ▼                                         │
//! │  ValidationError? ───────► ApiError ──► 400 {"error": "Invalid payload"} │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Success ──────────────────────────────► 200 {"url": "/checkout/success"}│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The storefront only checks for the `error` field, so every validation
//! failure carries the same message. The precise reason is logged.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use ateliux_core::ValidationError;

/// Message returned for every rejected checkout payload.
pub const INVALID_PAYLOAD: &str = "Invalid payload";

/// API error returned from handlers.
///
/// ## Serialization
/// ```json
/// {
///   "error": "Invalid payload",
///   "code": "VALIDATION_ERROR"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    #[serde(rename = "error")]
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed (400)
    ValidationError,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// The generic rejected-payload error.
    pub fn invalid_payload() -> Self {
        ApiError::new(ErrorCode::ValidationError, INVALID_PAYLOAD)
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        tracing::debug!(reason = %err, "Checkout payload rejected");
        ApiError::invalid_payload()
    }
}

/// Malformed JSON is reported exactly like a failed validation.
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::debug!(reason = %err, "Checkout body is not JSON");
        ApiError::invalid_payload()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = Result<T, ApiError>;
