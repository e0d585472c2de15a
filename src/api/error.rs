//! API error types. Each variant renders the error payload its
//! endpoint family has always returned, with HTTP 500.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::core_state::CoreError;

/// API-level errors, grouped by the payload shape clients expect.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// `send-verification`, `resend-code`, `log-assessment`:
    /// `{success:false, error}`.
    #[error("Request failed: {0}")]
    Operation(String),
    /// `verify-code`: `{verified:false, error}`.
    #[error("Verification failed: {0}")]
    Verification(String),
    /// `analyze-symptoms`: `{error:"Analysis failed", details}`.
    #[error("Analysis failed: {0}")]
    Analysis(String),
    /// `nearby-facilities`: `{error:"Failed to find facilities", details}`.
    #[error("Failed to find facilities: {0}")]
    Facilities(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "API request failed");

        let body = match self {
            ApiError::Operation(detail) => json!({ "success": false, "error": detail }),
            ApiError::Verification(detail) => json!({ "verified": false, "error": detail }),
            ApiError::Analysis(detail) => json!({ "error": "Analysis failed", "details": detail }),
            ApiError::Facilities(detail) => {
                json!({ "error": "Failed to find facilities", "details": detail })
            }
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Converts body-extraction and state errors into one endpoint's shape.
pub trait IntoApiError<T> {
    fn or_api(self, wrap: fn(String) -> ApiError) -> Result<T, ApiError>;
}

impl<T> IntoApiError<T> for Result<T, JsonRejection> {
    fn or_api(self, wrap: fn(String) -> ApiError) -> Result<T, ApiError> {
        self.map_err(|rejection| wrap(rejection.body_text()))
    }
}

impl<T> IntoApiError<T> for Result<T, CoreError> {
    fn or_api(self, wrap: fn(String) -> ApiError) -> Result<T, ApiError> {
        self.map_err(|e| wrap(e.to_string()))
    }
}
