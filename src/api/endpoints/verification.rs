//! Contact verification endpoints.
//!
//! Codes are returned in the response as `demo_code`; there is no
//! outbound email or SMS delivery.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::api::error::{ApiError, IntoApiError};
use crate::api::types::{
    ApiContext, CodeSentResponse, ResendCodeRequest, SendVerificationRequest, VerifyCodeRequest,
    VerifyCodeResponse,
};

/// `POST /api/send-verification`
pub async fn send(
    State(ctx): State<ApiContext>,
    payload: Result<Json<SendVerificationRequest>, JsonRejection>,
) -> Result<Json<CodeSentResponse>, ApiError> {
    let Json(request) = payload.or_api(ApiError::Operation)?;

    let code = ctx
        .core
        .lock_verification()
        .or_api(ApiError::Operation)?
        .send(&request.contact, request.patient_id);

    tracing::info!(method = %request.method, "Verification code issued");

    Ok(Json(CodeSentResponse {
        success: true,
        message: format!("Verification code sent to your {}", request.method),
        demo_code: code,
    }))
}

/// `POST /api/resend-code`
pub async fn resend(
    State(ctx): State<ApiContext>,
    payload: Result<Json<ResendCodeRequest>, JsonRejection>,
) -> Result<Json<CodeSentResponse>, ApiError> {
    let Json(request) = payload.or_api(ApiError::Operation)?;

    let code = ctx
        .core
        .lock_verification()
        .or_api(ApiError::Operation)?
        .resend(&request.contact);

    tracing::info!(method = %request.method, "Verification code reissued");

    Ok(Json(CodeSentResponse {
        success: true,
        message: format!("New verification code sent to your {}", request.method),
        demo_code: code,
    }))
}

/// `POST /api/verify-code`. Wrong or expired codes are a normal
/// `verified: false` answer, not an error status.
pub async fn verify(
    State(ctx): State<ApiContext>,
    payload: Result<Json<VerifyCodeRequest>, JsonRejection>,
) -> Result<Json<VerifyCodeResponse>, ApiError> {
    let Json(request) = payload.or_api(ApiError::Verification)?;

    let outcome = ctx
        .core
        .lock_verification()
        .or_api(ApiError::Verification)?
        .verify(&request.contact, &request.code);

    let response = if outcome.is_verified() {
        VerifyCodeResponse {
            verified: true,
            message: Some(outcome.message()),
            error: None,
        }
    } else {
        tracing::info!(?outcome, "Verification rejected");
        VerifyCodeResponse {
            verified: false,
            message: None,
            error: Some(outcome.message()),
        }
    };

    Ok(Json(response))
}
