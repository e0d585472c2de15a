//! Shared types for the HTTP API layer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core_state::CoreState;
use crate::models::ContactMethod;

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }
}

// ═══════════════════════════════════════════════════════════
// Request bodies
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendVerificationRequest {
    pub method: ContactMethod,
    pub contact: String,
    #[serde(default)]
    pub patient_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResendCodeRequest {
    pub method: ContactMethod,
    pub contact: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyCodeRequest {
    pub code: String,
    pub contact: String,
    /// Echoed by clients; codes are keyed by contact alone.
    #[serde(default)]
    pub method: Option<ContactMethod>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NearbyFacilitiesRequest {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub radius: Option<f64>,
}

/// Both parts are opaque; clients send whatever they rendered.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogAssessmentRequest {
    #[serde(default = "empty_object")]
    pub patient_data: serde_json::Value,
    #[serde(default = "empty_object")]
    pub results: serde_json::Value,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

// ═══════════════════════════════════════════════════════════
// Response bodies
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
pub struct CodeSentResponse {
    pub success: bool,
    pub message: String,
    /// Returned to the client for demo purposes only.
    pub demo_code: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyCodeResponse {
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct UserLocation {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize)]
pub struct NearbyFacilitiesResponse {
    pub facilities: Vec<crate::locator::NearbyFacility>,
    pub user_location: UserLocation,
}

#[derive(Debug, Serialize)]
pub struct LogAssessmentResponse {
    pub success: bool,
    pub log_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_request_reads_camel_case_patient_id() {
        let req: SendVerificationRequest =
            serde_json::from_str(r#"{"method":"email","contact":"a@x.com","patientId":"P7"}"#)
                .unwrap();
        assert_eq!(req.method, ContactMethod::Email);
        assert_eq!(req.patient_id.as_deref(), Some("P7"));
    }

    #[test]
    fn unknown_method_is_rejected() {
        let result = serde_json::from_str::<ResendCodeRequest>(
            r#"{"method":"pigeon","contact":"a@x.com"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn verify_response_omits_unused_field() {
        let ok = serde_json::to_value(VerifyCodeResponse {
            verified: true,
            message: Some("Verification successful"),
            error: None,
        })
        .unwrap();
        assert_eq!(ok, serde_json::json!({"verified": true, "message": "Verification successful"}));
    }

    #[test]
    fn log_request_tolerates_missing_parts() {
        let req: LogAssessmentRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.patient_data, serde_json::json!({}));
        assert_eq!(req.results, serde_json::json!({}));
    }

    #[test]
    fn log_request_keeps_loosely_typed_patient_data() {
        let req: LogAssessmentRequest = serde_json::from_str(
            r#"{"patientData":{"name":"Ada","age":"45","symptoms":["fever"]},"results":null}"#,
        )
        .unwrap();
        assert_eq!(req.patient_data["age"], "45");
        assert!(req.results.is_null());
    }
}
