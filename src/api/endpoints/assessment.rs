//! Symptom analysis and assessment logging endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::Value;

use crate::api::error::{ApiError, IntoApiError};
use crate::api::types::{ApiContext, LogAssessmentRequest, LogAssessmentResponse};
use crate::models::{AssessmentResult, PatientInput};
use crate::triage::fallback::urgency_text_for_label;
use crate::triage::orchestrator::iso_timestamp;

/// `POST /api/analyze-symptoms`
pub async fn analyze(
    State(ctx): State<ApiContext>,
    payload: Result<Json<PatientInput>, JsonRejection>,
) -> Result<Json<AssessmentResult>, ApiError> {
    let Json(input) = payload.or_api(ApiError::Analysis)?;

    tracing::info!(patient = input.display_name(), "Analyzing symptoms");

    let result = ctx.core.orchestrator.assess(&input, Local::now());

    tracing::info!(
        emergency_level = %result.emergency_level,
        confidence = result.confidence,
        provenance = ?result.provenance,
        "Assessment complete"
    );

    Ok(Json(result))
}

/// One logged assessment. Patient data and results pass through untouched.
#[derive(Debug, Serialize)]
pub struct AssessmentLogRecord {
    pub log_id: String,
    pub timestamp: String,
    pub patient_data: Value,
    pub results: Value,
}

impl AssessmentLogRecord {
    pub fn new(now: DateTime<Local>, patient_data: Value, results: Value) -> Self {
        Self {
            log_id: log_id(now),
            timestamp: iso_timestamp(now),
            patient_data,
            results,
        }
    }

    pub fn patient_name(&self) -> &str {
        self.patient_data
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
    }

    /// Urgency text for the level the client echoed back, if any.
    pub fn urgency_text(&self) -> &'static str {
        let label = self
            .results
            .get("emergencyLevel")
            .and_then(Value::as_str)
            .unwrap_or_default();
        urgency_text_for_label(label)
    }
}

/// `POST /api/log-assessment`. Recorded in the service log only.
pub async fn log(
    payload: Result<Json<LogAssessmentRequest>, JsonRejection>,
) -> Result<Json<LogAssessmentResponse>, ApiError> {
    let Json(request) = payload.or_api(ApiError::Operation)?;

    let record = AssessmentLogRecord::new(Local::now(), request.patient_data, request.results);
    tracing::info!(
        log_id = %record.log_id,
        patient = record.patient_name(),
        urgency = record.urgency_text(),
        "Assessment logged"
    );
    // Full payload carries patient details; keep it out of the default filter.
    tracing::debug!(
        record = %serde_json::to_string(&record).unwrap_or_default(),
        "Assessment log record"
    );

    Ok(Json(LogAssessmentResponse {
        success: true,
        log_id: record.log_id,
    }))
}

/// `LOG` followed by the local time to the second.
pub fn log_id(now: DateTime<Local>) -> String {
    format!("LOG{}", now.format("%Y%m%d%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn log_id_format() {
        let now = Local.with_ymd_and_hms(2026, 10, 19, 7, 5, 9).unwrap();
        assert_eq!(log_id(now), "LOG20261019070509");
    }

    #[test]
    fn record_reads_loose_payloads() {
        let now = Local.with_ymd_and_hms(2026, 10, 19, 7, 5, 9).unwrap();
        let record = AssessmentLogRecord::new(
            now,
            serde_json::json!({"name": "Ada", "age": "45"}),
            serde_json::json!({"emergencyLevel": "MEDIUM"}),
        );
        assert_eq!(record.log_id, "LOG20261019070509");
        assert_eq!(record.timestamp, "2026-10-19T07:05:09.000000");
        assert_eq!(record.patient_name(), "Ada");
        assert_eq!(record.urgency_text(), "SEEK CARE TODAY");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["patient_data"]["age"], "45");
    }

    #[test]
    fn record_defaults_for_missing_or_unknown_fields() {
        let now = Local.with_ymd_and_hms(2026, 10, 19, 7, 5, 9).unwrap();
        let record = AssessmentLogRecord::new(
            now,
            serde_json::json!(["not", "an", "object"]),
            serde_json::json!({"emergencyLevel": "CRITICAL"}),
        );
        assert_eq!(record.patient_name(), "Unknown");
        assert_eq!(record.urgency_text(), "CONSULT HEALTHCARE PROVIDER");

        let empty = AssessmentLogRecord::new(now, Value::Null, Value::Null);
        assert_eq!(empty.urgency_text(), "CONSULT HEALTHCARE PROVIDER");
    }
}
