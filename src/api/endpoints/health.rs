//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use chrono::Local;
use serde::Serialize;

use crate::api::types::ApiContext;
use crate::triage::orchestrator::iso_timestamp;

#[derive(Serialize)]
pub struct ModelStatus {
    pub emergency_model_loaded: bool,
    pub specialty_model_loaded: bool,
    pub wait_time_model_loaded: bool,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub version: &'static str,
    pub models: ModelStatus,
}

/// `GET /api/health`: liveness plus which models loaded at startup.
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    let models = ctx.core.orchestrator.models();

    Json(HealthResponse {
        status: "healthy",
        timestamp: iso_timestamp(Local::now()),
        version: crate::config::APP_VERSION,
        models: ModelStatus {
            emergency_model_loaded: models.emergency.is_loaded(),
            specialty_model_loaded: models.specialty.is_loaded(),
            wait_time_model_loaded: models.wait_time.is_loaded(),
        },
    })
}
