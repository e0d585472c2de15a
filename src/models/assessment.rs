use serde::{Deserialize, Serialize};

use super::enums::EmergencyLevel;

/// Where a single assessment field came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
    Model,
    Fallback,
}

/// Per-field record of model vs. rule-table decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    pub emergency_level: DecisionSource,
    pub recommended_doctor: DecisionSource,
    pub appointment_time: DecisionSource,
}

/// Triage verdict returned by `POST /api/analyze-symptoms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub emergency_level: EmergencyLevel,
    /// Max class probability from the emergency model, 0.5 on fallback.
    pub confidence: f64,
    pub recommended_doctor: String,
    pub appointment_time: String,
    pub emergency_class: String,
    pub badge_class: String,
    pub urgency_text: String,
    /// Local ISO-8601 timestamp.
    pub timestamp: String,
    pub provenance: Provenance,
}
