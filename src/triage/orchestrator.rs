//! Triage orchestrator.
//!
//! Each output field tries its model first and falls back to the rule
//! tables on its own; one failing model never drags the other fields
//! onto the fallback path. The appointment-time fallback always reads
//! the emergency level finalized earlier in the same assessment.

use chrono::{DateTime, Local};

use super::fallback::{
    fallback_appointment_time, fallback_emergency_level, fallback_specialty, format_wait_time,
    urgency_text,
};
use super::features::{prepare_features, FeatureVector};
use super::predictor::{ModelSet, PredictError};
use crate::models::{
    AssessmentResult, DecisionSource, EmergencyLevel, PatientInput, Provenance, Specialty,
    SymptomCode,
};

/// Confidence reported when the emergency level comes from the rules.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Combines the models and the fallback tables into one assessment.
#[derive(Debug, Clone)]
pub struct TriageOrchestrator {
    models: ModelSet,
}

impl TriageOrchestrator {
    pub fn new(models: ModelSet) -> Self {
        Self { models }
    }

    pub fn models(&self) -> &ModelSet {
        &self.models
    }

    /// Assess `input` as of `now`.
    pub fn assess(&self, input: &PatientInput, now: DateTime<Local>) -> AssessmentResult {
        let features = prepare_features(input, now.naive_local());
        let symptom = input.symptom_code();

        let (emergency_level, confidence, level_source) = self.emergency_level(&features, symptom);
        let (specialty, specialty_source) = self.specialty(&features, symptom);
        let (appointment_time, appointment_source) =
            self.appointment_time(&features, emergency_level);

        AssessmentResult {
            emergency_level,
            confidence,
            recommended_doctor: specialty.as_str().to_string(),
            appointment_time,
            emergency_class: emergency_level.emergency_class(),
            badge_class: emergency_level.badge_class(),
            urgency_text: urgency_text(emergency_level).to_string(),
            timestamp: iso_timestamp(now),
            provenance: Provenance {
                emergency_level: level_source,
                recommended_doctor: specialty_source,
                appointment_time: appointment_source,
            },
        }
    }

    fn emergency_level(
        &self,
        features: &FeatureVector,
        symptom: Option<SymptomCode>,
    ) -> (EmergencyLevel, f64, DecisionSource) {
        let decoded = self.models.emergency.predict(features).and_then(|prediction| {
            let confidence = prediction
                .max_probability()
                .ok_or(PredictError::MissingProbabilities)?;
            Ok((EmergencyLevel::from_class_index(prediction.class_index()), confidence))
        });

        match decoded {
            Ok((level, confidence)) => (level, confidence, DecisionSource::Model),
            Err(e) => {
                log_fallback("emergency_level", &e);
                (
                    fallback_emergency_level(symptom),
                    FALLBACK_CONFIDENCE,
                    DecisionSource::Fallback,
                )
            }
        }
    }

    fn specialty(
        &self,
        features: &FeatureVector,
        symptom: Option<SymptomCode>,
    ) -> (Specialty, DecisionSource) {
        match self.models.specialty.predict(features) {
            Ok(prediction) => (
                Specialty::from_class_index(prediction.class_index()),
                DecisionSource::Model,
            ),
            Err(e) => {
                log_fallback("specialty", &e);
                (fallback_specialty(symptom), DecisionSource::Fallback)
            }
        }
    }

    fn appointment_time(
        &self,
        features: &FeatureVector,
        level: EmergencyLevel,
    ) -> (String, DecisionSource) {
        match self.models.wait_time.predict(features) {
            Ok(prediction) => (format_wait_time(prediction.value), DecisionSource::Model),
            Err(e) => {
                log_fallback("wait_time", &e);
                (
                    fallback_appointment_time(level).to_string(),
                    DecisionSource::Fallback,
                )
            }
        }
    }
}

fn log_fallback(field: &str, error: &PredictError) {
    match error {
        // Already reported once at startup.
        PredictError::Unavailable(_) => {
            tracing::debug!(field, "No model loaded, using fallback rules")
        }
        other => tracing::error!(field, error = %other, "Model prediction failed, using fallback rules"),
    }
}

/// Local timestamp in `YYYY-MM-DDTHH:MM:SS.ffffff` form.
pub fn iso_timestamp(now: DateTime<Local>) -> String {
    now.naive_local().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}
