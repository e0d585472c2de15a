//! Rule tables used when a model is missing or fails.
//!
//! Pure functions of the symptom or emergency level; age never affects
//! the outcome.

use crate::models::{EmergencyLevel, Specialty, SymptomCode};

pub const APPOINTMENT_IMMEDIATE: &str = "Immediate - Emergency Room";
pub const APPOINTMENT_TODAY: &str = "Today - Urgent Care";
pub const APPOINTMENT_ROUTINE: &str = "Within 2-3 days";

/// Shown when a level label is not LOW, MEDIUM or HIGH.
pub const URGENCY_UNKNOWN: &str = "CONSULT HEALTHCARE PROVIDER";

pub fn fallback_emergency_level(symptom: Option<SymptomCode>) -> EmergencyLevel {
    use SymptomCode::*;
    match symptom {
        Some(
            ChestPain | DifficultyBreathing | SevereBleeding | HeadInjury | AllergicReaction
            | StrokeSymptoms,
        ) => EmergencyLevel::High,
        Some(Fever | AbdominalPain | Fracture | Burn) => EmergencyLevel::Medium,
        _ => EmergencyLevel::Low,
    }
}

pub fn fallback_specialty(symptom: Option<SymptomCode>) -> Specialty {
    use SymptomCode::*;
    match symptom {
        Some(ChestPain) => Specialty::Cardiologist,
        Some(DifficultyBreathing) => Specialty::Pulmonologist,
        Some(HeadInjury | StrokeSymptoms) => Specialty::Neurologist,
        Some(AbdominalPain) => Specialty::Gastroenterologist,
        Some(Fracture) => Specialty::Orthopedist,
        Some(AllergicReaction) => Specialty::Allergist,
        Some(Burn | Rash) => Specialty::Dermatologist,
        _ => Specialty::GeneralPractitioner,
    }
}

pub fn fallback_appointment_time(level: EmergencyLevel) -> &'static str {
    match level {
        EmergencyLevel::High => APPOINTMENT_IMMEDIATE,
        EmergencyLevel::Medium => APPOINTMENT_TODAY,
        EmergencyLevel::Low => APPOINTMENT_ROUTINE,
    }
}

pub fn urgency_text(level: EmergencyLevel) -> &'static str {
    match level {
        EmergencyLevel::High => "URGENT - SEEK IMMEDIATE CARE",
        EmergencyLevel::Medium => "SEEK CARE TODAY",
        EmergencyLevel::Low => "SCHEDULE APPOINTMENT",
    }
}

/// Urgency text for a free-form level label, e.g. one echoed back by a client.
pub fn urgency_text_for_label(label: &str) -> &'static str {
    label
        .parse::<EmergencyLevel>()
        .map(urgency_text)
        .unwrap_or(URGENCY_UNKNOWN)
}

/// Human-readable wait from predicted minutes. Fractions are truncated.
pub fn format_wait_time(minutes: f64) -> String {
    if minutes < 60.0 {
        format!("Within {} minutes", minutes as i64)
    } else if minutes < 120.0 {
        format!("Within {} hour", (minutes / 60.0) as i64)
    } else {
        format!("Within {} hours", (minutes / 60.0) as i64)
    }
}
