use serde::{Deserialize, Serialize};

use super::enums::SymptomCode;

/// Age assumed when the request omits it.
pub const DEFAULT_AGE: i64 = 30;

/// Patient-submitted triage request. Every field is optional; downstream
/// defaults absorb anything missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientInput {
    pub name: Option<String>,
    /// Expected 1–120 but not validated.
    pub age: Option<i64>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Raw symptom code as submitted.
    pub symptoms: Option<String>,
    pub location_consent: Option<bool>,
}

impl PatientInput {
    /// Parsed symptom, or `None` when missing or not a known code.
    pub fn symptom_code(&self) -> Option<SymptomCode> {
        self.symptoms.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn age_or_default(&self) -> i64 {
        self.age.unwrap_or(DEFAULT_AGE)
    }

    pub fn has_location_consent(&self) -> bool {
        self.location_consent.unwrap_or(false)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_fields() {
        let input: PatientInput = serde_json::from_str(
            r#"{"name":"Ada","age":45,"symptoms":"chest_pain","locationConsent":true}"#,
        )
        .unwrap();
        assert_eq!(input.display_name(), "Ada");
        assert_eq!(input.age_or_default(), 45);
        assert_eq!(input.symptom_code(), Some(SymptomCode::ChestPain));
        assert!(input.has_location_consent());
    }

    #[test]
    fn empty_body_uses_defaults() {
        let input: PatientInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input.display_name(), "Unknown");
        assert_eq!(input.age_or_default(), DEFAULT_AGE);
        assert_eq!(input.symptom_code(), None);
        assert!(!input.has_location_consent());
    }

    #[test]
    fn unknown_symptom_is_not_an_error() {
        let input = PatientInput {
            symptoms: Some("hiccups".into()),
            ..Default::default()
        };
        assert_eq!(input.symptom_code(), None);
    }

    #[test]
    fn wrong_type_for_age_fails_to_parse() {
        let result = serde_json::from_str::<PatientInput>(r#"{"age":"forty"}"#);
        assert!(result.is_err());
    }
}
