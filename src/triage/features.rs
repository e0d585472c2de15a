//! Feature preparation: patient input + wall clock → model feature vector.

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::models::enums::str_enum;
use crate::models::PatientInput;

/// Encoding used when the symptom is missing or unrecognised.
pub const UNKNOWN_SYMPTOM: i32 = -1;

str_enum!(
    /// Named model input. Names match the serialized models' declared features.
    FeatureName {
        Age => "age",
        SymptomEncoded => "symptom_encoded",
        HasLocationConsent => "has_location_consent",
        HourOfDay => "hour_of_day",
        IsWeekend => "is_weekend",
    }
);

/// Packing order for models that declare no feature names.
pub const DEFAULT_FEATURE_ORDER: [FeatureName; 4] = [
    FeatureName::Age,
    FeatureName::SymptomEncoded,
    FeatureName::HasLocationConsent,
    FeatureName::HourOfDay,
];

/// Numeric features derived from one request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub age: i64,
    pub symptom_encoded: i32,
    pub has_location_consent: u8,
    pub hour_of_day: u32,
    pub is_weekend: u8,
}

impl FeatureVector {
    pub fn get(&self, name: FeatureName) -> f64 {
        match name {
            FeatureName::Age => self.age as f64,
            FeatureName::SymptomEncoded => f64::from(self.symptom_encoded),
            FeatureName::HasLocationConsent => f64::from(self.has_location_consent),
            FeatureName::HourOfDay => f64::from(self.hour_of_day),
            FeatureName::IsWeekend => f64::from(self.is_weekend),
        }
    }
}

/// Build the feature vector for `input` as of local time `now`.
///
/// Never fails: a missing age becomes 30 and an unknown symptom -1.
pub fn prepare_features(input: &PatientInput, now: NaiveDateTime) -> FeatureVector {
    let symptom_encoded = input
        .symptom_code()
        .map(|code| code.encoded())
        .unwrap_or(UNKNOWN_SYMPTOM);

    FeatureVector {
        age: input.age_or_default(),
        symptom_encoded,
        has_location_consent: u8::from(input.has_location_consent()),
        hour_of_day: now.hour(),
        is_weekend: u8::from(now.weekday().num_days_from_monday() >= 5),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 15, 0)
            .unwrap()
    }

    #[test]
    fn known_symptom_is_encoded() {
        let input = PatientInput {
            age: Some(45),
            symptoms: Some("fracture".into()),
            location_consent: Some(true),
            ..Default::default()
        };
        // 2026-10-19 is a Monday.
        let features = prepare_features(&input, at(2026, 10, 19, 14));
        assert_eq!(
            features,
            FeatureVector {
                age: 45,
                symptom_encoded: 9,
                has_location_consent: 1,
                hour_of_day: 14,
                is_weekend: 0,
            }
        );
    }

    #[test]
    fn missing_fields_get_defaults() {
        let features = prepare_features(&PatientInput::default(), at(2026, 10, 19, 0));
        assert_eq!(features.age, 30);
        assert_eq!(features.symptom_encoded, UNKNOWN_SYMPTOM);
        assert_eq!(features.has_location_consent, 0);
        assert_eq!(features.hour_of_day, 0);
    }

    #[test]
    fn unknown_symptom_maps_to_minus_one() {
        let input = PatientInput {
            symptoms: Some("hiccups".into()),
            ..Default::default()
        };
        let features = prepare_features(&input, at(2026, 10, 19, 9));
        assert_eq!(features.symptom_encoded, -1);
    }

    #[test]
    fn saturday_and_sunday_are_weekend() {
        let input = PatientInput::default();
        assert_eq!(prepare_features(&input, at(2026, 10, 24, 23)).is_weekend, 1);
        assert_eq!(prepare_features(&input, at(2026, 10, 25, 8)).is_weekend, 1);
        assert_eq!(prepare_features(&input, at(2026, 10, 23, 8)).is_weekend, 0);
    }

    #[test]
    fn same_input_and_time_is_deterministic() {
        let input = PatientInput {
            age: Some(70),
            symptoms: Some("cough".into()),
            ..Default::default()
        };
        let now = at(2026, 1, 2, 3);
        assert_eq!(prepare_features(&input, now), prepare_features(&input, now));
    }

    #[test]
    fn get_reads_by_name() {
        let features = FeatureVector {
            age: 61,
            symptom_encoded: 3,
            has_location_consent: 1,
            hour_of_day: 22,
            is_weekend: 1,
        };
        let packed: Vec<f64> = DEFAULT_FEATURE_ORDER.iter().map(|n| features.get(*n)).collect();
        assert_eq!(packed, vec![61.0, 3.0, 1.0, 22.0]);
        assert_eq!(features.get(FeatureName::IsWeekend), 1.0);
    }
}
