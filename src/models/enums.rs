/// A string did not match any variant of a wire enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {field} value: {value:?}")]
pub struct ParseEnumError {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Serde goes through the same string table.
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::models::enums::ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err($crate::models::enums::ParseEnumError {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                raw.parse().map_err(<D::Error as ::serde::de::Error>::custom)
            }
        }
    };
}

pub(crate) use str_enum;

str_enum!(
    /// Presenting symptom. Declaration order is the model encoding (0–14).
    SymptomCode {
        ChestPain => "chest_pain",
        DifficultyBreathing => "difficulty_breathing",
        SevereBleeding => "severe_bleeding",
        HeadInjury => "head_injury",
        Fever => "fever",
        AbdominalPain => "abdominal_pain",
        AllergicReaction => "allergic_reaction",
        StrokeSymptoms => "stroke_symptoms",
        Burn => "burn",
        Fracture => "fracture",
        Headache => "headache",
        Rash => "rash",
        Cough => "cough",
        Nausea => "nausea",
        Dizziness => "dizziness",
    }
);

impl SymptomCode {
    /// Numeric encoding fed to the models.
    pub fn encoded(&self) -> i32 {
        *self as i32
    }
}

str_enum!(
    /// Triage severity. Declaration order is the emergency model's class order.
    EmergencyLevel {
        Low => "LOW",
        Medium => "MEDIUM",
        High => "HIGH",
    }
);

impl EmergencyLevel {
    /// Decode a predicted class index, clamping out-of-range values.
    pub fn from_class_index(index: i64) -> Self {
        let last = Self::ALL.len() as i64 - 1;
        Self::ALL[index.clamp(0, last) as usize]
    }

    /// `emergency-<level>` display token.
    pub fn emergency_class(&self) -> String {
        format!("emergency-{}", self.as_str().to_lowercase())
    }

    /// `badge-<level>` display token.
    pub fn badge_class(&self) -> String {
        format!("badge-{}", self.as_str().to_lowercase())
    }
}

str_enum!(
    /// Recommended specialty. Declaration order is the specialty model's class order.
    Specialty {
        GeneralPractitioner => "General Practitioner",
        Cardiologist => "Cardiologist",
        Pulmonologist => "Pulmonologist",
        Neurologist => "Neurologist",
        Gastroenterologist => "Gastroenterologist",
        Dermatologist => "Dermatologist",
        Orthopedist => "Orthopedist",
        Allergist => "Allergist",
        EmergencyPhysician => "Emergency Physician",
    }
);

impl Specialty {
    /// Decode a predicted class index; anything past the table maps to the last entry.
    pub fn from_class_index(index: i64) -> Self {
        let last = Self::ALL.len() as i64 - 1;
        Self::ALL[index.clamp(0, last) as usize]
    }
}

str_enum!(FacilityType {
    Hospital => "hospital",
    UrgentCare => "urgent_care",
    Clinic => "clinic",
});

str_enum!(ContactMethod {
    Email => "email",
    Phone => "phone",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symptom_encoding_follows_table_order() {
        assert_eq!(SymptomCode::ALL.len(), 15);
        assert_eq!(SymptomCode::ChestPain.encoded(), 0);
        assert_eq!(SymptomCode::StrokeSymptoms.encoded(), 7);
        assert_eq!(SymptomCode::Burn.encoded(), 8);
        assert_eq!(SymptomCode::Dizziness.encoded(), 14);
        for (i, code) in SymptomCode::ALL.iter().enumerate() {
            assert_eq!(code.encoded(), i as i32);
        }
    }

    #[test]
    fn symptom_round_trips_through_str() {
        for code in SymptomCode::ALL {
            assert_eq!(code.as_str().parse::<SymptomCode>().unwrap(), *code);
        }
    }

    #[test]
    fn unknown_symptom_is_parse_error() {
        let err = "hiccups".parse::<SymptomCode>().unwrap_err();
        assert_eq!(err.field, "SymptomCode");
        assert_eq!(err.value, "hiccups");
    }

    #[test]
    fn emergency_level_class_index_clamps() {
        assert_eq!(EmergencyLevel::from_class_index(0), EmergencyLevel::Low);
        assert_eq!(EmergencyLevel::from_class_index(2), EmergencyLevel::High);
        assert_eq!(EmergencyLevel::from_class_index(7), EmergencyLevel::High);
        assert_eq!(EmergencyLevel::from_class_index(-3), EmergencyLevel::Low);
    }

    #[test]
    fn specialty_index_past_table_maps_to_last() {
        assert_eq!(Specialty::from_class_index(1), Specialty::Cardiologist);
        assert_eq!(Specialty::from_class_index(8), Specialty::EmergencyPhysician);
        assert_eq!(Specialty::from_class_index(42), Specialty::EmergencyPhysician);
    }

    #[test]
    fn display_tokens_are_lowercase() {
        assert_eq!(EmergencyLevel::High.emergency_class(), "emergency-high");
        assert_eq!(EmergencyLevel::Medium.badge_class(), "badge-medium");
    }

    #[test]
    fn serde_uses_wire_strings() {
        let json = serde_json::to_string(&EmergencyLevel::High).unwrap();
        assert_eq!(json, "\"HIGH\"");
        let method: ContactMethod = serde_json::from_str("\"phone\"").unwrap();
        assert_eq!(method, ContactMethod::Phone);
        assert!(serde_json::from_str::<ContactMethod>("\"fax\"").is_err());
    }
}
