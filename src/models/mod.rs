pub mod assessment;
pub mod enums;
pub mod facility;
pub mod patient;

pub use assessment::{AssessmentResult, DecisionSource, Provenance};
pub use enums::{
    ContactMethod, EmergencyLevel, FacilityType, ParseEnumError, Specialty, SymptomCode,
};
pub use facility::{default_facilities, Facility};
pub use patient::PatientInput;
