use serde::{Deserialize, Serialize};

use super::enums::FacilityType;

/// A medical facility in the static directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub name: String,
    #[serde(rename = "type")]
    pub facility_type: FacilityType,
    pub latitude: f64,
    pub longitude: f64,
    /// Baseline wait in minutes.
    pub wait_time: u32,
}

impl Facility {
    fn new(
        name: &str,
        facility_type: FacilityType,
        latitude: f64,
        longitude: f64,
        wait_time: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            facility_type,
            latitude,
            longitude,
            wait_time,
        }
    }
}

/// The built-in facility list served by the locator.
pub fn default_facilities() -> Vec<Facility> {
    vec![
        Facility::new("City General Hospital", FacilityType::Hospital, 40.7128, -74.0060, 45),
        Facility::new("Downtown Medical Center", FacilityType::Hospital, 40.7589, -73.9851, 30),
        Facility::new("Community Urgent Care", FacilityType::UrgentCare, 40.7505, -73.9934, 15),
        Facility::new("Westside Clinic", FacilityType::Clinic, 40.7829, -73.9654, 10),
        Facility::new("Emergency Trauma Center", FacilityType::Hospital, 40.6413, -73.7781, 60),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directory_has_five_entries() {
        let facilities = default_facilities();
        assert_eq!(facilities.len(), 5);
        assert_eq!(facilities[0].name, "City General Hospital");
        assert_eq!(facilities[2].facility_type, FacilityType::UrgentCare);
    }

    #[test]
    fn serializes_type_field() {
        let json = serde_json::to_value(&default_facilities()[3]).unwrap();
        assert_eq!(json["type"], "clinic");
        assert_eq!(json["wait_time"], 10);
    }
}
