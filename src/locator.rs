//! Nearby-facility lookup over a static directory.

use serde::Serialize;

use crate::config::MAX_NEARBY_FACILITIES;
use crate::models::{default_facilities, Facility};

/// Mean Earth radius in miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Great-circle distance in miles between two points given in degrees.
pub fn haversine_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_MILES * c
}

/// A facility annotated with its distance from the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyFacility {
    #[serde(flatten)]
    pub facility: Facility,
    /// Miles, rounded to one decimal.
    pub distance: f64,
    pub distance_units: &'static str,
}

#[derive(Debug, Clone)]
pub struct FacilityDirectory {
    facilities: Vec<Facility>,
}

impl FacilityDirectory {
    pub fn new(facilities: Vec<Facility>) -> Self {
        Self { facilities }
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    /// Facilities within `radius_miles`, nearest first, at most five.
    /// Coordinates are assumed valid; the HTTP layer rejects bad ones.
    pub fn nearby(&self, latitude: f64, longitude: f64, radius_miles: f64) -> Vec<NearbyFacility> {
        let mut within: Vec<(f64, &Facility)> = self
            .facilities
            .iter()
            .map(|f| (haversine_miles(latitude, longitude, f.latitude, f.longitude), f))
            .filter(|(distance, _)| *distance <= radius_miles)
            .collect();

        within.sort_by(|a, b| a.0.total_cmp(&b.0));

        within
            .into_iter()
            .take(MAX_NEARBY_FACILITIES)
            .map(|(distance, facility)| NearbyFacility {
                facility: facility.clone(),
                distance: (distance * 10.0).round() / 10.0,
                distance_units: "miles",
            })
            .collect()
    }
}

impl Default for FacilityDirectory {
    fn default() -> Self {
        Self::new(default_facilities())
    }
}
