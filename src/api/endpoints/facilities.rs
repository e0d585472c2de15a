//! Nearby-facility endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::api::error::{ApiError, IntoApiError};
use crate::api::types::{
    ApiContext, NearbyFacilitiesRequest, NearbyFacilitiesResponse, UserLocation,
};
use crate::config::DEFAULT_FACILITY_RADIUS_MILES;

/// `POST /api/nearby-facilities`
pub async fn nearby(
    State(ctx): State<ApiContext>,
    payload: Result<Json<NearbyFacilitiesRequest>, JsonRejection>,
) -> Result<Json<NearbyFacilitiesResponse>, ApiError> {
    let Json(request) = payload.or_api(ApiError::Facilities)?;
    let radius = request.radius.unwrap_or(DEFAULT_FACILITY_RADIUS_MILES);

    validate_query(request.latitude, request.longitude, radius).map_err(ApiError::Facilities)?;

    tracing::info!(radius, "Finding nearby facilities");

    let facilities = ctx
        .core
        .facilities
        .nearby(request.latitude, request.longitude, radius);

    Ok(Json(NearbyFacilitiesResponse {
        facilities,
        user_location: UserLocation {
            latitude: request.latitude,
            longitude: request.longitude,
        },
    }))
}

fn validate_query(latitude: f64, longitude: f64, radius: f64) -> Result<(), String> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(format!("Invalid latitude: {latitude}"));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(format!("Invalid longitude: {longitude}"));
    }
    if !radius.is_finite() || radius < 0.0 {
        return Err(format!("Invalid radius: {radius}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert!(validate_query(90.0, -180.0, 0.0).is_ok());
        assert!(validate_query(-90.0, 180.0, 10_000.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range_or_non_finite() {
        assert!(validate_query(90.5, 0.0, 1.0).is_err());
        assert!(validate_query(0.0, -180.1, 1.0).is_err());
        assert!(validate_query(f64::NAN, 0.0, 1.0).is_err());
        assert!(validate_query(0.0, 0.0, -1.0).is_err());
        assert!(validate_query(0.0, 0.0, f64::INFINITY).is_err());
    }
}
