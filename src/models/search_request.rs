use serde::{Deserialize, Serialize};
use crate::helpers::errors::PlacesError;
use crate::models::place::Location;

/// Upper bound of the dashboard's maximum results control.
pub const MAX_RESULTS_LIMIT: usize = 200;
/// Largest radius Nearby Search accepts.
pub const MAX_RADIUS_KM: f64 = 50.0;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct SearchRequest {
    pub location: Location,
    pub radius_km: f64,
    pub place_type: Option<String>,
    pub require_photo: bool,
    pub max_results: usize,
}

impl SearchRequest {
    pub fn new(
        location: Location,
        radius_km: f64,
        place_type: Option<String>,
        require_photo: bool,
        max_results: usize,
    ) -> Result<Self, PlacesError> {
        if !location.lat.is_finite() || !(-90.0..=90.0).contains(&location.lat) {
            return Err(PlacesError::InvalidRequest(format!(
                "latitude must be between -90 and 90, got {}",
                location.lat
            )));
        }
        if !location.lng.is_finite() || !(-180.0..=180.0).contains(&location.lng) {
            return Err(PlacesError::InvalidRequest(format!(
                "longitude must be between -180 and 180, got {}",
                location.lng
            )));
        }
        // checked in whole meters since that is what goes on the wire
        if !radius_km.is_finite() || radius_km * 1000.0 < 1.0 || radius_km > MAX_RADIUS_KM {
            return Err(PlacesError::InvalidRequest(format!(
                "radius must be between 0.001 and {} km, got {}",
                MAX_RADIUS_KM, radius_km
            )));
        }
        if max_results == 0 || max_results > MAX_RESULTS_LIMIT {
            return Err(PlacesError::InvalidRequest(format!(
                "maximum results must be between 1 and {}, got {}",
                MAX_RESULTS_LIMIT, max_results
            )));
        }

        Ok(Self {
            location,
            radius_km,
            place_type,
            require_photo,
            max_results,
        })
    }

    /// Whole meters, as the Nearby Search endpoint expects.
    pub fn radius_meters(&self) -> u64 {
        (self.radius_km * 1000.0) as u64
    }

    pub fn location_param(&self) -> String {
        format!("{},{}", self.location.lat, self.location.lng)
    }
}
