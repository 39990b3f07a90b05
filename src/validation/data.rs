//! Coordinate validation for targets and viewer fixes

use crate::core::{GeoPoint, Target};
use crate::validation::error::PlacementError;

/// Range checks applied before any projection math
pub struct PositionValidator;

impl PositionValidator {
    /// Check a bare coordinate, returning the reason it is unusable
    pub fn check_point(point: &GeoPoint) -> Result<(), &'static str> {
        if !point.latitude_deg.is_finite() {
            return Err("latitude is not a finite number");
        }

        if !point.longitude_deg.is_finite() {
            return Err("longitude is not a finite number");
        }

        if point.latitude_deg < -90.0 || point.latitude_deg > 90.0 {
            return Err("latitude must be between -90 and 90 degrees");
        }

        if point.longitude_deg < -180.0 || point.longitude_deg > 180.0 {
            return Err("longitude must be between -180 and 180 degrees");
        }

        Ok(())
    }

    pub fn is_valid(point: &GeoPoint) -> bool {
        Self::check_point(point).is_ok()
    }

    /// Validate the position a target will be projected from
    pub fn validate_target(target: &Target) -> Result<GeoPoint, PlacementError> {
        let effective = target.effective_position();

        Self::check_point(&effective).map_err(|reason| PlacementError::InvalidPosition {
            target_id: target.id.clone(),
            latitude_deg: effective.latitude_deg,
            longitude_deg: effective.longitude_deg,
            reason: reason.to_string(),
        })?;

        Ok(effective)
    }
}
