//! Geographic projection for camera-relative placement
//!
//! Pure spherical-Earth math turning an (observer, target) coordinate pair
//! into a ground distance, an initial bearing and a bounded scene offset:
//! - Haversine great-circle distance on the mean Earth sphere
//! - Forward azimuth at the observer
//! - Polar-to-Cartesian projection with distance compression and clamping
//!
//! Inputs are degrees, all internal math is radians. NaN coordinates
//! propagate to NaN outputs; callers validate first (see
//! [`PositionValidator`](crate::validation::PositionValidator)).

use std::f64::consts::PI;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::core::{
    GeoPoint, DEFAULT_DISTANCE_DIVISOR, DEFAULT_EYE_HEIGHT_M, DEFAULT_MAX_SCENE_DISTANCE,
    EARTH_MEAN_RADIUS_M,
};
use crate::validation::error::{LayoutResult, PlacementError};

/// Bearing reported when observer and target share coordinates
pub const INDETERMINATE_BEARING_RAD: f64 = 0.0;

/// Scene projection parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionOptions {
    /// Height every live placement is drawn at (scene units)
    pub eye_height_m: f64,
    /// Clamp ceiling for horizontal scene distance (scene units)
    pub max_scene_distance: f64,
    /// Real meters per scene unit
    pub distance_divisor: f64,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            eye_height_m: DEFAULT_EYE_HEIGHT_M,
            max_scene_distance: DEFAULT_MAX_SCENE_DISTANCE,
            distance_divisor: DEFAULT_DISTANCE_DIVISOR,
        }
    }
}

impl ProjectionOptions {
    /// Reject options that would break the `[0, max_scene_distance]` bound
    pub fn validate(&self) -> LayoutResult<()> {
        if !self.eye_height_m.is_finite() {
            return Err(Self::invalid("eye_height_m", self.eye_height_m, "must be finite"));
        }

        if !self.max_scene_distance.is_finite() || self.max_scene_distance < 0.0 {
            return Err(Self::invalid(
                "max_scene_distance",
                self.max_scene_distance,
                "must be finite and non-negative",
            ));
        }

        if !self.distance_divisor.is_finite() || self.distance_divisor <= 0.0 {
            return Err(Self::invalid(
                "distance_divisor",
                self.distance_divisor,
                "must be finite and positive",
            ));
        }

        Ok(())
    }

    fn invalid(parameter: &str, value: f64, reason: &str) -> PlacementError {
        PlacementError::InvalidOptions {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Great-circle distance between two points using the haversine formula (m)
///
/// Longitude difference is taken raw; the half-angle sine terms make a
/// crossing of the antimeridian come out the short way round.
pub fn ground_distance_meters(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat_a = a.latitude_deg.to_radians();
    let lat_b = b.latitude_deg.to_radians();
    let d_lat = (b.latitude_deg - a.latitude_deg).to_radians();
    let d_lon = (b.longitude_deg - a.longitude_deg).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push antipodal pairs a hair past 1
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_MEAN_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Initial bearing (forward azimuth) from `a` toward `b`, in (-π, π]
///
/// 0 points north, positive values turn east. Coordinate-identical points
/// have no defined bearing and return [`INDETERMINATE_BEARING_RAD`].
pub fn initial_bearing_radians(a: &GeoPoint, b: &GeoPoint) -> f64 {
    if a.same_coordinates(b) {
        return INDETERMINATE_BEARING_RAD;
    }

    let lat_a = a.latitude_deg.to_radians();
    let lat_b = b.latitude_deg.to_radians();
    let d_lon = (b.longitude_deg - a.longitude_deg).to_radians();

    let y = d_lon.sin() * lat_b.cos();
    let x = lat_a.cos() * lat_b.sin() - lat_a.sin() * lat_b.cos() * d_lon.cos();

    let bearing = y.atan2(x);
    if bearing == -PI {
        PI
    } else {
        bearing
    }
}

/// Compress a real distance into the bounded scene range
pub fn scaled_distance(raw_distance_m: f64, options: &ProjectionOptions) -> f64 {
    (raw_distance_m / options.distance_divisor)
        .min(options.max_scene_distance)
        .max(0.0)
}

/// Camera-relative offset of `target` as seen from `viewer`
///
/// x runs east, z runs south (the camera looks down -z), y is the fixed
/// eye height. Altitude differences are ignored.
pub fn relative_offset(viewer: &GeoPoint, target: &GeoPoint, options: &ProjectionOptions) -> Vector3<f64> {
    let raw = ground_distance_meters(viewer, target);
    let bearing = initial_bearing_radians(viewer, target);
    polar_offset(bearing, scaled_distance(raw, options), options.eye_height_m)
}

/// Polar (bearing, radius) to scene Cartesian at the given height
pub fn polar_offset(bearing_rad: f64, radius: f64, height: f64) -> Vector3<f64> {
    Vector3::new(bearing_rad.sin() * radius, height, -bearing_rad.cos() * radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::FRAC_PI_2;

    fn la() -> GeoPoint {
        GeoPoint::new(34.0522, -118.2437)
    }

    #[test]
    fn test_distance_identity() {
        for point in [la(), GeoPoint::new(90.0, 0.0), GeoPoint::new(-45.0, 180.0)] {
            assert_eq!(ground_distance_meters(&point, &point), 0.0);
        }
    }

    #[test]
    fn test_distance_symmetry() {
        let a = la();
        let b = GeoPoint::new(40.7128, -74.0060);

        assert_relative_eq!(
            ground_distance_meters(&a, &b),
            ground_distance_meters(&b, &a),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_distance_known_pair() {
        // Los Angeles to New York on the mean sphere
        let d = ground_distance_meters(&la(), &GeoPoint::new(40.7128, -74.0060));
        assert_relative_eq!(d, 3_935_746.0, max_relative = 1e-3);
    }

    #[test]
    fn test_distance_antimeridian_takes_short_way() {
        let d = ground_distance_meters(&GeoPoint::new(0.0, 179.9), &GeoPoint::new(0.0, -179.9));
        assert_abs_diff_eq!(d, 22_239.0, epsilon = 50.0);
    }

    #[test]
    fn test_distance_antipodal_is_finite() {
        let d = ground_distance_meters(&GeoPoint::new(0.0, 0.0), &GeoPoint::new(0.0, 180.0));
        assert!(d.is_finite());
        assert_relative_eq!(d, PI * EARTH_MEAN_RADIUS_M, max_relative = 1e-9);

        let d = ground_distance_meters(&GeoPoint::new(90.0, 0.0), &GeoPoint::new(-90.0, 0.0));
        assert_relative_eq!(d, PI * EARTH_MEAN_RADIUS_M, max_relative = 1e-9);
    }

    #[test]
    fn test_distance_nan_propagates() {
        let d = ground_distance_meters(&GeoPoint::new(f64::NAN, 0.0), &la());
        assert!(d.is_nan());
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = GeoPoint::new(0.0, 0.0);

        assert_abs_diff_eq!(initial_bearing_radians(&origin, &GeoPoint::new(1.0, 0.0)), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(initial_bearing_radians(&origin, &GeoPoint::new(0.0, 1.0)), FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(initial_bearing_radians(&origin, &GeoPoint::new(0.0, -1.0)), -FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(initial_bearing_radians(&origin, &GeoPoint::new(-1.0, 0.0)), PI, epsilon = 1e-12);
    }

    #[test]
    fn test_bearing_due_south_is_positive_pi() {
        let bearing = initial_bearing_radians(&GeoPoint::new(10.0, 5.0), &GeoPoint::new(-10.0, 5.0));
        assert_eq!(bearing, PI);
    }

    #[test]
    fn test_bearing_zero_distance_fallback() {
        let p = la();
        assert_eq!(initial_bearing_radians(&p, &p), INDETERMINATE_BEARING_RAD);
    }

    #[test]
    fn test_bearing_across_antimeridian_points_east() {
        let bearing = initial_bearing_radians(&GeoPoint::new(0.0, 179.9), &GeoPoint::new(0.0, -179.9));
        assert_abs_diff_eq!(bearing, FRAC_PI_2, epsilon = 1e-9);
    }

    #[test]
    fn test_bearing_from_pole_is_finite() {
        let bearing = initial_bearing_radians(&GeoPoint::new(90.0, 0.0), &GeoPoint::new(80.0, 45.0));
        assert!(bearing.is_finite());
        assert!(bearing > -PI && bearing <= PI);
    }

    #[test]
    fn test_relative_offset_los_angeles_scenario() {
        let options = ProjectionOptions {
            eye_height_m: 1.6,
            max_scene_distance: 20.0,
            distance_divisor: 10.0,
        };
        let viewer = la();
        let target = GeoPoint::new(34.0523, -118.2437);

        let raw = ground_distance_meters(&viewer, &target);
        assert_abs_diff_eq!(raw, 11.1, epsilon = 0.05);

        let scaled = scaled_distance(raw, &options);
        assert_abs_diff_eq!(scaled, 1.11, epsilon = 0.005);

        let offset = relative_offset(&viewer, &target, &options);
        assert_eq!(offset.y, 1.6);
        assert_abs_diff_eq!(offset.x * offset.x + offset.z * offset.z, scaled * scaled, epsilon = 1e-9);
        // Due north lands straight ahead of the camera
        assert_abs_diff_eq!(offset.x, 0.0, epsilon = 1e-9);
        assert!(offset.z < 0.0);
    }

    #[test]
    fn test_relative_offset_is_bounded() {
        let options = ProjectionOptions::default();
        let viewer = la();
        let targets = [
            GeoPoint::new(-33.8688, 151.2093),
            GeoPoint::new(90.0, 0.0),
            GeoPoint::new(-34.0522, 61.7563),
            GeoPoint::new(34.0522, -118.2437),
            GeoPoint::new(34.06, -118.25),
        ];

        for target in &targets {
            let offset = relative_offset(&viewer, target, &options);
            assert!(offset.iter().all(|c| c.is_finite()));
            assert!(offset.x.hypot(offset.z) <= options.max_scene_distance + 1e-9);
        }
    }

    #[test]
    fn test_scaled_distance_monotonic_until_clamp() {
        let options = ProjectionOptions::default();
        let viewer = GeoPoint::new(0.0, 0.0);

        let mut previous = 0.0;
        for step in 0..400 {
            let target = GeoPoint::new(step as f64 * 0.00005, 0.0);
            let scaled = scaled_distance(ground_distance_meters(&viewer, &target), &options);
            assert!(scaled >= previous);
            assert!(scaled <= options.max_scene_distance);
            previous = scaled;
        }
        assert_eq!(previous, options.max_scene_distance);
    }

    #[test]
    fn test_zero_distance_offset_sits_on_viewer() {
        let options = ProjectionOptions::default();
        let offset = relative_offset(&la(), &la(), &options);
        assert_eq!(offset.x, 0.0);
        assert_eq!(offset.y, options.eye_height_m);
        assert_abs_diff_eq!(offset.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_options_validation() {
        assert!(ProjectionOptions::default().validate().is_ok());

        let zero_divisor = ProjectionOptions {
            distance_divisor: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            zero_divisor.validate(),
            Err(PlacementError::InvalidOptions { ref parameter, .. }) if parameter == "distance_divisor"
        ));

        let negative_max = ProjectionOptions {
            max_scene_distance: -1.0,
            ..Default::default()
        };
        assert!(negative_max.validate().is_err());

        let nan_height = ProjectionOptions {
            eye_height_m: f64::NAN,
            ..Default::default()
        };
        assert!(nan_height.validate().is_err());
    }
}
