//! Core data types for the placement core

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Geographic position in degrees, optionally with altitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_m: Option<f64>,
}

impl GeoPoint {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_m: None,
        }
    }

    pub fn with_altitude(mut self, altitude_m: f64) -> Self {
        self.altitude_m = Some(altitude_m);
        self
    }

    /// True when both points share latitude and longitude exactly
    pub fn same_coordinates(&self, other: &GeoPoint) -> bool {
        self.latitude_deg == other.latitude_deg && self.longitude_deg == other.longitude_deg
    }
}

/// Higher-precision position overlay for a target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrectedPosition {
    pub point: GeoPoint,
    /// Reported horizontal accuracy (m)
    pub accuracy_m: f64,
    /// Whether a correction service actually refined the fix
    pub correction_applied: bool,
}

/// Deployed agent as seen by the placement core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: String,
    pub label: String,
    /// Standard consumer-grade position
    pub position: GeoPoint,
    pub corrected: Option<CorrectedPosition>,
    /// Accuracy reported with the record, whether or not it was corrected (m)
    #[serde(default)]
    pub reported_accuracy_m: Option<f64>,
    /// Interaction radius around the agent (m)
    pub display_radius_m: f64,
    /// Presentation category, never used in placement math
    pub category: String,
}

impl Target {
    pub fn new(id: impl Into<String>, position: GeoPoint) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            position,
            corrected: None,
            reported_accuracy_m: None,
            display_radius_m: crate::core::DEFAULT_DISPLAY_RADIUS_M,
            category: String::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_corrected(mut self, corrected: CorrectedPosition) -> Self {
        self.corrected = Some(corrected);
        self
    }

    pub fn with_reported_accuracy(mut self, accuracy_m: f64) -> Self {
        self.reported_accuracy_m = Some(accuracy_m);
        self
    }

    pub fn with_display_radius(mut self, display_radius_m: f64) -> Self {
        self.display_radius_m = display_radius_m;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Position used for all projection math: corrected if present, else standard
    pub fn effective_position(&self) -> GeoPoint {
        match &self.corrected {
            Some(corrected) => corrected.point,
            None => self.position,
        }
    }
}

/// Viewer position as resolved by the position source
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewerState {
    pub position: Option<GeoPoint>,
}

impl ViewerState {
    pub fn at(position: GeoPoint) -> Self {
        Self {
            position: Some(position),
        }
    }

    pub fn unknown() -> Self {
        Self { position: None }
    }
}

/// Camera-relative placement of one target for one layout pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementResult {
    pub target_id: String,
    /// Offset from the viewer in scene units: x east, y up, z toward the viewer's back
    pub offset: Vector3<f64>,
    /// Real ground distance, `None` in demo mode
    pub ground_distance_m: Option<f64>,
    /// Whether the viewer is inside the target's display radius, `None` in demo mode
    pub within_range: Option<bool>,
}

impl PlacementResult {
    /// Distance from the viewer in the horizontal scene plane
    pub fn horizontal_scene_distance(&self) -> f64 {
        self.offset.x.hypot(self.offset.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_position_prefers_corrected() {
        let standard = GeoPoint::new(34.0522, -118.2437);
        let precise = GeoPoint::new(34.052_201, -118.243_702).with_altitude(92.0);

        let target = Target::new("agent-1", standard);
        assert_eq!(target.effective_position(), standard);

        let target = target.with_corrected(CorrectedPosition {
            point: precise,
            accuracy_m: 0.02,
            correction_applied: true,
        });
        assert_eq!(target.effective_position(), precise);
    }

    #[test]
    fn test_target_builder_defaults() {
        let target = Target::new("agent-7", GeoPoint::new(0.0, 0.0));
        assert_eq!(target.label, "agent-7");
        assert_eq!(target.display_radius_m, crate::core::DEFAULT_DISPLAY_RADIUS_M);
        assert!(target.category.is_empty());
    }

    #[test]
    fn test_geo_point_serialization_skips_missing_altitude() {
        let json = serde_json::to_string(&GeoPoint::new(1.5, -2.5)).unwrap();
        assert_eq!(json, r#"{"latitude_deg":1.5,"longitude_deg":-2.5}"#);

        let parsed: GeoPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.altitude_m, None);
    }
}
