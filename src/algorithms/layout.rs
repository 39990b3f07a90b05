//! Scene layout for deployed agents
//!
//! Chooses between live geographic projection and the procedural demo
//! spiral on every pass, then produces one placement per usable target.
//! A pass is a pure function of its inputs: the engine keeps no state
//! between calls, so results can be recomputed and discarded freely.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::algorithms::projection::{
    ground_distance_meters, polar_offset, relative_offset, ProjectionOptions,
};
use crate::core::{
    GeoPoint, PlacementResult, Target, ViewerState, DEMO_ANGLE_STEP_DEG, DEMO_BASE_RADIUS,
    DEMO_HEIGHT_STEP, DEMO_RADIUS_STEP,
};
use crate::validation::{LayoutResult, PlacementError, PositionValidator};

/// Which placement strategy produced an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutMode {
    /// Real viewer position, geographic projection
    Live,
    /// No viewer position, deterministic spiral
    Demo,
}

/// Spiral parameters for demo mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemoLayoutParams {
    /// Angle between consecutive targets (degrees)
    pub angle_step_deg: f64,
    /// Radius of the first target (scene units)
    pub base_radius: f64,
    /// Radius added per target (scene units)
    pub radius_step: f64,
    /// Height added per target so rings do not overlap (scene units)
    pub height_step: f64,
}

impl Default for DemoLayoutParams {
    fn default() -> Self {
        Self {
            angle_step_deg: DEMO_ANGLE_STEP_DEG,
            base_radius: DEMO_BASE_RADIUS,
            radius_step: DEMO_RADIUS_STEP,
            height_step: DEMO_HEIGHT_STEP,
        }
    }
}

impl DemoLayoutParams {
    /// Reject parameters that would give non-finite spiral slots
    pub fn validate(&self) -> LayoutResult<()> {
        let fields = [
            ("angle_step_deg", self.angle_step_deg),
            ("base_radius", self.base_radius),
            ("radius_step", self.radius_step),
            ("height_step", self.height_step),
        ];

        for (parameter, value) in fields {
            if !value.is_finite() {
                return Err(PlacementError::InvalidOptions {
                    parameter: format!("demo.{}", parameter),
                    value: value.to_string(),
                    reason: "must be finite".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Result of one layout pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutOutcome {
    pub mode: LayoutMode,
    /// Placements in input order, skipped targets omitted
    pub placements: Vec<PlacementResult>,
    /// Per-target failures in order of discovery
    pub warnings: Vec<PlacementError>,
}

impl LayoutOutcome {
    pub fn placement_for(&self, target_id: &str) -> Option<&PlacementResult> {
        self.placements.iter().find(|p| p.target_id == target_id)
    }

    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Produces camera-relative placements for a set of targets
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayoutEngine {
    projection: ProjectionOptions,
    demo: DemoLayoutParams,
}

impl Default for SceneLayoutEngine {
    fn default() -> Self {
        Self {
            projection: ProjectionOptions::default(),
            demo: DemoLayoutParams::default(),
        }
    }
}

impl SceneLayoutEngine {
    pub fn new(projection: ProjectionOptions, demo: DemoLayoutParams) -> LayoutResult<Self> {
        projection.validate()?;
        demo.validate()?;
        Ok(Self { projection, demo })
    }

    pub fn projection(&self) -> &ProjectionOptions {
        &self.projection
    }

    pub fn demo_params(&self) -> &DemoLayoutParams {
        &self.demo
    }

    /// Mode a pass would use for this viewer state
    ///
    /// A viewer fix with unusable coordinates counts as no fix.
    pub fn mode_for(viewer: &ViewerState) -> LayoutMode {
        match viewer.position {
            Some(position) if PositionValidator::is_valid(&position) => LayoutMode::Live,
            _ => LayoutMode::Demo,
        }
    }

    /// Lay out all targets for the current viewer state
    pub fn layout(&self, viewer: &ViewerState, targets: &[Target]) -> LayoutOutcome {
        let mode = Self::mode_for(viewer);
        if let (LayoutMode::Demo, Some(position)) = (mode, viewer.position) {
            warn!(
                latitude = position.latitude_deg,
                longitude = position.longitude_deg,
                "viewer fix has invalid coordinates, falling back to demo layout"
            );
        }

        let mut placements = Vec::with_capacity(targets.len());
        let mut warnings = Vec::new();

        for (index, target) in targets.iter().enumerate() {
            let effective = match PositionValidator::validate_target(target) {
                Ok(point) => point,
                Err(error) => {
                    warn!(target_id = %target.id, %error, "skipping target");
                    warnings.push(error);
                    continue;
                }
            };

            let placement = match (mode, viewer.position) {
                (LayoutMode::Live, Some(viewer_position)) => {
                    self.live_placement(&viewer_position, target, &effective)
                }
                _ => self.demo_placement(index, target),
            };
            placements.push(placement);
        }

        debug!(
            ?mode,
            placed = placements.len(),
            skipped = warnings.len(),
            "layout pass complete"
        );

        LayoutOutcome {
            mode,
            placements,
            warnings,
        }
    }

    /// Ids of targets whose display radius contains the viewer
    pub fn targets_in_range(outcome: &LayoutOutcome) -> Vec<&str> {
        outcome
            .placements
            .iter()
            .filter(|p| p.within_range == Some(true))
            .map(|p| p.target_id.as_str())
            .collect()
    }

    /// Spiral slot for the target at `index` in the supplied order
    pub fn demo_offset(&self, index: usize) -> Vector3<f64> {
        let i = index as f64;
        let angle = (i * self.demo.angle_step_deg).to_radians();
        let radius = self.demo.base_radius + i * self.demo.radius_step;
        let height = self.projection.eye_height_m + i * self.demo.height_step;

        polar_offset(angle, radius, height)
    }

    fn live_placement(&self, viewer: &GeoPoint, target: &Target, effective: &GeoPoint) -> PlacementResult {
        let distance = ground_distance_meters(viewer, effective);

        PlacementResult {
            target_id: target.id.clone(),
            offset: relative_offset(viewer, effective, &self.projection),
            ground_distance_m: Some(distance),
            within_range: Some(distance <= target.display_radius_m),
        }
    }

    fn demo_placement(&self, index: usize, target: &Target) -> PlacementResult {
        PlacementResult {
            target_id: target.id.clone(),
            offset: self.demo_offset(index),
            ground_distance_m: None,
            within_range: None,
        }
    }
}
