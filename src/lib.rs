//! AgentSphere Placement Core
//!
//! Geospatial positioning for the AgentSphere AR viewer: turns the viewer's
//! location and a list of deployed agents into bounded, camera-relative
//! scene placements, with a deterministic spiral layout when the viewer
//! cannot be located.

pub mod core;
pub mod algorithms;
pub mod processing;
pub mod validation;
pub mod utils;
pub mod api;

// Re-export commonly used types
pub use crate::core::{CorrectedPosition, GeoPoint, PlacementResult, Target, ViewerState, EARTH_MEAN_RADIUS_M};
pub use algorithms::projection::{
    ground_distance_meters, initial_bearing_radians, relative_offset, scaled_distance, ProjectionOptions,
};
pub use algorithms::layout::{DemoLayoutParams, LayoutMode, LayoutOutcome, SceneLayoutEngine};
pub use processing::{LayoutSession, SessionState};
pub use validation::{PlacementError, PositionValidator};
pub use utils::{ConfigError, ConfigurationManager, LayoutConfig};
pub use api::{
    format_ground_distance, JsonFormatter, PlacementReport, PositionFix, TargetRecord, TextFormatter,
};
