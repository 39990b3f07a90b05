//! Physical constants and layout defaults

/// Mean Earth radius used by the haversine formula (m)
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_000.0;

/// Camera height above ground for flat placement (scene units)
pub const DEFAULT_EYE_HEIGHT_M: f64 = 1.6;

/// Farthest a live target may be drawn from the viewer (scene units)
pub const DEFAULT_MAX_SCENE_DISTANCE: f64 = 20.0;

/// Real-world meters per scene unit before clamping
pub const DEFAULT_DISTANCE_DIVISOR: f64 = 10.0;

/// Demo spiral: angular step between consecutive targets (degrees)
pub const DEMO_ANGLE_STEP_DEG: f64 = 60.0;

/// Demo spiral: radius of the first target (scene units)
pub const DEMO_BASE_RADIUS: f64 = 3.0;

/// Demo spiral: radius growth per target (scene units)
pub const DEMO_RADIUS_STEP: f64 = 0.5;

/// Demo spiral: height growth per target (scene units)
pub const DEMO_HEIGHT_STEP: f64 = 0.3;

/// Interaction radius for agents deployed without one (m)
pub const DEFAULT_DISPLAY_RADIUS_M: f64 = 25.0;

/// Horizontal accuracy assumed for uncorrected consumer GPS (m)
pub const STANDARD_GPS_ACCURACY_M: f64 = 10.0;

/// Ground distance at which labels switch from meters to kilometers
pub const KILOMETER_LABEL_THRESHOLD_M: f64 = 1000.0;
