//! Geographic projection and scene layout

pub mod projection;
pub mod layout;

pub use projection::{
    ground_distance_meters, initial_bearing_radians, relative_offset, scaled_distance,
    ProjectionOptions,
};
pub use layout::{DemoLayoutParams, LayoutMode, LayoutOutcome, SceneLayoutEngine};
