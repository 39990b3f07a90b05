//! Error classification for layout passes

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures surfaced by the placement core.
///
/// None of these abort a layout pass. `InvalidPosition` is collected per
/// target and returned next to the placements that did succeed.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum PlacementError {
    /// Target coordinates are non-finite or outside the valid range
    #[error("Invalid position for target '{target_id}' ({latitude_deg}, {longitude_deg}): {reason}")]
    InvalidPosition {
        target_id: String,
        latitude_deg: f64,
        longitude_deg: f64,
        reason: String,
    },
    /// Projection options cannot produce a bounded placement
    #[error("Invalid projection option {parameter} = {value}: {reason}")]
    InvalidOptions {
        parameter: String,
        value: String,
        reason: String,
    },
}

/// Result type for placement operations
pub type LayoutResult<T> = Result<T, PlacementError>;

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    /// Layout cannot run with the given setup
    High,
    /// One target is missing from the scene
    Warning,
}

impl PlacementError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PlacementError::InvalidPosition { .. } => ErrorSeverity::Warning,
            PlacementError::InvalidOptions { .. } => ErrorSeverity::High,
        }
    }

    /// Whether the caller must fix setup before laying out again
    pub fn is_fatal(&self) -> bool {
        matches!(self.severity(), ErrorSeverity::High)
    }

    /// Target the error refers to, if any
    pub fn target_id(&self) -> Option<&str> {
        match self {
            PlacementError::InvalidPosition { target_id, .. } => Some(target_id),
            PlacementError::InvalidOptions { .. } => None,
        }
    }
}
