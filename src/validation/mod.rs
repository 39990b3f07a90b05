//! Input validation and error classification

pub mod data;
pub mod error;

pub use data::PositionValidator;
pub use error::{ErrorSeverity, LayoutResult, PlacementError};
