//! Adapters for the surrounding application
//!
//! Repository rows and position-source fixes come in through `types`;
//! renderer labels and reports go out through `formatting`.

pub mod types;
pub mod formatting;

pub use types::{
    active_targets, load_targets_json, validate_correction_request, PositionFix, RecordError,
    TargetRecord,
};
pub use formatting::{
    accuracy_label, format_ground_distance, CategoryStyle, JsonFormatter, PlacementEntry,
    PlacementReport, TextFormatter,
};
