//! Core types and constants for the placement core

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
