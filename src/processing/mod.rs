//! Session processing around the layout engine

pub mod session;

pub use session::{LayoutSession, SessionState};
