//! Viewing-session state around the layout engine
//!
//! Tracks whether the viewer has been located yet and whether the scene is
//! currently live or procedural. Every viewer update or target refresh
//! triggers a fresh, total recomputation; no diff state is kept.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::algorithms::layout::{LayoutMode, LayoutOutcome, SceneLayoutEngine};
use crate::core::{Target, ViewerState};

/// Session-level layout state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No location attempt has resolved yet
    Uninitialized,
    Live,
    Demo,
}

impl From<LayoutMode> for SessionState {
    fn from(mode: LayoutMode) -> Self {
        match mode {
            LayoutMode::Live => SessionState::Live,
            LayoutMode::Demo => SessionState::Demo,
        }
    }
}

/// Owns the latest inputs and layout for one viewing session
pub struct LayoutSession {
    engine: SceneLayoutEngine,
    state: SessionState,
    viewer: ViewerState,
    targets: Vec<Target>,
    last_outcome: Option<LayoutOutcome>,
    transitions: u32,
}

impl LayoutSession {
    pub fn new(engine: SceneLayoutEngine) -> Self {
        Self {
            engine,
            state: SessionState::Uninitialized,
            viewer: ViewerState::unknown(),
            targets: Vec::new(),
            last_outcome: None,
            transitions: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn engine(&self) -> &SceneLayoutEngine {
        &self.engine
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn last_outcome(&self) -> Option<&LayoutOutcome> {
        self.last_outcome.as_ref()
    }

    /// Number of state changes since the session started
    pub fn transitions(&self) -> u32 {
        self.transitions
    }

    /// Apply a new viewer state from the position source and relayout
    pub fn update_viewer(&mut self, viewer: ViewerState) -> &LayoutOutcome {
        self.viewer = viewer;
        self.relayout()
    }

    /// Replace the target list
    ///
    /// Returns `None` while the viewer has never been resolved; the targets
    /// are kept and laid out on the first viewer update.
    pub fn refresh_targets(&mut self, targets: Vec<Target>) -> Option<&LayoutOutcome> {
        self.targets = targets;
        if self.state == SessionState::Uninitialized {
            return None;
        }
        Some(self.relayout())
    }

    fn relayout(&mut self) -> &LayoutOutcome {
        let outcome = self.engine.layout(&self.viewer, &self.targets);
        let next = SessionState::from(outcome.mode);

        if next != self.state {
            info!(from = ?self.state, to = ?next, "layout session state changed");
            self.state = next;
            self.transitions += 1;
        }

        self.last_outcome.insert(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GeoPoint;

    fn targets() -> Vec<Target> {
        vec![
            Target::new("a", GeoPoint::new(34.0523, -118.2437)),
            Target::new("b", GeoPoint::new(34.0525, -118.2440)),
        ]
    }

    fn located() -> ViewerState {
        ViewerState::at(GeoPoint::new(34.0522, -118.2437))
    }

    #[test]
    fn test_session_starts_uninitialized() {
        let session = LayoutSession::new(SceneLayoutEngine::default());
        assert_eq!(session.state(), SessionState::Uninitialized);
        assert!(session.last_outcome().is_none());
        assert_eq!(session.transitions(), 0);
    }

    #[test]
    fn test_refresh_before_location_defers_layout() {
        let mut session = LayoutSession::new(SceneLayoutEngine::default());
        assert!(session.refresh_targets(targets()).is_none());
        assert_eq!(session.targets().len(), 2);

        let outcome = session.update_viewer(located());
        assert_eq!(outcome.placements.len(), 2);
        assert_eq!(session.state(), SessionState::Live);
    }

    #[test]
    fn test_first_resolution_without_fix_enters_demo() {
        let mut session = LayoutSession::new(SceneLayoutEngine::default());
        session.refresh_targets(targets());

        let outcome = session.update_viewer(ViewerState::unknown());
        assert_eq!(outcome.mode, LayoutMode::Demo);
        assert_eq!(session.state(), SessionState::Demo);
        assert_eq!(session.transitions(), 1);
    }

    #[test]
    fn test_live_demo_transitions() {
        let mut session = LayoutSession::new(SceneLayoutEngine::default());
        session.refresh_targets(targets());

        session.update_viewer(located());
        assert_eq!(session.state(), SessionState::Live);

        // Permission revoked mid-session
        session.update_viewer(ViewerState::unknown());
        assert_eq!(session.state(), SessionState::Demo);

        session.update_viewer(located());
        assert_eq!(session.state(), SessionState::Live);
        assert_eq!(session.transitions(), 3);

        // Same mode again is not a transition
        session.update_viewer(located());
        assert_eq!(session.transitions(), 3);
    }

    #[test]
    fn test_refresh_after_resolution_recomputes() {
        let mut session = LayoutSession::new(SceneLayoutEngine::default());
        session.update_viewer(located());

        let outcome = session.refresh_targets(targets()).unwrap();
        assert_eq!(outcome.placements.len(), 2);

        let outcome = session.refresh_targets(Vec::new()).unwrap();
        assert!(outcome.placements.is_empty());
        assert_eq!(session.state(), SessionState::Live);
    }
}
