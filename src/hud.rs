//! Score / upload progress projection
//!
//! Read-only view of the session for the DOM overlay. Progress is clamped
//! here and only here.

use crate::sim::SessionState;

/// What the HUD shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudSnapshot {
    pub score: u64,
    /// Upload progress clamped to [0, 100]
    pub progress: u32,
}

impl HudSnapshot {
    pub fn project(state: &SessionState) -> Self {
        Self {
            score: state.score,
            progress: state.upload_progress.min(100),
        }
    }

    pub fn score_label(&self) -> String {
        format!("SCORE: {}", self.score)
    }

    pub fn progress_label(&self) -> String {
        format!("UPLOADING PPT: {}%", self.progress)
    }

    /// Progress bar fill in [0, 1]
    pub fn bar_fraction(&self) -> f32 {
        self.progress as f32 / 100.0
    }

    /// CSS width for the progress bar fill
    pub fn bar_width(&self) -> String {
        format!("{}%", self.progress)
    }
}

/// Remembers what was last published so unchanged frames skip DOM writes
#[derive(Debug, Default)]
pub struct Hud {
    last: Option<HudSnapshot>,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    /// New snapshot if it differs from the last published one
    pub fn refresh(&mut self, state: &SessionState) -> Option<HudSnapshot> {
        let snapshot = HudSnapshot::project(state);
        if self.last == Some(snapshot) {
            return None;
        }
        self.last = Some(snapshot);
        Some(snapshot)
    }

    /// Force the next refresh to publish (new session)
    pub fn invalidate(&mut self) {
        self.last = None;
    }
}
