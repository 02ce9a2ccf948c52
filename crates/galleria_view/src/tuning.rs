//! Gesture tuning constants shared with the viewer page script

use serde::Serialize;

/// Horizontal distance that commits a swipe to a neighbor image.
pub const SWIPE_COMMIT_PX: f64 = 80.0;

/// Vertical drift that abandons a swipe as a probable scroll.
pub const VERTICAL_ABORT_PX: f64 = 120.0;

/// Damping applied when dragging past the first or last image.
pub const EDGE_DAMPING: f64 = 0.3;

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 6.0;

/// Scales at or below this count as "not zoomed" for mode selection.
pub const UNZOOMED_EPSILON: f64 = 1.01;

/// Duration of the commit/cancel slide animation.
pub const SLIDE_MS: u64 = 200;

/// Tuning bundle serialized into the viewer page, so the client runs
/// on the same numbers the state machine is tested against.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureTuning {
    pub swipe_commit_px: f64,
    pub vertical_abort_px: f64,
    pub edge_damping: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub unzoomed_epsilon: f64,
    pub slide_ms: u64,
}

impl Default for GestureTuning {
    fn default() -> Self {
        Self {
            swipe_commit_px: SWIPE_COMMIT_PX,
            vertical_abort_px: VERTICAL_ABORT_PX,
            edge_damping: EDGE_DAMPING,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            unzoomed_epsilon: UNZOOMED_EPSILON,
            slide_ms: SLIDE_MS,
        }
    }
}
