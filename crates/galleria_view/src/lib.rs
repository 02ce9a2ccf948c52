//! Galleria Viewer Core
//!
//! The image viewer's gesture state machine and transform math, kept
//! browser-free: pointer events go in, transform state and side
//! effects come out. The served page script drives the same logic with
//! the same tuning constants, which it receives from this crate via
//! the page bootstrap.

mod geom;
mod gesture;
mod tuning;

pub use geom::{clamp_pan, contain_box, pinch_pan, ContainBox, Size, Vec2};
pub use gesture::{
    Effect, GestureEvent, Mode, PanState, PinchState, SwipeDirection, SwipeState, Viewer,
};
pub use tuning::{
    GestureTuning, EDGE_DAMPING, MAX_ZOOM, MIN_ZOOM, SLIDE_MS, SWIPE_COMMIT_PX, UNZOOMED_EPSILON,
    VERTICAL_ABORT_PX,
};
