//! Pointer gesture state machine for the image viewer

use crate::geom::{clamp_pan, contain_box, pinch_pan, Size, Vec2};
use crate::tuning::{
    EDGE_DAMPING, MAX_ZOOM, MIN_ZOOM, SWIPE_COMMIT_PX, UNZOOMED_EPSILON, VERTICAL_ABORT_PX,
};

/// Which neighbor a swipe or navigation heads toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Prev,
    Next,
}

/// Interaction mode, selected by contact count and zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    Idle,
    Swipe(SwipeState),
    Pan(PanState),
    Pinch(PinchState),
}

/// Single-contact swipe tracking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeState {
    start: Vec2,
    dx: f64,
    dy: f64,
    /// Set once vertical drift exceeds the abort threshold; the rest
    /// of this contact is ignored.
    latched: bool,
}

/// Single-contact pan tracking while zoomed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanState {
    last: Vec2,
}

/// Two-contact pinch baseline, captured when the pinch starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchState {
    start_dist: f64,
    start_scale: f64,
    start_pan: Vec2,
}

/// One pointer event from the driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Down { id: u64, pos: Vec2 },
    Move { id: u64, pos: Vec2 },
    Up { id: u64, pos: Vec2 },
    Cancel { id: u64 },
    /// The commit or cancel slide animation finished.
    SlideFinished,
}

/// Side effects the driver carries out after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Prefetch the image at this index.
    Preload { index: usize },
    /// Reveal the neighbor image sliding in from the given side.
    ShowNeighbor { index: usize, side: SwipeDirection },
    HideNeighbor,
    /// Animate the slide that commits to the neighbor, then report
    /// back with `SlideFinished`.
    BeginCommit { to_index: usize, side: SwipeDirection },
    /// Animate the swipe offset back to zero, then report back with
    /// `SlideFinished`.
    BeginCancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Contact {
    id: u64,
    pos: Vec2,
}

/// Gesture state for one open viewer session.
///
/// The driver feeds pointer events in, applies the returned effects,
/// and reads the transform back through the accessors after every
/// event. Everything here is synchronous; animations run driver-side
/// and report completion via [`GestureEvent::SlideFinished`].
#[derive(Debug, Clone)]
pub struct Viewer {
    image_count: usize,
    index: usize,
    viewport: Size,
    /// Natural size of the current image; zero until the driver
    /// reports it, which makes geometry fall back to the viewport.
    image: Size,
    contacts: Vec<Contact>,
    mode: Mode,
    scale: f64,
    pan: Vec2,
    swipe_offset: f64,
    neighbor: Option<(usize, SwipeDirection)>,
    sliding: bool,
    pending: Option<usize>,
}

impl Viewer {
    /// Open a viewer session on `image_count` images starting at
    /// `start_index` (clamped into range). The returned effects
    /// prefetch the starting image's neighbors.
    pub fn new(image_count: usize, start_index: usize, viewport: Size) -> (Self, Vec<Effect>) {
        let index = start_index.min(image_count.saturating_sub(1));
        let viewer = Self {
            image_count,
            index,
            viewport,
            image: Size::ZERO,
            contacts: Vec::new(),
            mode: Mode::Idle,
            scale: MIN_ZOOM,
            pan: Vec2::ZERO,
            swipe_offset: 0.0,
            neighbor: None,
            sliding: false,
            pending: None,
        };
        let effects = viewer.preload_neighbors();
        (viewer, effects)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Live horizontal offset of the current image while swiping.
    pub fn swipe_offset(&self) -> f64 {
        self.swipe_offset
    }

    /// True while a commit/cancel animation is in flight.
    pub fn is_sliding(&self) -> bool {
        self.sliding
    }

    /// Record the current image's natural dimensions once decoded.
    pub fn set_image(&mut self, image: Size) {
        self.image = image;
        self.pan = clamp_pan(self.viewport, self.image, self.scale, self.pan);
    }

    /// Record a viewport resize.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.pan = clamp_pan(self.viewport, self.image, self.scale, self.pan);
    }

    /// Feed one pointer event.
    pub fn handle(&mut self, event: GestureEvent) -> Vec<Effect> {
        match event {
            GestureEvent::Down { id, pos } => self.on_down(id, pos),
            GestureEvent::Move { id, pos } => self.on_move(id, pos),
            GestureEvent::Up { id, pos } => self.on_up(id, pos),
            GestureEvent::Cancel { id } => self.on_cancel(id),
            GestureEvent::SlideFinished => self.finish_slide(),
        }
    }

    /// Keyboard or button navigation to a neighbor. Only acts while
    /// unzoomed, mirroring swipe availability.
    pub fn nav(&mut self, side: SwipeDirection) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.sliding {
            effects.extend(self.finish_slide());
        }
        if self.scale > UNZOOMED_EPSILON {
            return effects;
        }
        if let Some(target) = self.neighbor_index(side) {
            self.sliding = true;
            self.pending = Some(target);
            effects.push(Effect::BeginCommit {
                to_index: target,
                side,
            });
        }
        effects
    }

    fn on_down(&mut self, id: u64, pos: Vec2) -> Vec<Effect> {
        let mut effects = Vec::new();
        // A touch during the slide animation finalizes it first, so
        // the new gesture starts from a settled transform.
        if self.sliding {
            effects.extend(self.finish_slide());
        }

        self.upsert_contact(id, pos);

        match self.contacts.len() {
            1 => {
                if self.scale > UNZOOMED_EPSILON {
                    self.mode = Mode::Pan(PanState { last: pos });
                } else {
                    self.mode = Mode::Swipe(SwipeState {
                        start: pos,
                        dx: 0.0,
                        dy: 0.0,
                        latched: false,
                    });
                    self.swipe_offset = 0.0;
                }
            }
            2 => {
                // Fold any in-flight swipe offset into the pan so the
                // pinch anchors exactly under the fingers.
                if matches!(self.mode, Mode::Swipe(_)) {
                    self.pan.x += self.swipe_offset;
                    self.swipe_offset = 0.0;
                    if self.neighbor.take().is_some() {
                        effects.push(Effect::HideNeighbor);
                    }
                }
                self.start_pinch();
            }
            _ => {}
        }

        effects
    }

    fn on_move(&mut self, id: u64, pos: Vec2) -> Vec<Effect> {
        if !self.update_contact(id, pos) {
            return Vec::new();
        }

        match self.mode {
            Mode::Pinch(start) if self.contacts.len() >= 2 => {
                let a = self.contacts[0].pos;
                let b = self.contacts[1].pos;
                let dist = a.distance(b).max(1.0);
                let mid = a.midpoint(b);

                let scale =
                    (start.start_scale * dist / start.start_dist).clamp(MIN_ZOOM, MAX_ZOOM);
                let ratio = scale / start.start_scale;
                let fit = contain_box(self.viewport, self.image);

                self.scale = scale;
                self.pan = clamp_pan(
                    self.viewport,
                    self.image,
                    scale,
                    pinch_pan(fit.origin, mid, start.start_pan, ratio),
                );
                Vec::new()
            }
            Mode::Pan(state) if self.contacts.len() == 1 => {
                let moved = Vec2::new(
                    self.pan.x + (pos.x - state.last.x),
                    self.pan.y + (pos.y - state.last.y),
                );
                self.pan = clamp_pan(self.viewport, self.image, self.scale, moved);
                self.mode = Mode::Pan(PanState { last: pos });
                Vec::new()
            }
            Mode::Swipe(_) if self.contacts.len() == 1 => self.on_swipe_move(pos),
            _ => Vec::new(),
        }
    }

    fn on_swipe_move(&mut self, pos: Vec2) -> Vec<Effect> {
        let Mode::Swipe(mut swipe) = self.mode else {
            return Vec::new();
        };
        if swipe.latched {
            return Vec::new();
        }

        let mut effects = Vec::new();
        swipe.dx = pos.x - swipe.start.x;
        swipe.dy = pos.y - swipe.start.y;

        if swipe.dy.abs() > VERTICAL_ABORT_PX {
            // Probable scroll: freeze the offset and ignore the rest
            // of this contact.
            swipe.latched = true;
            self.mode = Mode::Swipe(swipe);
            return effects;
        }

        let side = if swipe.dx < 0.0 {
            SwipeDirection::Next
        } else {
            SwipeDirection::Prev
        };

        match self.neighbor_index(side) {
            Some(target) if swipe.dx != 0.0 => {
                self.swipe_offset = swipe.dx;
                if self.neighbor != Some((target, side)) {
                    self.neighbor = Some((target, side));
                    effects.push(Effect::ShowNeighbor {
                        index: target,
                        side,
                    });
                }
            }
            _ => {
                // Past the first or last image the drag meets
                // resistance and no neighbor slides in.
                self.swipe_offset = swipe.dx * EDGE_DAMPING;
                if self.neighbor.take().is_some() {
                    effects.push(Effect::HideNeighbor);
                }
            }
        }

        self.mode = Mode::Swipe(swipe);
        effects
    }

    fn on_up(&mut self, id: u64, pos: Vec2) -> Vec<Effect> {
        if !self.update_contact(id, pos) {
            return Vec::new();
        }
        self.remove_contact(id);

        match self.mode {
            Mode::Pinch(_) => {
                if self.contacts.len() >= 2 {
                    // Survivors re-anchor so the image does not jump.
                    self.start_pinch();
                } else if self.contacts.len() == 1 && self.scale > UNZOOMED_EPSILON {
                    self.mode = Mode::Pan(PanState {
                        last: self.contacts[0].pos,
                    });
                } else if self.contacts.is_empty() {
                    self.mode = Mode::Idle;
                }
                Vec::new()
            }
            Mode::Pan(_) => {
                if self.contacts.is_empty() {
                    self.mode = Mode::Idle;
                }
                Vec::new()
            }
            Mode::Swipe(swipe) => self.end_swipe(swipe),
            Mode::Idle => Vec::new(),
        }
    }

    fn on_cancel(&mut self, id: u64) -> Vec<Effect> {
        if !self.contacts.iter().any(|c| c.id == id) {
            return Vec::new();
        }
        self.remove_contact(id);

        let mut effects = Vec::new();
        if matches!(self.mode, Mode::Swipe(_)) {
            if self.swipe_offset != 0.0 {
                self.sliding = true;
                self.pending = None;
                effects.push(Effect::BeginCancel);
            } else if self.neighbor.take().is_some() {
                effects.push(Effect::HideNeighbor);
            }
        }

        self.mode = match self.contacts.first() {
            Some(c) => Mode::Pan(PanState { last: c.pos }),
            None => Mode::Idle,
        };

        effects
    }

    fn end_swipe(&mut self, swipe: SwipeState) -> Vec<Effect> {
        self.mode = Mode::Idle;
        let mut effects = Vec::new();

        let side = if swipe.dx < 0.0 {
            SwipeDirection::Next
        } else {
            SwipeDirection::Prev
        };

        if !swipe.latched && swipe.dx.abs() >= SWIPE_COMMIT_PX {
            if let Some(target) = self.neighbor_index(side) {
                self.sliding = true;
                self.pending = Some(target);
                effects.push(Effect::BeginCommit {
                    to_index: target,
                    side,
                });
                return effects;
            }
        }

        if self.swipe_offset != 0.0 {
            self.sliding = true;
            self.pending = None;
            effects.push(Effect::BeginCancel);
        } else if self.neighbor.take().is_some() {
            effects.push(Effect::HideNeighbor);
        }

        effects
    }

    fn finish_slide(&mut self) -> Vec<Effect> {
        if !self.sliding {
            return Vec::new();
        }
        self.sliding = false;
        self.swipe_offset = 0.0;

        match self.pending.take() {
            Some(next) => {
                self.index = next;
                self.scale = MIN_ZOOM;
                self.pan = Vec2::ZERO;
                self.image = Size::ZERO;
                self.neighbor = None;
                self.preload_neighbors()
            }
            None => {
                if self.neighbor.take().is_some() {
                    vec![Effect::HideNeighbor]
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn start_pinch(&mut self) {
        let a = self.contacts[0].pos;
        let b = self.contacts[1].pos;
        self.mode = Mode::Pinch(PinchState {
            start_dist: a.distance(b).max(1.0),
            start_scale: self.scale,
            start_pan: self.pan,
        });
    }

    fn neighbor_index(&self, side: SwipeDirection) -> Option<usize> {
        match side {
            SwipeDirection::Prev => self.index.checked_sub(1),
            SwipeDirection::Next => {
                let next = self.index + 1;
                (next < self.image_count).then_some(next)
            }
        }
    }

    fn preload_neighbors(&self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(prev) = self.index.checked_sub(1) {
            effects.push(Effect::Preload { index: prev });
        }
        if self.index + 1 < self.image_count {
            effects.push(Effect::Preload {
                index: self.index + 1,
            });
        }
        effects
    }

    fn upsert_contact(&mut self, id: u64, pos: Vec2) {
        match self.contacts.iter_mut().find(|c| c.id == id) {
            Some(c) => c.pos = pos,
            None => self.contacts.push(Contact { id, pos }),
        }
    }

    fn update_contact(&mut self, id: u64, pos: Vec2) -> bool {
        match self.contacts.iter_mut().find(|c| c.id == id) {
            Some(c) => {
                c.pos = pos;
                true
            }
            None => false,
        }
    }

    fn remove_contact(&mut self, id: u64) {
        self.contacts.retain(|c| c.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn viewer(count: usize, index: usize) -> Viewer {
        Viewer::new(count, index, Size::new(800.0, 600.0)).0
    }

    fn down(v: &mut Viewer, id: u64, x: f64, y: f64) -> Vec<Effect> {
        v.handle(GestureEvent::Down {
            id,
            pos: Vec2::new(x, y),
        })
    }

    fn mv(v: &mut Viewer, id: u64, x: f64, y: f64) -> Vec<Effect> {
        v.handle(GestureEvent::Move {
            id,
            pos: Vec2::new(x, y),
        })
    }

    fn up(v: &mut Viewer, id: u64, x: f64, y: f64) -> Vec<Effect> {
        v.handle(GestureEvent::Up {
            id,
            pos: Vec2::new(x, y),
        })
    }

    /// Pinch two contacts symmetrically outward to reach `scale`.
    fn pinch_to(v: &mut Viewer, scale: f64) {
        down(v, 1, 350.0, 300.0);
        down(v, 2, 450.0, 300.0);
        let spread = 50.0 * scale;
        mv(v, 1, 400.0 - spread, 300.0);
        mv(v, 2, 400.0 + spread, 300.0);
        up(v, 1, 400.0 - spread, 300.0);
        up(v, 2, 400.0 + spread, 300.0);
    }

    #[test]
    fn test_open_clamps_index_and_preloads() {
        let (v, fx) = Viewer::new(5, 99, Size::new(800.0, 600.0));
        assert_eq!(v.index(), 4);
        assert_eq!(fx, vec![Effect::Preload { index: 3 }]);

        let (v, fx) = Viewer::new(5, 2, Size::new(800.0, 600.0));
        assert_eq!(v.index(), 2);
        assert_eq!(
            fx,
            vec![Effect::Preload { index: 1 }, Effect::Preload { index: 3 }]
        );

        let (v, fx) = Viewer::new(0, 7, Size::new(800.0, 600.0));
        assert_eq!(v.index(), 0);
        assert!(fx.is_empty());
    }

    #[test]
    fn test_swipe_commit_advances_and_resets() {
        let mut v = viewer(3, 1);
        down(&mut v, 1, 400.0, 300.0);
        let fx = mv(&mut v, 1, 300.0, 300.0);
        assert!(fx.contains(&Effect::ShowNeighbor {
            index: 2,
            side: SwipeDirection::Next
        }));
        assert!((v.swipe_offset() - -100.0).abs() < EPS);

        let fx = up(&mut v, 1, 300.0, 300.0);
        assert_eq!(
            fx,
            vec![Effect::BeginCommit {
                to_index: 2,
                side: SwipeDirection::Next
            }]
        );
        assert!(v.is_sliding());
        assert_eq!(v.index(), 1);
        assert!(matches!(v.mode(), Mode::Idle));

        let fx = v.handle(GestureEvent::SlideFinished);
        assert_eq!(v.index(), 2);
        assert!(!v.is_sliding());
        assert!((v.scale() - 1.0).abs() < EPS);
        assert_eq!(v.pan(), Vec2::ZERO);
        assert!(v.swipe_offset().abs() < EPS);
        assert_eq!(fx, vec![Effect::Preload { index: 1 }]);
    }

    #[test]
    fn test_swipe_below_threshold_cancels() {
        let mut v = viewer(3, 1);
        down(&mut v, 1, 400.0, 300.0);
        mv(&mut v, 1, 350.0, 300.0);

        let fx = up(&mut v, 1, 350.0, 300.0);
        assert_eq!(fx, vec![Effect::BeginCancel]);
        assert!(v.is_sliding());

        let fx = v.handle(GestureEvent::SlideFinished);
        assert_eq!(fx, vec![Effect::HideNeighbor]);
        assert_eq!(v.index(), 1);
    }

    #[test]
    fn test_swipe_past_last_snaps_back() {
        let mut v = viewer(2, 1);
        down(&mut v, 1, 400.0, 300.0);

        // No neighbor on the right: resistance, no under layer.
        let fx = mv(&mut v, 1, 200.0, 300.0);
        assert!(fx.is_empty());
        assert!((v.swipe_offset() - -200.0 * EDGE_DAMPING).abs() < EPS);

        // Past the commit threshold, but there is nothing to commit to.
        let fx = up(&mut v, 1, 200.0, 300.0);
        assert_eq!(fx, vec![Effect::BeginCancel]);
        v.handle(GestureEvent::SlideFinished);
        assert_eq!(v.index(), 1);
    }

    #[test]
    fn test_vertical_latch_abandons_swipe() {
        let mut v = viewer(3, 1);
        down(&mut v, 1, 400.0, 300.0);
        mv(&mut v, 1, 370.0, 300.0);
        assert!((v.swipe_offset() - -30.0).abs() < EPS);

        // Large vertical drift latches the abort.
        mv(&mut v, 1, 370.0, 450.0);
        // Later horizontal movement is ignored entirely.
        mv(&mut v, 1, 100.0, 450.0);
        assert!((v.swipe_offset() - -30.0).abs() < EPS);

        // Release does not commit despite the huge final dx.
        let fx = up(&mut v, 1, 100.0, 450.0);
        assert_eq!(fx, vec![Effect::BeginCancel]);
        let _ = v.handle(GestureEvent::SlideFinished);
        assert_eq!(v.index(), 1);
    }

    #[test]
    fn test_second_finger_folds_offset_into_pinch() {
        let mut v = viewer(3, 1);
        down(&mut v, 1, 400.0, 300.0);
        mv(&mut v, 1, 300.0, 300.0);
        assert!((v.swipe_offset() - -100.0).abs() < EPS);

        let fx = down(&mut v, 2, 500.0, 300.0);
        assert!(fx.contains(&Effect::HideNeighbor));
        assert!(matches!(v.mode(), Mode::Pinch(_)));
        // The offset moved into the pan unchanged, with no clamping,
        // so the image does not jump under the fingers.
        assert!((v.pan().x - -100.0).abs() < EPS);
        assert!(v.swipe_offset().abs() < EPS);
    }

    #[test]
    fn test_pinch_zooms_about_stationary_midpoint() {
        let mut v = viewer(1, 0);
        v.set_image(Size::new(800.0, 600.0));

        down(&mut v, 1, 300.0, 300.0);
        down(&mut v, 2, 500.0, 300.0);
        mv(&mut v, 1, 250.0, 300.0);
        mv(&mut v, 2, 550.0, 300.0);

        // Distance went 200 -> 300 with the midpoint pinned at
        // (400, 300), so scale is 1.5 and that viewport point still
        // shows the same image point.
        assert!((v.scale() - 1.5).abs() < EPS);
        assert!((v.pan().x - -200.0).abs() < EPS);
        assert!((v.pan().y - -150.0).abs() < EPS);
    }

    #[test]
    fn test_pinch_scale_clamped() {
        let mut v = viewer(1, 0);
        v.set_image(Size::new(800.0, 600.0));

        down(&mut v, 1, 395.0, 300.0);
        down(&mut v, 2, 405.0, 300.0);
        mv(&mut v, 1, 0.0, 300.0);
        mv(&mut v, 2, 800.0, 300.0);
        assert!((v.scale() - MAX_ZOOM).abs() < EPS);

        up(&mut v, 1, 0.0, 300.0);
        up(&mut v, 2, 800.0, 300.0);

        // Pinching inward from zoom 1 stays at zoom 1, centered.
        down(&mut v, 1, 0.0, 300.0);
        down(&mut v, 2, 800.0, 300.0);
        // Zoom all the way back out.
        mv(&mut v, 1, 399.0, 300.0);
        mv(&mut v, 2, 401.0, 300.0);
        assert!((v.scale() - MIN_ZOOM).abs() < EPS);
        assert_eq!(v.pan(), Vec2::ZERO);
    }

    #[test]
    fn test_pinch_release_hands_off_to_pan() {
        let mut v = viewer(1, 0);
        v.set_image(Size::new(800.0, 600.0));
        down(&mut v, 1, 300.0, 300.0);
        down(&mut v, 2, 500.0, 300.0);
        mv(&mut v, 1, 250.0, 300.0);
        mv(&mut v, 2, 550.0, 300.0);

        up(&mut v, 2, 550.0, 300.0);
        assert!(matches!(v.mode(), Mode::Pan(_)));

        // Re-anchored: the first move pans by its own delta only.
        let pan_before = v.pan();
        mv(&mut v, 1, 280.0, 310.0);
        assert!((v.pan().x - (pan_before.x + 30.0)).abs() < EPS);
        assert!((v.pan().y - (pan_before.y + 10.0)).abs() < EPS);

        // Dragging far right clamps at the box edge.
        mv(&mut v, 1, 2000.0, 310.0);
        assert!((v.pan().x - 0.0).abs() < EPS);

        up(&mut v, 1, 2000.0, 310.0);
        assert!(matches!(v.mode(), Mode::Idle));

        // While still zoomed, a new single contact pans, not swipes.
        down(&mut v, 1, 400.0, 300.0);
        assert!(matches!(v.mode(), Mode::Pan(_)));
    }

    #[test]
    fn test_single_finger_after_pinch_at_unit_zoom_is_inert() {
        let mut v = viewer(2, 0);
        down(&mut v, 1, 390.0, 300.0);
        down(&mut v, 2, 410.0, 300.0);
        // No zoom happened; lift one finger.
        up(&mut v, 2, 410.0, 300.0);
        assert!(matches!(v.mode(), Mode::Pinch(_)));

        // The leftover finger neither pans nor swipes.
        mv(&mut v, 1, 200.0, 300.0);
        assert_eq!(v.pan(), Vec2::ZERO);
        assert!(v.swipe_offset().abs() < EPS);

        up(&mut v, 1, 200.0, 300.0);
        assert!(matches!(v.mode(), Mode::Idle));
    }

    #[test]
    fn test_cancel_during_swipe_snaps_back() {
        let mut v = viewer(3, 1);
        down(&mut v, 1, 400.0, 300.0);
        mv(&mut v, 1, 340.0, 300.0);

        let fx = v.handle(GestureEvent::Cancel { id: 1 });
        assert_eq!(fx, vec![Effect::BeginCancel]);
        assert!(matches!(v.mode(), Mode::Idle));

        let fx = v.handle(GestureEvent::SlideFinished);
        assert_eq!(fx, vec![Effect::HideNeighbor]);
        assert_eq!(v.index(), 1);
    }

    #[test]
    fn test_down_mid_slide_finalizes_first() {
        let mut v = viewer(3, 0);
        down(&mut v, 1, 400.0, 300.0);
        mv(&mut v, 1, 280.0, 300.0);
        up(&mut v, 1, 280.0, 300.0);
        assert!(v.is_sliding());
        assert_eq!(v.index(), 0);

        // New touch before SlideFinished: the commit lands first.
        let fx = down(&mut v, 1, 400.0, 300.0);
        assert_eq!(v.index(), 1);
        assert!(!v.is_sliding());
        assert!(fx.contains(&Effect::Preload { index: 0 }));
        assert!(fx.contains(&Effect::Preload { index: 2 }));
        assert!(matches!(v.mode(), Mode::Swipe(_)));
        assert!(v.swipe_offset().abs() < EPS);
    }

    #[test]
    fn test_nav_commits_only_when_unzoomed() {
        let mut v = viewer(3, 0);
        let fx = v.nav(SwipeDirection::Next);
        assert_eq!(
            fx,
            vec![Effect::BeginCommit {
                to_index: 1,
                side: SwipeDirection::Next
            }]
        );
        v.handle(GestureEvent::SlideFinished);
        assert_eq!(v.index(), 1);

        // No previous neighbor from index 0.
        let mut v = viewer(3, 0);
        assert!(v.nav(SwipeDirection::Prev).is_empty());

        // Zoomed in, navigation keys are ignored.
        let mut v = viewer(3, 0);
        pinch_to(&mut v, 2.0);
        assert!(v.scale() > UNZOOMED_EPSILON);
        assert!(v.nav(SwipeDirection::Next).is_empty());
    }

    #[test]
    fn test_set_image_reclamps_pan() {
        let mut v = viewer(1, 0);
        pinch_to(&mut v, 2.0);
        assert!((v.scale() - 2.0).abs() < EPS);

        // A narrower image arrives: at zoom 2 its box exactly spans
        // the viewport width, so the x pan is forced to center.
        v.set_image(Size::new(400.0, 600.0));
        assert!((v.pan().x - -200.0).abs() < EPS);
    }

    #[test]
    fn test_events_for_unknown_pointers_are_ignored() {
        let mut v = viewer(3, 1);
        assert!(mv(&mut v, 9, 100.0, 100.0).is_empty());
        assert!(up(&mut v, 9, 100.0, 100.0).is_empty());
        assert!(v.handle(GestureEvent::Cancel { id: 9 }).is_empty());
        assert!(matches!(v.mode(), Mode::Idle));
    }
}
