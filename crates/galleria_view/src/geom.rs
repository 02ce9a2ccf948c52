//! Viewport geometry: contain fit, pan clamping, pinch math

/// A point or translation in viewport pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }

    pub fn distance(self, other: Vec2) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn midpoint(self, other: Vec2) -> Vec2 {
        Vec2::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }
}

/// Placement of an image inside a viewport at zoom 1: the largest
/// centered box that keeps the aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainBox {
    pub origin: Vec2,
    pub size: Size,
}

/// Compute the contain-fit box.
///
/// An image with unknown dimensions counts as viewport-sized, so
/// geometry never waits on a decode.
pub fn contain_box(viewport: Size, image: Size) -> ContainBox {
    let viewport = Size::new(viewport.width.max(1.0), viewport.height.max(1.0));
    let image = if image.width > 0.0 && image.height > 0.0 {
        image
    } else {
        viewport
    };

    let base = (viewport.width / image.width).min(viewport.height / image.height);
    let size = Size::new(image.width * base, image.height * base);
    let origin = Vec2::new(
        (viewport.width - size.width) / 2.0,
        (viewport.height - size.height) / 2.0,
    );

    ContainBox { origin, size }
}

/// Clamp a pan translation against the viewport.
///
/// On any axis where the scaled box overflows the viewport, the pan is
/// limited so the box's edge never crosses past the viewport edge. On
/// any axis where it fits, the pan is forced to re-center the box.
/// Idempotent: clamping a clamped value is a no-op.
pub fn clamp_pan(viewport: Size, image: Size, scale: f64, pan: Vec2) -> Vec2 {
    let fit = contain_box(viewport, image);
    Vec2::new(
        clamp_axis(viewport.width.max(1.0), fit.origin.x, fit.size.width, scale, pan.x),
        clamp_axis(viewport.height.max(1.0), fit.origin.y, fit.size.height, scale, pan.y),
    )
}

fn clamp_axis(view: f64, origin: f64, len: f64, scale: f64, t: f64) -> f64 {
    let scaled = len * scale;
    if scaled > view {
        let lo = view - origin - scaled;
        let hi = -origin;
        t.clamp(lo, hi)
    } else {
        (view - scaled) / 2.0 - origin
    }
}

/// Translation that keeps the image point under the pinch midpoint
/// fixed while the scale changes by `ratio` (new scale over starting
/// scale). `origin` is the contain-fit box origin at zoom 1.
pub fn pinch_pan(origin: Vec2, midpoint: Vec2, start_pan: Vec2, ratio: f64) -> Vec2 {
    Vec2::new(
        (1.0 - ratio) * (midpoint.x - origin.x) + ratio * start_pan.x,
        (1.0 - ratio) * (midpoint.y - origin.y) + ratio * start_pan.y,
    )
}
