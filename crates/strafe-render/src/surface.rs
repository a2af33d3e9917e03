//! Drawing surface abstraction.

/// A position in surface pixels, origin at the top left.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate, growing downwards.
    pub y: f64,
}

impl Point {
    /// Create a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Current pixel dimensions of a surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceSize {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl SurfaceSize {
    /// Create a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero, negative, or not finite.
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }
}

/// How the ends of a stroke are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineCap {
    /// Square end flush with the endpoint.
    #[default]
    Butt,
    /// Semicircular end, also used for joins.
    Round,
}

/// A single straight line segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    /// Start point.
    pub from: Point,
    /// End point.
    pub to: Point,
    /// Line width in pixels.
    pub width: f64,
    /// Stroke color.
    pub color: crate::Rgba,
    /// End cap style.
    pub cap: LineCap,
}

/// Target the renderer draws onto.
///
/// The size may change between frames (window resize); the renderer
/// queries it every frame and never caches it.
pub trait Surface {
    /// Current dimensions.
    fn size(&self) -> SurfaceSize;

    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Draw one line segment.
    fn stroke(&mut self, stroke: &Stroke);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn size(&self) -> SurfaceSize {
        (**self).size()
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn stroke(&mut self, stroke: &Stroke) {
        (**self).stroke(stroke);
    }
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn size(&self) -> SurfaceSize {
        (**self).size()
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn stroke(&mut self, stroke: &Stroke) {
        (**self).stroke(stroke);
    }
}
