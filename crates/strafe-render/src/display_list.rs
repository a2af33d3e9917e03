//! Headless surface that records draw calls.

use crate::surface::{Stroke, Surface, SurfaceSize};

/// A recorded draw call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawOp {
    /// The surface was cleared.
    Clear,
    /// A line segment was drawn.
    Stroke(Stroke),
}

/// [`Surface`] that keeps the draw calls of the current frame in memory.
///
/// Clearing drops the previous frame's calls but keeps the allocation,
/// so a long-running headless session does not reallocate per frame.
#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    size: SurfaceSize,
    ops: Vec<DrawOp>,
}

impl DisplayList {
    /// Create an empty list for a surface of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: SurfaceSize::new(width, height),
            ops: Vec::new(),
        }
    }

    /// Change the reported surface size, as a window resize would.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.size = SurfaceSize::new(width, height);
    }

    /// All recorded calls since the last clear, including the clear itself.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Recorded strokes in draw order.
    pub fn strokes(&self) -> impl Iterator<Item = &Stroke> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Stroke(s) => Some(s),
            DrawOp::Clear => None,
        })
    }

    /// Number of recorded strokes.
    pub fn stroke_count(&self) -> usize {
        self.strokes().count()
    }
}

impl Surface for DisplayList {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear);
    }

    fn stroke(&mut self, stroke: &Stroke) {
        self.ops.push(DrawOp::Stroke(*stroke));
    }
}
