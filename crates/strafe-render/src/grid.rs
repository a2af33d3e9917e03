//! Background grid with scrolling horizontal lines.
//!
//! Vertical lines are fixed. Horizontal lines move down with the
//! history so the backdrop appears to travel with the ribbon. The grid
//! is cosmetic and has no bearing on the simulation.

use smallvec::SmallVec;

use crate::color::{Rgba, GRID_AMBER};
use crate::error::StyleError;
use crate::surface::{LineCap, Point, Stroke, Surface, SurfaceSize};

/// Smallest accepted line spacing, in pixels. Keeps the line count per
/// frame proportional to the surface size.
pub const MIN_GRID_SPACING: f64 = 1.0;

/// Inline capacity covers a 2560-wide surface at the default spacing;
/// larger surfaces spill to the heap.
type LinePositions = SmallVec<[f64; 64]>;

/// Appearance of the background grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridStyle {
    /// Distance between neighbouring lines, in pixels. Default: 60.
    /// Minimum: [`MIN_GRID_SPACING`].
    pub spacing: f64,
    /// Line color. Default: faint amber.
    pub color: Rgba,
    /// Line width in pixels. Default: 1.
    pub line_width: f64,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            spacing: 60.0,
            color: GRID_AMBER,
            line_width: 1.0,
        }
    }
}

/// Line positions for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridLines {
    /// X-coordinates of the vertical lines.
    pub vertical: LinePositions,
    /// Y-coordinates of the horizontal lines.
    pub horizontal: LinePositions,
}

impl GridLines {
    /// Total number of lines.
    pub fn len(&self) -> usize {
        self.vertical.len() + self.horizontal.len()
    }

    /// Whether there are no lines at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GridStyle {
    /// Check that the style can be drawn.
    pub fn validate(&self) -> Result<(), StyleError> {
        if !self.spacing.is_finite() || self.spacing < MIN_GRID_SPACING {
            return Err(StyleError::GridSpacing {
                value: self.spacing,
            });
        }
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(StyleError::GridLineWidth {
                value: self.line_width,
            });
        }
        Ok(())
    }

    /// Vertical offset of the first horizontal line.
    ///
    /// `(total_ticks * scroll_speed) mod spacing`.
    pub fn scroll_offset(&self, total_ticks: u64, scroll_speed: f64) -> f64 {
        (total_ticks as f64 * scroll_speed) % self.spacing
    }

    /// Compute line positions for a surface.
    ///
    /// Returns no lines for a spacing below [`MIN_GRID_SPACING`].
    pub fn lines(&self, size: SurfaceSize, offset: f64) -> GridLines {
        let mut lines = GridLines::default();
        if !self.spacing.is_finite() || self.spacing < MIN_GRID_SPACING || size.is_empty() {
            return lines;
        }

        let mut x = 0.0;
        while x <= size.width {
            lines.vertical.push(x);
            x += self.spacing;
        }

        let mut y = offset;
        while y <= size.height {
            lines.horizontal.push(y);
            y += self.spacing;
        }
        lines
    }

    /// Draw the grid for the given animation state. Returns the number of
    /// lines drawn.
    pub fn draw<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        size: SurfaceSize,
        total_ticks: u64,
        scroll_speed: f64,
    ) -> usize {
        let lines = self.lines(size, self.scroll_offset(total_ticks, scroll_speed));
        for &x in &lines.vertical {
            surface.stroke(&self.line(Point::new(x, 0.0), Point::new(x, size.height)));
        }
        for &y in &lines.horizontal {
            surface.stroke(&self.line(Point::new(0.0, y), Point::new(size.width, y)));
        }
        lines.len()
    }

    fn line(&self, from: Point, to: Point) -> Stroke {
        Stroke {
            from,
            to,
            width: self.line_width,
            color: self.color,
            cap: LineCap::Butt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_list::DisplayList;

    #[test]
    fn default_style_is_valid() {
        assert!(GridStyle::default().validate().is_ok());
    }

    #[test]
    fn zero_spacing_is_rejected() {
        let style = GridStyle {
            spacing: 0.0,
            ..GridStyle::default()
        };
        assert!(style.validate().is_err());
        assert!(style.lines(SurfaceSize::new(100.0, 100.0), 0.0).is_empty());
    }

    #[test]
    fn sub_pixel_spacing_is_rejected() {
        let style = GridStyle {
            spacing: 1e-3,
            ..GridStyle::default()
        };
        match style.validate() {
            Err(StyleError::GridSpacing { value }) => assert_eq!(value, 1e-3),
            other => panic!("expected GridSpacing, got {other:?}"),
        }
        assert!(style.lines(SurfaceSize::new(1000.0, 1000.0), 0.0).is_empty());
    }

    #[test]
    fn minimum_spacing_bounds_line_count() {
        let style = GridStyle {
            spacing: MIN_GRID_SPACING,
            ..GridStyle::default()
        };
        assert!(style.validate().is_ok());
        let lines = style.lines(SurfaceSize::new(100.0, 50.0), 0.0);
        assert_eq!(lines.vertical.len(), 101);
        assert_eq!(lines.horizontal.len(), 51);
    }

    #[test]
    fn wide_surface_spills_past_inline_capacity() {
        let lines = GridStyle::default().lines(SurfaceSize::new(7680.0, 60.0), 0.0);
        assert_eq!(lines.vertical.len(), 129);
        assert!(lines.vertical.spilled());
    }

    #[test]
    fn scroll_offset_wraps_at_spacing() {
        let style = GridStyle::default();
        assert_eq!(style.scroll_offset(0, 3.0), 0.0);
        assert_eq!(style.scroll_offset(10, 3.0), 30.0);
        assert_eq!(style.scroll_offset(20, 3.0), 0.0);
        assert_eq!(style.scroll_offset(25, 3.0), 15.0);
    }

    #[test]
    fn vertical_lines_include_both_edges_when_aligned() {
        let style = GridStyle::default();
        let lines = style.lines(SurfaceSize::new(120.0, 50.0), 0.0);
        assert_eq!(lines.vertical.as_slice(), &[0.0, 60.0, 120.0]);
        assert_eq!(lines.horizontal.as_slice(), &[0.0]);
    }

    #[test]
    fn horizontal_lines_start_at_offset() {
        let style = GridStyle::default();
        let lines = style.lines(SurfaceSize::new(10.0, 200.0), 15.0);
        assert_eq!(lines.horizontal.as_slice(), &[15.0, 75.0, 135.0, 195.0]);
    }

    #[test]
    fn draw_emits_one_stroke_per_line() {
        let style = GridStyle::default();
        let mut list = DisplayList::new(120.0, 120.0);
        let drawn = style.draw(&mut list, SurfaceSize::new(120.0, 120.0), 0, 3.0);
        assert_eq!(drawn, 6);
        assert_eq!(list.stroke_count(), 6);
        assert!(list.strokes().all(|s| s.color == GRID_AMBER && s.width == 1.0));
    }
}
