//! Frame renderer combining grid and ribbon.

use std::fmt;

use strafe_core::{ScrollSpeed, TickRecord};

use crate::error::StyleError;
use crate::grid::GridStyle;
use crate::ribbon::RibbonStyle;
use crate::surface::{Surface, SurfaceSize};

/// Renderer configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    /// Shape of the history ribbon.
    pub ribbon: RibbonStyle,
    /// Background grid, or `None` to draw only the ribbon.
    pub grid: Option<GridStyle>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            ribbon: RibbonStyle::default(),
            grid: Some(GridStyle::default()),
        }
    }
}

impl RenderConfig {
    /// Validate ribbon and grid styles.
    pub fn validate(&self) -> Result<(), StyleError> {
        self.ribbon.validate()?;
        if let Some(grid) = &self.grid {
            grid.validate()?;
        }
        Ok(())
    }
}

/// Everything the renderer reads for one frame.
pub struct RenderFrame<I> {
    /// Logical history, oldest first.
    pub slots: I,
    /// Number of logical records.
    pub len: usize,
    /// Ticks written since the last reset; drives the grid scroll.
    pub total_ticks: u64,
    /// Current scroll speed.
    pub scroll_speed: ScrollSpeed,
}

impl<I> fmt::Debug for RenderFrame<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderFrame")
            .field("len", &self.len)
            .field("total_ticks", &self.total_ticks)
            .field("scroll_speed", &self.scroll_speed)
            .finish()
    }
}

/// What a frame drew.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderStats {
    /// Ribbon segments drawn.
    pub segments: usize,
    /// Grid lines drawn.
    pub grid_lines: usize,
    /// Surface size read at the start of the frame.
    pub size: SurfaceSize,
}

/// Draws the history onto a [`Surface`].
///
/// Holds only configuration; every input comes in through
/// [`RenderFrame`], so rendering can never alter simulation state.
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Create a renderer.
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render one frame.
    pub fn render<S, I>(&self, surface: &mut S, frame: RenderFrame<I>) -> RenderStats
    where
        S: Surface + ?Sized,
        I: IntoIterator<Item = Option<TickRecord>>,
    {
        let size = surface.size();
        surface.clear();

        let speed = frame.scroll_speed.value();
        let grid_lines = match &self.config.grid {
            Some(grid) => grid.draw(surface, size, frame.total_ticks, speed),
            None => 0,
        };
        let segments = self
            .config
            .ribbon
            .draw(surface, frame.slots, frame.len, size.height, speed);

        RenderStats {
            segments,
            grid_lines,
            size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_list::{DisplayList, DrawOp};
    use strafe_core::SyncCategory;

    fn history(n: usize) -> Vec<Option<TickRecord>> {
        (0..n)
            .map(|i| Some(TickRecord::new(i as f64, SyncCategory::Synced)))
            .collect()
    }

    #[test]
    fn frame_starts_with_clear() {
        let renderer = Renderer::default();
        let mut list = DisplayList::new(300.0, 300.0);
        renderer.render(
            &mut list,
            RenderFrame {
                slots: history(5),
                len: 5,
                total_ticks: 5,
                scroll_speed: ScrollSpeed::DEFAULT,
            },
        );
        assert_eq!(list.ops()[0], DrawOp::Clear);
    }

    #[test]
    fn stats_count_grid_and_ribbon() {
        let renderer = Renderer::default();
        let mut list = DisplayList::new(120.0, 120.0);
        let stats = renderer.render(
            &mut list,
            RenderFrame {
                slots: history(10),
                len: 10,
                total_ticks: 0,
                scroll_speed: ScrollSpeed::DEFAULT,
            },
        );
        assert_eq!(stats.segments, 9);
        assert_eq!(stats.grid_lines, 6);
        assert_eq!(list.stroke_count(), 15);
        assert_eq!(stats.size, SurfaceSize::new(120.0, 120.0));
    }

    #[test]
    fn grid_can_be_disabled() {
        let renderer = Renderer::new(RenderConfig {
            grid: None,
            ..RenderConfig::default()
        });
        let mut list = DisplayList::new(120.0, 120.0);
        let stats = renderer.render(
            &mut list,
            RenderFrame {
                slots: history(3),
                len: 3,
                total_ticks: 3,
                scroll_speed: ScrollSpeed::DEFAULT,
            },
        );
        assert_eq!(stats.grid_lines, 0);
        assert_eq!(list.stroke_count(), 2);
    }

    #[test]
    fn size_is_read_every_frame() {
        let renderer = Renderer::new(RenderConfig {
            grid: None,
            ..RenderConfig::default()
        });
        let mut list = DisplayList::new(100.0, 800.0);
        let frame = || RenderFrame {
            slots: history(2),
            len: 2,
            total_ticks: 2,
            scroll_speed: ScrollSpeed::DEFAULT,
        };
        renderer.render(&mut list, frame());
        let first_y = list.strokes().next().map(|s| s.to.y);

        list.resize(100.0, 1600.0);
        let stats = renderer.render(&mut list, frame());
        let second_y = list.strokes().next().map(|s| s.to.y);

        assert_eq!(stats.size.height, 1600.0);
        // base moves from 100 to 200.
        assert_eq!(first_y, Some(103.0));
        assert_eq!(second_y, Some(203.0));
    }
}
