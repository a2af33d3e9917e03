//! Ribbon and grid rendering for the Strafe sync trainer.
//!
//! The renderer is a pure function of the tick history and a handful of
//! animation parameters. It draws through the [`Surface`] trait, so the
//! same code targets a canvas, a GPU backend, or the headless
//! [`DisplayList`] used by tests.
//!
//! Each frame:
//!
//! 1. clear the surface,
//! 2. draw the background grid (static vertical lines, scrolling
//!    horizontal lines),
//! 3. draw the history ribbon oldest to newest, colored by category and
//!    tapering from thick (new) to thin (old).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod color;
pub mod display_list;
pub mod error;
pub mod grid;
pub mod renderer;
pub mod ribbon;
pub mod surface;

pub use color::{category_color, Rgba};
pub use display_list::{DisplayList, DrawOp};
pub use error::StyleError;
pub use grid::{GridLines, GridStyle, MIN_GRID_SPACING};
pub use renderer::{RenderConfig, RenderFrame, RenderStats, Renderer};
pub use ribbon::RibbonStyle;
pub use surface::{LineCap, Point, Stroke, Surface, SurfaceSize};
