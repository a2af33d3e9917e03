//! Colors and the category palette.

use std::fmt;

use strafe_core::SyncCategory;

/// An sRGB color with straight alpha in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Opacity.
    pub a: f32,
}

impl Rgba {
    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Color with explicit opacity.
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// CSS notation, e.g. `rgba(234, 179, 8, 0.08)`.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Ribbon color for synced ticks.
pub const SYNCED_GREEN: Rgba = Rgba::rgb(0x00, 0xff, 0x00);
/// Ribbon color for every other tick.
pub const NEUTRAL_GRAY: Rgba = Rgba::rgb(0x33, 0x33, 0x33);
/// Faint amber used for the background grid.
pub const GRID_AMBER: Rgba = Rgba::rgba(234, 179, 8, 0.08);

/// Ribbon color for a tick category.
pub fn category_color(category: SyncCategory) -> Rgba {
    match category {
        SyncCategory::Synced => SYNCED_GREEN,
        SyncCategory::NotSynced => NEUTRAL_GRAY,
    }
}
