//! Error types for ribbon and grid styles.

use std::error::Error;
use std::fmt;

use crate::grid::MIN_GRID_SPACING;

/// A ribbon or grid style invariant that does not hold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StyleError {
    /// Grid spacing is NaN, infinite, or below [`MIN_GRID_SPACING`].
    GridSpacing {
        /// The configured spacing.
        value: f64,
    },
    /// Grid line width is NaN, infinite, zero, or negative.
    GridLineWidth {
        /// The configured width.
        value: f64,
    },
    /// Ribbon minimum width is NaN, infinite, zero, or negative.
    RibbonMinWidth {
        /// The configured width.
        value: f64,
    },
    /// Ribbon maximum width is not finite or is below the minimum.
    RibbonMaxWidth {
        /// The configured maximum.
        max: f64,
        /// The configured minimum.
        min: f64,
    },
    /// Taper exponent is NaN, infinite, zero, or negative.
    TaperExponent {
        /// The configured exponent.
        value: f64,
    },
    /// Top margin ratio is outside `[0.0, 1.0]`.
    TopMarginRatio {
        /// The configured ratio.
        value: f64,
    },
}

impl fmt::Display for StyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridSpacing { value } => write!(
                f,
                "grid spacing must be finite and at least {MIN_GRID_SPACING}, got {value}"
            ),
            Self::GridLineWidth { value } => {
                write!(f, "grid line width must be finite and positive, got {value}")
            }
            Self::RibbonMinWidth { value } => {
                write!(f, "ribbon min_width must be finite and positive, got {value}")
            }
            Self::RibbonMaxWidth { max, min } => write!(
                f,
                "ribbon max_width ({max}) must be finite and >= min_width ({min})"
            ),
            Self::TaperExponent { value } => {
                write!(f, "ribbon taper_exponent must be finite and positive, got {value}")
            }
            Self::TopMarginRatio { value } => {
                write!(f, "ribbon top_margin_ratio must be in [0.0, 1.0], got {value}")
            }
        }
    }
}

impl Error for StyleError {}
