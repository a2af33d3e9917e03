//! User-adjustable scroll speed of the history ribbon.

use std::fmt;

/// Scroll speed in pixels per history entry, `0.5..=10.0` in steps of `0.5`.
///
/// Stored as a count of half-pixel steps so repeated adjustments stay
/// exact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScrollSpeed(u8);

/// Direction of a single scroll speed adjustment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpeedStep {
    /// Slower by one step.
    Down,
    /// Faster by one step.
    Up,
}

const MIN_HALF_STEPS: u8 = 1;
const MAX_HALF_STEPS: u8 = 20;

impl ScrollSpeed {
    /// Slowest allowed speed, 0.5.
    pub const MIN: Self = Self(MIN_HALF_STEPS);
    /// Fastest allowed speed, 10.0.
    pub const MAX: Self = Self(MAX_HALF_STEPS);
    /// Speed on first launch, 3.0.
    pub const DEFAULT: Self = Self(6);
    /// Size of one adjustment.
    pub const STEP: f64 = 0.5;

    /// Nearest allowed speed to `value`, clamped to [`MIN`](Self::MIN)..=[`MAX`](Self::MAX).
    ///
    /// NaN maps to [`DEFAULT`](Self::DEFAULT).
    pub fn from_value(value: f64) -> Self {
        if value.is_nan() {
            return Self::DEFAULT;
        }
        let halves = (value * 2.0).round();
        let clamped = halves.clamp(f64::from(MIN_HALF_STEPS), f64::from(MAX_HALF_STEPS));
        Self(clamped as u8)
    }

    /// The speed in pixels per history entry.
    pub fn value(self) -> f64 {
        f64::from(self.0) / 2.0
    }

    /// Apply one step, clamping at the bounds.
    pub fn adjust(self, step: SpeedStep) -> Self {
        let halves = match step {
            SpeedStep::Down => self.0.saturating_sub(1).max(MIN_HALF_STEPS),
            SpeedStep::Up => (self.0 + 1).min(MAX_HALF_STEPS),
        };
        Self(halves)
    }
}

impl Default for ScrollSpeed {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ScrollSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.value())
    }
}
