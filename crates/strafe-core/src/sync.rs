//! Rolling sync percentage exposed to the UI.

use std::fmt;

/// Percentage above which the HUD highlights the score.
pub const HIGH_SYNC_THRESHOLD: u8 = 85;

/// Share of synced ticks in the current history, rounded to a whole percent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SyncPercent(u8);

/// Coarse rating of a [`SyncPercent`] for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyncGrade {
    /// At or below the highlight threshold.
    Normal,
    /// Above [`HIGH_SYNC_THRESHOLD`].
    High,
}

impl SyncPercent {
    /// Zero percent, also the value for an empty history.
    pub const ZERO: Self = Self(0);

    /// Compute `round(synced / len * 100)`, or zero when `len` is zero.
    ///
    /// Uses integer arithmetic; halves round up.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `synced > len`.
    pub fn from_counts(synced: usize, len: usize) -> Self {
        if len == 0 {
            return Self::ZERO;
        }
        debug_assert!(synced <= len, "synced {synced} exceeds len {len}");
        let synced = synced.min(len) as u64;
        let len = len as u64;
        let rounded = (synced * 200 + len) / (2 * len);
        Self(rounded as u8)
    }

    /// A percentage from a whole number, clamped to 100.
    pub fn from_value(value: u8) -> Self {
        Self(value.min(100))
    }

    /// The percentage as an integer in `0..=100`.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Display grade for the HUD.
    pub fn grade(self) -> SyncGrade {
        if self.0 > HIGH_SYNC_THRESHOLD {
            SyncGrade::High
        } else {
            SyncGrade::Normal
        }
    }
}

impl fmt::Display for SyncPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl From<SyncPercent> for u8 {
    fn from(p: SyncPercent) -> Self {
        p.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_history_is_zero() {
        assert_eq!(SyncPercent::from_counts(0, 0), SyncPercent::ZERO);
    }

    #[test]
    fn seven_of_ten_is_seventy() {
        assert_eq!(SyncPercent::from_counts(7, 10).value(), 70);
    }

    #[test]
    fn rounds_half_up() {
        // 1/8 = 12.5%
        assert_eq!(SyncPercent::from_counts(1, 8).value(), 13);
        // 1/3 = 33.33%
        assert_eq!(SyncPercent::from_counts(1, 3).value(), 33);
        // 2/3 = 66.67%
        assert_eq!(SyncPercent::from_counts(2, 3).value(), 67);
    }

    #[test]
    fn bounds() {
        assert_eq!(SyncPercent::from_counts(500, 500).value(), 100);
        assert_eq!(SyncPercent::from_counts(0, 500).value(), 0);
    }

    #[test]
    fn from_value_clamps() {
        assert_eq!(SyncPercent::from_value(42).value(), 42);
        assert_eq!(SyncPercent::from_value(250).value(), 100);
    }

    #[test]
    fn grade_threshold_is_exclusive() {
        assert_eq!(SyncPercent::from_counts(85, 100).grade(), SyncGrade::Normal);
        assert_eq!(SyncPercent::from_counts(86, 100).grade(), SyncGrade::High);
    }

    #[test]
    fn display_has_percent_sign() {
        assert_eq!(SyncPercent::from_counts(7, 10).to_string(), "70%");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn within_half_a_percent_of_exact(len in 1usize..2000, frac in 0.0f64..=1.0) {
                let synced = ((len as f64) * frac).floor() as usize;
                let exact = synced as f64 / len as f64 * 100.0;
                let got = f64::from(SyncPercent::from_counts(synced, len).value());
                prop_assert!((got - exact).abs() <= 0.5 + 1e-9, "got {} for exact {}", got, exact);
            }
        }
    }
}
