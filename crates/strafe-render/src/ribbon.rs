//! The tapered history ribbon.
//!
//! Record `i` (oldest first, `0..len`) sits at
//! `y = base + (len - i) * scroll_speed`, so older records are pushed
//! further down the surface. Segment `i` joins record `i - 1` to record
//! `i`; it takes the color of the newer endpoint and a width of
//! `max(min_width, max_width * (1 - i / len)^taper_exponent)`.

use strafe_core::TickRecord;

use crate::color::category_color;
use crate::error::StyleError;
use crate::surface::{LineCap, Point, Stroke, Surface};

/// Shape of the history ribbon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RibbonStyle {
    /// Width floor for the oldest segments. Default: 25.
    pub min_width: f64,
    /// Width ceiling before tapering. Default: 70.
    pub max_width: f64,
    /// Shaping exponent of the taper. Default: 0.1.
    pub taper_exponent: f64,
    /// Fraction of the surface height used as the top margin. Default: 1/8.
    pub top_margin_ratio: f64,
}

impl Default for RibbonStyle {
    fn default() -> Self {
        Self {
            min_width: 25.0,
            max_width: 70.0,
            taper_exponent: 0.1,
            top_margin_ratio: 0.125,
        }
    }
}

impl RibbonStyle {
    /// Check the style's invariants.
    pub fn validate(&self) -> Result<(), StyleError> {
        if !self.min_width.is_finite() || self.min_width <= 0.0 {
            return Err(StyleError::RibbonMinWidth {
                value: self.min_width,
            });
        }
        if !self.max_width.is_finite() || self.max_width < self.min_width {
            return Err(StyleError::RibbonMaxWidth {
                max: self.max_width,
                min: self.min_width,
            });
        }
        if !self.taper_exponent.is_finite() || self.taper_exponent <= 0.0 {
            return Err(StyleError::TaperExponent {
                value: self.taper_exponent,
            });
        }
        if !(0.0..=1.0).contains(&self.top_margin_ratio) {
            return Err(StyleError::TopMarginRatio {
                value: self.top_margin_ratio,
            });
        }
        Ok(())
    }

    /// Width of segment `i` in a history of `len` records.
    pub fn width_at(&self, i: usize, len: usize) -> f64 {
        if len == 0 {
            return self.max_width;
        }
        let progress = i as f64 / len as f64;
        let factor = (1.0 - progress).max(0.0).powf(self.taper_exponent);
        (self.max_width * factor).max(self.min_width)
    }

    /// Vertical position of record `i` in a history of `len` records.
    pub fn y_at(&self, i: usize, len: usize, base: f64, scroll_speed: f64) -> f64 {
        base + len.saturating_sub(i) as f64 * scroll_speed
    }

    /// Draw the ribbon through consecutive records.
    ///
    /// `slots` yields the logical history oldest first; a `None` slot
    /// suppresses both segments touching it. Returns the number of
    /// segments drawn.
    pub fn draw<S, I>(
        &self,
        surface: &mut S,
        slots: I,
        len: usize,
        surface_height: f64,
        scroll_speed: f64,
    ) -> usize
    where
        S: Surface + ?Sized,
        I: IntoIterator<Item = Option<TickRecord>>,
    {
        let base = surface_height * self.top_margin_ratio;
        let mut drawn = 0;
        let mut previous: Option<TickRecord> = None;

        for (i, slot) in slots.into_iter().take(len).enumerate() {
            if let (Some(prev), Some(curr)) = (previous, slot) {
                surface.stroke(&Stroke {
                    from: Point::new(prev.x, self.y_at(i - 1, len, base, scroll_speed)),
                    to: Point::new(curr.x, self.y_at(i, len, base, scroll_speed)),
                    width: self.width_at(i, len),
                    color: category_color(curr.category),
                    cap: LineCap::Round,
                });
                drawn += 1;
            }
            previous = slot;
        }
        drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{NEUTRAL_GRAY, SYNCED_GREEN};
    use crate::display_list::DisplayList;
    use strafe_core::SyncCategory;

    fn rec(x: f64, synced: bool) -> Option<TickRecord> {
        let category = if synced {
            SyncCategory::Synced
        } else {
            SyncCategory::NotSynced
        };
        Some(TickRecord::new(x, category))
    }

    #[test]
    fn default_style_is_valid() {
        assert!(RibbonStyle::default().validate().is_ok());
    }

    #[test]
    fn inverted_widths_are_rejected() {
        let style = RibbonStyle {
            min_width: 80.0,
            ..RibbonStyle::default()
        };
        match style.validate() {
            Err(StyleError::RibbonMaxWidth { max, min }) => {
                assert_eq!((max, min), (70.0, 80.0));
            }
            other => panic!("expected RibbonMaxWidth, got {other:?}"),
        }
    }

    #[test]
    fn width_tapers_and_respects_floor() {
        let style = RibbonStyle::default();
        let first = style.width_at(1, 500);
        let last = style.width_at(499, 500);
        assert!(first > last);
        assert!(first <= 70.0);
        assert!(last >= 25.0);
        // (1 - 1/500)^0.1 is just under one.
        assert!((first - 70.0 * (499.0f64 / 500.0).powf(0.1)).abs() < 1e-9);
    }

    #[test]
    fn width_hits_floor_at_the_end() {
        let style = RibbonStyle::default();
        assert_eq!(style.width_at(500, 500), 25.0);
    }

    #[test]
    fn y_positions_push_older_records_down() {
        let style = RibbonStyle::default();
        let base = 100.0;
        assert_eq!(style.y_at(0, 10, base, 3.0), 130.0);
        assert_eq!(style.y_at(9, 10, base, 3.0), 103.0);
    }

    #[test]
    fn segments_take_color_of_newer_endpoint() {
        let style = RibbonStyle::default();
        let mut list = DisplayList::new(800.0, 800.0);
        let slots = vec![rec(10.0, true), rec(20.0, false), rec(30.0, true)];
        let drawn = style.draw(&mut list, slots, 3, 800.0, 3.0);
        assert_eq!(drawn, 2);

        let strokes: Vec<_> = list.strokes().copied().collect();
        assert_eq!(strokes[0].color, NEUTRAL_GRAY);
        assert_eq!(strokes[1].color, SYNCED_GREEN);
        assert_eq!(strokes[0].from.x, 10.0);
        assert_eq!(strokes[0].to.x, 20.0);
        // base = 800 / 8 = 100; record 0 at 100 + 3*3, record 1 at 100 + 2*3.
        assert_eq!(strokes[0].from.y, 109.0);
        assert_eq!(strokes[0].to.y, 106.0);
        assert!(strokes.iter().all(|s| s.cap == LineCap::Round));
    }

    #[test]
    fn missing_neighbours_are_skipped() {
        let style = RibbonStyle::default();
        let mut list = DisplayList::new(800.0, 800.0);
        let slots = vec![rec(1.0, true), None, rec(3.0, true), rec(4.0, true)];
        let drawn = style.draw(&mut list, slots, 4, 800.0, 3.0);
        assert_eq!(drawn, 1);
    }

    #[test]
    fn single_record_draws_nothing() {
        let style = RibbonStyle::default();
        let mut list = DisplayList::new(800.0, 800.0);
        assert_eq!(style.draw(&mut list, vec![rec(1.0, true)], 1, 800.0, 3.0), 0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn width_is_monotone_and_bounded(len in 1usize..1000) {
                let style = RibbonStyle::default();
                let mut last = f64::INFINITY;
                for i in 1..len {
                    let w = style.width_at(i, len);
                    prop_assert!(w >= style.min_width && w <= style.max_width);
                    prop_assert!(w <= last);
                    last = w;
                }
            }
        }
    }
}
