//! Tick history: ring, running count, and plot mapping in one owner.

use strafe_core::{InputState, SyncCategory, SyncPercent, TickId, TickRecord};

use crate::aggregator::SyncAggregator;
use crate::config::PlotTransform;
use crate::ring::TickRing;

/// What one call to [`TickHistory::record_tick`] did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickOutcome {
    /// Tick number since the last reset, starting at 1.
    pub tick: TickId,
    /// The record written.
    pub record: TickRecord,
    /// The record it overwrote, once the ring is full.
    pub evicted: Option<TickRecord>,
    /// New percentage, if it changed.
    pub published: Option<SyncPercent>,
}

/// Bounded history of classified ticks with an incrementally
/// maintained sync percentage.
#[derive(Clone, Debug)]
pub struct TickHistory {
    ring: TickRing,
    aggregator: SyncAggregator,
    plot: PlotTransform,
    total_ticks: TickId,
}

impl TickHistory {
    /// Create an empty history with room for `capacity` ticks.
    ///
    /// # Panics
    ///
    /// Panics if `capacity < 2`.
    pub fn new(capacity: usize, plot: PlotTransform) -> Self {
        Self {
            ring: TickRing::new(capacity),
            aggregator: SyncAggregator::new(),
            plot,
            total_ticks: TickId::default(),
        }
    }

    /// Classify one input snapshot and append it.
    ///
    /// The count is decremented for the slot at the cursor before the
    /// new record is written, so it always equals a full scan.
    pub fn record_tick(&mut self, input: &InputState, viewport_width: f64) -> TickOutcome {
        let category = SyncCategory::classify(input);
        self.aggregator.evict(self.ring.slot_at_head());

        let record = TickRecord::new(self.plot.x_for(viewport_width, input.pointer_x), category);
        let evicted = self.ring.push(record);
        self.aggregator.admit(&record);
        self.total_ticks = self.total_ticks.next();

        let published = self.aggregator.publish(self.ring.len());
        TickOutcome {
            tick: self.total_ticks,
            record,
            evicted,
            published,
        }
    }

    /// Drop all records and zero the counters.
    pub fn clear(&mut self) {
        self.ring.clear();
        self.aggregator.reset();
        self.total_ticks = TickId::default();
    }

    /// Records currently held.
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Whether no tick has been recorded since the last clear.
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// The underlying ring.
    pub fn ring(&self) -> &TickRing {
        &self.ring
    }

    /// Running count of synced records.
    pub fn synced_count(&self) -> usize {
        self.aggregator.synced_count()
    }

    /// Current sync percentage.
    pub fn sync_percent(&self) -> SyncPercent {
        self.aggregator.percent(self.ring.len())
    }

    /// Ticks recorded since the last clear, including overwritten ones.
    pub fn total_ticks(&self) -> TickId {
        self.total_ticks
    }

    /// The active plot mapping.
    pub fn plot(&self) -> &PlotTransform {
        &self.plot
    }

    /// Count synced records by scanning the ring.
    ///
    /// O(capacity); used by tests and debug checks against the running
    /// count.
    pub fn scan_synced(&self) -> usize {
        self.ring
            .records()
            .filter(|r| r.category.is_synced())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strafe_core::PointerMotion;

    fn synced_input() -> InputState {
        InputState {
            left_key_held: true,
            right_key_held: false,
            motion: PointerMotion::Left,
            pointer_x: 400.0,
        }
    }

    fn idle_input() -> InputState {
        InputState::default()
    }

    #[test]
    fn seven_of_ten_is_seventy_percent() {
        let mut h = TickHistory::new(500, PlotTransform::default());
        for i in 0..10 {
            let input = if i < 7 { synced_input() } else { idle_input() };
            h.record_tick(&input, 1300.0);
        }
        assert_eq!(h.len(), 10);
        assert_eq!(h.synced_count(), 7);
        assert_eq!(h.sync_percent().value(), 70);
        assert_eq!(h.total_ticks(), TickId(10));
    }

    #[test]
    fn record_uses_plot_transform() {
        let mut h = TickHistory::new(4, PlotTransform::default());
        let out = h.record_tick(&synced_input(), 1300.0);
        // 1300/2.6 + 400/4
        assert!((out.record.x - 600.0).abs() < 1e-9);
        assert_eq!(out.record.category, SyncCategory::Synced);
        assert_eq!(out.tick, TickId(1));
        assert!(out.evicted.is_none());
        assert_eq!(out.published.map(SyncPercent::value), Some(100));
    }

    #[test]
    fn overwrite_synced_with_not_synced_decrements() {
        let cap = 500;
        let mut h = TickHistory::new(cap, PlotTransform::default());
        // Oldest 200 synced, newest 300 not.
        for i in 0..cap {
            let input = if i < 200 { synced_input() } else { idle_input() };
            h.record_tick(&input, 1300.0);
        }
        assert!(h.ring().is_full());
        assert_eq!(h.synced_count(), 200);
        assert_eq!(h.ring().slot_at_head().map(|r| r.category), Some(SyncCategory::Synced));

        let out = h.record_tick(&idle_input(), 1300.0);
        assert_eq!(out.evicted.map(|r| r.category), Some(SyncCategory::Synced));
        assert_eq!(h.synced_count(), 199);
        assert_eq!(h.scan_synced(), 199);
        assert_eq!(h.len(), cap);
    }

    #[test]
    fn clear_resets_counts_and_ticks() {
        let mut h = TickHistory::new(8, PlotTransform::default());
        for _ in 0..12 {
            h.record_tick(&synced_input(), 800.0);
        }
        h.clear();
        assert!(h.is_empty());
        assert_eq!(h.synced_count(), 0);
        assert_eq!(h.sync_percent(), SyncPercent::ZERO);
        assert_eq!(h.total_ticks(), TickId(0));
    }

    #[test]
    fn publish_after_clear_reports_first_change() {
        let mut h = TickHistory::new(8, PlotTransform::default());
        h.record_tick(&synced_input(), 800.0);
        h.clear();
        let out = h.record_tick(&synced_input(), 800.0);
        assert_eq!(out.published.map(SyncPercent::value), Some(100));
    }
}
