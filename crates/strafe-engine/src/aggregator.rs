//! Running synced-tick count and the published sync percentage.

use strafe_core::{SyncPercent, TickRecord};

/// Tracks how many records in the ring are synced.
///
/// The count is maintained incrementally: the ring owner calls
/// [`evict`](Self::evict) for the slot about to be overwritten, then
/// [`admit`](Self::admit) for the new record. It never rescans.
#[derive(Clone, Debug, Default)]
pub struct SyncAggregator {
    synced_count: usize,
    published: SyncPercent,
}

impl SyncAggregator {
    /// Create an aggregator with a zero count.
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for a slot that is about to be overwritten.
    pub fn evict(&mut self, previous: Option<&TickRecord>) {
        if previous.is_some_and(|r| r.category.is_synced()) {
            debug_assert!(self.synced_count > 0, "evicting from a zero count");
            self.synced_count = self.synced_count.saturating_sub(1);
        }
    }

    /// Account for a newly written record.
    pub fn admit(&mut self, record: &TickRecord) {
        if record.category.is_synced() {
            self.synced_count += 1;
        }
    }

    /// Synced records currently in the ring.
    pub fn synced_count(&self) -> usize {
        self.synced_count
    }

    /// Percentage for a ring holding `len` records.
    pub fn percent(&self, len: usize) -> SyncPercent {
        SyncPercent::from_counts(self.synced_count, len)
    }

    /// Recompute the percentage and return it if it differs from the
    /// last published value.
    pub fn publish(&mut self, len: usize) -> Option<SyncPercent> {
        let current = self.percent(len);
        if current == self.published {
            return None;
        }
        self.published = current;
        Some(current)
    }

    /// The value most recently returned by [`publish`](Self::publish).
    pub fn published(&self) -> SyncPercent {
        self.published
    }

    /// Zero the count and the published value.
    pub fn reset(&mut self) {
        self.synced_count = 0;
        self.published = SyncPercent::ZERO;
    }
}
