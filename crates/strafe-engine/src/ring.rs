//! Fixed-capacity ring buffer of classified ticks.
//!
//! [`TickRing`] allocates its slots once and never grows. The write
//! cursor wraps modulo capacity; once it has wrapped the ring is `full`
//! and every push overwrites the oldest record.

use strafe_core::TickRecord;

/// A fixed-capacity ring of [`TickRecord`] slots.
///
/// Logical contents, oldest first, are `0..head` before the first wrap
/// and `head..capacity` followed by `0..head` afterwards.
#[derive(Clone, Debug)]
pub struct TickRing {
    slots: Box<[Option<TickRecord>]>,
    /// Next slot to write.
    head: usize,
    /// Set once `head` has wrapped.
    full: bool,
}

impl TickRing {
    /// Create an empty ring.
    ///
    /// # Panics
    ///
    /// Panics if `capacity < 2`. The ribbon needs two records to draw a
    /// segment.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 2, "TickRing capacity must be >= 2, got {capacity}");
        Self {
            slots: vec![None; capacity].into_boxed_slice(),
            head: 0,
            full: false,
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of records in the logical contents.
    pub fn len(&self) -> usize {
        if self.full {
            self.slots.len()
        } else {
            self.head
        }
    }

    /// Whether no record has been written since the last clear.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the cursor has wrapped at least once.
    pub fn is_full(&self) -> bool {
        self.full
    }

    /// Index of the next slot to write.
    pub fn head(&self) -> usize {
        self.head
    }

    /// The record the next push will overwrite.
    pub fn slot_at_head(&self) -> Option<&TickRecord> {
        self.slots[self.head].as_ref()
    }

    /// Write `record` at the cursor and advance it.
    ///
    /// Returns the record that was overwritten, if any.
    pub fn push(&mut self, record: TickRecord) -> Option<TickRecord> {
        let evicted = self.slots[self.head].replace(record);
        self.head += 1;
        if self.head == self.slots.len() {
            self.head = 0;
            self.full = true;
        }
        evicted
    }

    /// Drop every record and rewind the cursor. Keeps the allocation.
    pub fn clear(&mut self) {
        self.slots.fill(None);
        self.head = 0;
        self.full = false;
    }

    /// Logical contents, oldest first.
    ///
    /// Yields slots rather than records so a consumer that draws
    /// neighbouring pairs can skip gaps.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Option<TickRecord>> + Clone + '_ {
        let (older, newer) = if self.full {
            (&self.slots[self.head..], &self.slots[..self.head])
        } else {
            (&self.slots[..self.head], &self.slots[..0])
        };
        Chain { older, newer }
    }

    /// The most recently written record.
    pub fn newest(&self) -> Option<&TickRecord> {
        if self.is_empty() {
            return None;
        }
        let idx = self.head.checked_sub(1).unwrap_or(self.slots.len() - 1);
        self.slots[idx].as_ref()
    }

    /// Logical contents with gaps removed, oldest first.
    pub fn records(&self) -> impl Iterator<Item = TickRecord> + '_ {
        self.iter().flatten()
    }
}

/// Two slices read back to back. `std::iter::Chain` is not
/// `ExactSizeIterator`, which the renderer's callers rely on.
#[derive(Clone)]
struct Chain<'a> {
    older: &'a [Option<TickRecord>],
    newer: &'a [Option<TickRecord>],
}

impl Iterator for Chain<'_> {
    type Item = Option<TickRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((first, rest)) = self.older.split_first() {
            self.older = rest;
            return Some(*first);
        }
        let (first, rest) = self.newer.split_first()?;
        self.newer = rest;
        Some(*first)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.older.len() + self.newer.len();
        (n, Some(n))
    }
}

impl ExactSizeIterator for Chain<'_> {}
