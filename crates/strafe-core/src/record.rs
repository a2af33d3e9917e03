//! Tick classification and the per-tick history record.

use crate::input::InputState;

/// Outcome of classifying one simulation tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SyncCategory {
    /// The held strafe key matches the pointer direction.
    Synced,
    /// Anything else, including both keys held at once.
    #[default]
    NotSynced,
}

impl SyncCategory {
    /// Classify an input snapshot.
    ///
    /// A tick is synced when the left key is held while the pointer moves
    /// left, or the right key is held while it moves right. Holding both
    /// keys is ambiguous and never counts, whatever the pointer does.
    pub fn classify(input: &InputState) -> Self {
        let both_held = input.left_key_held && input.right_key_held;
        let left_match = input.left_key_held && input.pointer_moving_left();
        let right_match = input.right_key_held && input.pointer_moving_right();
        if (left_match || right_match) && !both_held {
            Self::Synced
        } else {
            Self::NotSynced
        }
    }

    /// Whether this is [`SyncCategory::Synced`].
    pub fn is_synced(self) -> bool {
        self == Self::Synced
    }
}

/// One classified tick as stored in the history ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickRecord {
    /// Horizontal plot position for this tick.
    pub x: f64,
    /// Classification at the time of writing.
    pub category: SyncCategory,
}

impl TickRecord {
    /// Create a record.
    pub fn new(x: f64, category: SyncCategory) -> Self {
        Self { x, category }
    }
}
