//! Input snapshot, its lock-free shared cell, and key mapping.
//!
//! The input layer (keyboard and pointer listeners) writes into a
//! [`SharedInput`] from any thread; the simulation reads it once per
//! tick. The whole [`InputState`] is packed into a single `AtomicU64`,
//! so a reader never observes half of a key update and half of a
//! pointer update.
//!
//! # Packing
//!
//! ```text
//!  63            32 31      4  3 2   1     0
//! +----------------+---------+-----+-----+-----+
//! |  pointer_x f32 | unused  | mot | rgt | lft |
//! +----------------+---------+-----+-----+-----+
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::traits::InputSource;

/// Pointer x-coordinate assumed before the first pointer event.
pub const INITIAL_POINTER_X: f32 = 1000.0;

const LEFT_BIT: u64 = 1 << 0;
const RIGHT_BIT: u64 = 1 << 1;
const MOTION_SHIFT: u32 = 2;
const MOTION_MASK: u64 = 0b11 << MOTION_SHIFT;
const POINTER_SHIFT: u32 = 32;

// ── PointerMotion ──────────────────────────────────────────────────

/// Horizontal direction of the most recent pointer move event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerMotion {
    /// The last move event did not change the x-coordinate.
    #[default]
    Still,
    /// The pointer moved towards smaller x.
    Left,
    /// The pointer moved towards larger x.
    Right,
}

impl PointerMotion {
    /// Derive the motion from two consecutive x-coordinates.
    pub fn between(previous_x: f32, current_x: f32) -> Self {
        if current_x < previous_x {
            Self::Left
        } else if current_x > previous_x {
            Self::Right
        } else {
            Self::Still
        }
    }

    fn to_bits(self) -> u64 {
        let tag: u64 = match self {
            Self::Still => 0,
            Self::Left => 1,
            Self::Right => 2,
        };
        tag << MOTION_SHIFT
    }

    fn from_bits(bits: u64) -> Self {
        match (bits & MOTION_MASK) >> MOTION_SHIFT {
            1 => Self::Left,
            2 => Self::Right,
            _ => Self::Still,
        }
    }
}

// ── InputState ─────────────────────────────────────────────────────

/// Point-in-time view of the strafe keys and the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputState {
    /// Whether the left strafe key is held.
    pub left_key_held: bool,
    /// Whether the right strafe key is held.
    pub right_key_held: bool,
    /// Direction of the last pointer move event.
    pub motion: PointerMotion,
    /// Last observed horizontal pointer coordinate.
    pub pointer_x: f32,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            left_key_held: false,
            right_key_held: false,
            motion: PointerMotion::Still,
            pointer_x: INITIAL_POINTER_X,
        }
    }
}

impl InputState {
    /// Whether the last pointer move went left.
    pub fn pointer_moving_left(&self) -> bool {
        self.motion == PointerMotion::Left
    }

    /// Whether the last pointer move went right.
    pub fn pointer_moving_right(&self) -> bool {
        self.motion == PointerMotion::Right
    }

    /// Whether the given strafe key is held.
    pub fn key_held(&self, key: StrafeKey) -> bool {
        match key {
            StrafeKey::Left => self.left_key_held,
            StrafeKey::Right => self.right_key_held,
        }
    }

    fn pack(self) -> u64 {
        let mut bits = self.motion.to_bits();
        if self.left_key_held {
            bits |= LEFT_BIT;
        }
        if self.right_key_held {
            bits |= RIGHT_BIT;
        }
        bits | (u64::from(self.pointer_x.to_bits()) << POINTER_SHIFT)
    }

    fn unpack(bits: u64) -> Self {
        Self {
            left_key_held: bits & LEFT_BIT != 0,
            right_key_held: bits & RIGHT_BIT != 0,
            motion: PointerMotion::from_bits(bits),
            pointer_x: f32::from_bits((bits >> POINTER_SHIFT) as u32),
        }
    }
}

// ── SharedInput ────────────────────────────────────────────────────

/// Lock-free cell holding the current [`InputState`].
///
/// Writers apply read-modify-write updates with a CAS loop; readers do a
/// single acquire load. Last write wins per field.
#[derive(Debug)]
pub struct SharedInput {
    bits: AtomicU64,
}

// Compile-time assertion: SharedInput must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<SharedInput>();
};

impl Default for SharedInput {
    fn default() -> Self {
        Self::new(InputState::default())
    }
}

impl SharedInput {
    /// Create a cell holding `initial`.
    pub fn new(initial: InputState) -> Self {
        Self {
            bits: AtomicU64::new(initial.pack()),
        }
    }

    /// Create a cell with the default state, already wrapped for sharing.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Read the current state.
    pub fn load(&self) -> InputState {
        InputState::unpack(self.bits.load(Ordering::Acquire))
    }

    /// Replace the whole state.
    pub fn store(&self, state: InputState) {
        self.bits.store(state.pack(), Ordering::Release);
    }

    /// Atomically apply `f` to the current state.
    ///
    /// `f` may run more than once if another writer races this one.
    /// Returns the state as it was before the update.
    pub fn update<F>(&self, mut f: F) -> InputState
    where
        F: FnMut(&mut InputState),
    {
        let previous = self
            .bits
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                let mut state = InputState::unpack(bits);
                f(&mut state);
                Some(state.pack())
            });
        // The closure never returns None, so both arms carry the prior value.
        match previous {
            Ok(bits) | Err(bits) => InputState::unpack(bits),
        }
    }
}

impl InputSource for SharedInput {
    fn sample(&self) -> InputState {
        self.load()
    }
}

// ── StrafeKey / ControlKey ─────────────────────────────────────────

/// One of the two strafe keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrafeKey {
    /// Strafe left (`A`).
    Left,
    /// Strafe right (`D`).
    Right,
}

impl StrafeKey {
    /// Map a keyboard key name to a strafe key, ignoring case.
    ///
    /// `"a"` is left and `"d"` is right; every other key is `None`.
    pub fn from_key_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("a") {
            Some(Self::Left)
        } else if name.eq_ignore_ascii_case("d") {
            Some(Self::Right)
        } else {
            None
        }
    }
}

/// Keys that drive the engine rather than the strafe input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlKey {
    /// Flip between running and paused (`Space`).
    TogglePause,
}

impl ControlKey {
    /// Map a physical key code (`"Space"`) to a control key.
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "Space" => Some(Self::TogglePause),
            _ => None,
        }
    }
}

// ── InputWriter ────────────────────────────────────────────────────

/// Write handle used by keyboard and pointer listeners.
///
/// Cloning a writer is cheap; every clone writes the same cell.
#[derive(Clone, Debug)]
pub struct InputWriter {
    cell: Arc<SharedInput>,
}

impl InputWriter {
    /// Create a writer for `cell`.
    pub fn new(cell: Arc<SharedInput>) -> Self {
        Self { cell }
    }

    /// The cell this writer updates.
    pub fn cell(&self) -> &Arc<SharedInput> {
        &self.cell
    }

    /// Record a strafe key going down or up.
    pub fn set_key(&self, key: StrafeKey, held: bool) {
        self.cell.update(|state| match key {
            StrafeKey::Left => state.left_key_held = held,
            StrafeKey::Right => state.right_key_held = held,
        });
    }

    /// Apply a raw keyboard event by key name.
    ///
    /// Returns `false` when the key is not a strafe key and was ignored.
    pub fn key_event(&self, name: &str, pressed: bool) -> bool {
        match StrafeKey::from_key_name(name) {
            Some(key) => {
                self.set_key(key, pressed);
                true
            }
            None => false,
        }
    }

    /// Record a pointer move to horizontal position `x`.
    ///
    /// The motion direction is derived from the previously stored
    /// position, then `x` becomes the stored position.
    pub fn pointer_moved(&self, x: f32) {
        self.cell.update(|state| {
            state.motion = PointerMotion::between(state.pointer_x, x);
            state.pointer_x = x;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_matches_pre_event_assumptions() {
        let state = InputState::default();
        assert!(!state.left_key_held);
        assert!(!state.right_key_held);
        assert_eq!(state.motion, PointerMotion::Still);
        assert_eq!(state.pointer_x, INITIAL_POINTER_X);
    }

    #[test]
    fn pack_preserves_every_field() {
        let state = InputState {
            left_key_held: true,
            right_key_held: false,
            motion: PointerMotion::Right,
            pointer_x: -312.75,
        };
        assert_eq!(InputState::unpack(state.pack()), state);
    }

    #[test]
    fn motion_between_positions() {
        assert_eq!(PointerMotion::between(10.0, 4.0), PointerMotion::Left);
        assert_eq!(PointerMotion::between(10.0, 12.0), PointerMotion::Right);
        assert_eq!(PointerMotion::between(10.0, 10.0), PointerMotion::Still);
    }

    #[test]
    fn motion_accessors_are_mutually_exclusive() {
        for motion in [PointerMotion::Still, PointerMotion::Left, PointerMotion::Right] {
            let state = InputState {
                motion,
                ..InputState::default()
            };
            assert!(!(state.pointer_moving_left() && state.pointer_moving_right()));
        }
    }

    #[test]
    fn strafe_key_mapping_ignores_case() {
        assert_eq!(StrafeKey::from_key_name("a"), Some(StrafeKey::Left));
        assert_eq!(StrafeKey::from_key_name("A"), Some(StrafeKey::Left));
        assert_eq!(StrafeKey::from_key_name("d"), Some(StrafeKey::Right));
        assert_eq!(StrafeKey::from_key_name("D"), Some(StrafeKey::Right));
        assert_eq!(StrafeKey::from_key_name("w"), None);
        assert_eq!(StrafeKey::from_key_name("ArrowLeft"), None);
    }

    #[test]
    fn control_key_mapping() {
        assert_eq!(ControlKey::from_key_code("Space"), Some(ControlKey::TogglePause));
        assert_eq!(ControlKey::from_key_code("KeyA"), None);
    }

    #[test]
    fn writer_tracks_keys() {
        let writer = InputWriter::new(SharedInput::shared());
        assert!(writer.key_event("A", true));
        assert!(writer.key_event("d", true));
        assert!(!writer.key_event("q", true));
        let state = writer.cell().load();
        assert!(state.left_key_held && state.right_key_held);

        writer.set_key(StrafeKey::Left, false);
        let state = writer.cell().load();
        assert!(!state.left_key_held);
        assert!(state.key_held(StrafeKey::Right));
    }

    #[test]
    fn writer_derives_pointer_direction() {
        let writer = InputWriter::new(SharedInput::shared());
        writer.pointer_moved(900.0);
        assert!(writer.cell().load().pointer_moving_left());
        writer.pointer_moved(950.0);
        let state = writer.cell().load();
        assert!(state.pointer_moving_right());
        assert_eq!(state.pointer_x, 950.0);
        writer.pointer_moved(950.0);
        assert_eq!(writer.cell().load().motion, PointerMotion::Still);
    }

    #[test]
    fn update_returns_previous_state() {
        let cell = SharedInput::default();
        let before = cell.update(|s| s.left_key_held = true);
        assert!(!before.left_key_held);
        assert!(cell.load().left_key_held);
    }

    #[test]
    fn concurrent_writers_never_lose_fields() {
        let cell = SharedInput::shared();
        let keys = InputWriter::new(Arc::clone(&cell));
        let pointer = InputWriter::new(Arc::clone(&cell));

        let a = std::thread::spawn(move || {
            for i in 0..1000 {
                keys.set_key(StrafeKey::Right, i % 2 == 0);
            }
            keys.set_key(StrafeKey::Right, true);
        });
        let b = std::thread::spawn(move || {
            for i in 0..1000 {
                pointer.pointer_moved(i as f32);
            }
        });
        a.join().unwrap();
        b.join().unwrap();

        let state = cell.load();
        assert!(state.right_key_held);
        assert_eq!(state.pointer_x, 999.0);
        assert_eq!(state.motion, PointerMotion::Right);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_motion() -> impl Strategy<Value = PointerMotion> {
            prop_oneof![
                Just(PointerMotion::Still),
                Just(PointerMotion::Left),
                Just(PointerMotion::Right),
            ]
        }

        proptest! {
            #[test]
            fn packed_state_survives_a_store_and_load(
                left in any::<bool>(),
                right in any::<bool>(),
                motion in arb_motion(),
                x in -10_000.0f32..10_000.0,
            ) {
                let state = InputState {
                    left_key_held: left,
                    right_key_held: right,
                    motion,
                    pointer_x: x,
                };
                let cell = SharedInput::new(state);
                prop_assert_eq!(cell.load(), state);
            }
        }
    }
}
