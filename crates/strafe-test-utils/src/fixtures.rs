//! Named input snapshots, one per classification case.
//!
//! - [`synced_left`] / [`synced_right`]: key matches pointer direction.
//! - [`wrong_way`]: key held against the pointer.
//! - [`both_keys`]: both keys held while moving, never synced.
//! - [`idle`]: nothing held, pointer still.

use strafe_core::{InputState, PointerMotion};

fn state(left: bool, right: bool, motion: PointerMotion) -> InputState {
    InputState {
        left_key_held: left,
        right_key_held: right,
        motion,
        pointer_x: 900.0,
    }
}

pub fn synced_left() -> InputState {
    state(true, false, PointerMotion::Left)
}

pub fn synced_right() -> InputState {
    state(false, true, PointerMotion::Right)
}

pub fn wrong_way() -> InputState {
    state(true, false, PointerMotion::Right)
}

pub fn both_keys() -> InputState {
    state(true, true, PointerMotion::Left)
}

pub fn idle() -> InputState {
    InputState::default()
}
