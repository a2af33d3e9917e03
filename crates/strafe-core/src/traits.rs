//! Core abstraction traits.

use crate::input::InputState;

/// Source of input snapshots for the simulation.
///
/// The engine calls [`sample`](InputSource::sample) exactly once per
/// tick. Implementations are written to from other threads, so reads
/// must not block and must never return a torn state.
pub trait InputSource: Send + Sync {
    /// Read the current input state.
    fn sample(&self) -> InputState;
}

impl<T: InputSource + ?Sized> InputSource for std::sync::Arc<T> {
    fn sample(&self) -> InputState {
        (**self).sample()
    }
}
