//! Test utilities and input fixtures for Strafe development.
//!
//! Provides a scripted [`InputSource`], named input snapshots for each
//! classification case, seeded random input streams, and frame
//! timestamp helpers.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use strafe_core::{InputSource, InputState, PointerMotion};

pub use fixtures::{both_keys, idle, synced_left, synced_right, wrong_way};

/// An [`InputSource`] that replays a fixed script, one entry per sample.
///
/// Wraps around when the script runs out, so a short script can drive
/// an arbitrarily long run.
pub struct ScriptedInput {
    script: Vec<InputState>,
    cursor: AtomicUsize,
}

impl ScriptedInput {
    /// # Panics
    ///
    /// Panics if `script` is empty.
    pub fn new(script: Vec<InputState>) -> Self {
        assert!(!script.is_empty(), "ScriptedInput needs at least one entry");
        Self {
            script,
            cursor: AtomicUsize::new(0),
        }
    }

    /// A script of `synced` synced ticks followed by `not_synced` idle ones.
    pub fn pattern(synced: usize, not_synced: usize) -> Self {
        let mut script = vec![synced_left(); synced];
        script.extend(std::iter::repeat_n(idle(), not_synced));
        Self::new(script)
    }

    /// Number of samples taken so far.
    pub fn samples(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }
}

impl InputSource for ScriptedInput {
    fn sample(&self) -> InputState {
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.script[i % self.script.len()]
    }
}

/// `n` random input snapshots from a seeded ChaCha8 stream.
///
/// Every key/motion combination is reachable; the same seed always
/// yields the same sequence.
pub fn random_inputs(seed: u64, n: usize) -> Vec<InputState> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let motion = match rng.random_range(0..3u8) {
                0 => PointerMotion::Left,
                1 => PointerMotion::Right,
                _ => PointerMotion::Still,
            };
            InputState {
                left_key_held: rng.random_bool(0.5),
                right_key_held: rng.random_bool(0.5),
                motion,
                pointer_x: rng.random_range(0.0..2000.0),
            }
        })
        .collect()
}

/// Timestamps `0, step, 2·step, …` for `frames` frames.
pub fn frame_times(step: Duration, frames: u32) -> impl Iterator<Item = Duration> {
    (0..frames).map(move |i| step * i)
}

/// Cumulative timestamps for seeded random frame gaps in `min..=max` ms.
pub fn jittered_frame_times(seed: u64, frames: usize, min_ms: u64, max_ms: u64) -> Vec<Duration> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut now = Duration::ZERO;
    (0..frames)
        .map(|_| {
            now += Duration::from_millis(rng.random_range(min_ms..=max_ms));
            now
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_input_wraps() {
        let src = ScriptedInput::pattern(1, 1);
        assert_eq!(src.sample(), synced_left());
        assert_eq!(src.sample(), idle());
        assert_eq!(src.sample(), synced_left());
        assert_eq!(src.samples(), 3);
    }

    #[test]
    fn random_inputs_are_deterministic() {
        assert_eq!(random_inputs(7, 64), random_inputs(7, 64));
        assert_ne!(random_inputs(7, 64), random_inputs(8, 64));
    }

    #[test]
    fn frame_times_are_evenly_spaced() {
        let times: Vec<_> = frame_times(Duration::from_millis(10), 3).collect();
        assert_eq!(
            times,
            vec![Duration::ZERO, Duration::from_millis(10), Duration::from_millis(20)]
        );
    }

    #[test]
    fn jittered_times_increase() {
        let times = jittered_frame_times(3, 50, 1, 40);
        assert!(times.windows(2).all(|w| w[0] < w[1]));
    }
}
