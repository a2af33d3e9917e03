//! Benchmark profiles and utilities for the Strafe sync trainer.
//!
//! Provides pre-built [`EngineConfig`] profiles for benchmarks and demos:
//!
//! - [`reference_config`]: default 500-tick history at 240 Hz
//! - [`stress_config`]: 10K-tick history at 1 kHz
//! - [`filled_history`]: a full history for render benchmarks

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use strafe_core::{InputState, PointerMotion};
use strafe_engine::{EngineConfig, PlotTransform, TickHistory};

/// The default engine configuration.
pub fn reference_config() -> EngineConfig {
    EngineConfig::default()
}

/// A much longer history ticking at 1 kHz.
pub fn stress_config() -> EngineConfig {
    EngineConfig {
        history_capacity: 10_000,
        tick_rate_hz: 1_000,
        ..EngineConfig::default()
    }
}

/// A history of `capacity` ticks weaving left and right, roughly two
/// thirds synced.
pub fn filled_history(capacity: usize, viewport_width: f64) -> TickHistory {
    let mut history = TickHistory::new(capacity, PlotTransform::default());
    for i in 0..capacity {
        let phase = (i / 40) % 2 == 0;
        let input = InputState {
            left_key_held: phase,
            right_key_held: !phase && i % 3 != 0,
            motion: if phase {
                PointerMotion::Left
            } else {
                PointerMotion::Right
            },
            pointer_x: 1000.0 + ((i % 80) as f32 - 40.0) * 10.0,
        };
        history.record_tick(&input, viewport_width);
    }
    history
}
