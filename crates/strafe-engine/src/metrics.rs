//! Per-frame performance metrics for the strafe engine.
//!
//! [`FrameMetrics`] captures the tick count and timing of a single
//! display frame so a host can watch for catch-up bursts or slow
//! renders.

use strafe_core::{SyncPercent, TickId};

/// Counters and timings collected during one processed frame.
///
/// All durations are in microseconds. The engine fills these after each
/// [`frame`](crate::StrafeEngine::frame) call and keeps the most recent
/// copy available through
/// [`last_metrics`](crate::StrafeEngine::last_metrics).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameMetrics {
    /// Simulation ticks run during this frame.
    pub ticks_executed: u64,
    /// Ticks recorded since the last start.
    pub total_ticks: TickId,
    /// Records in the history after this frame.
    pub history_len: usize,
    /// Sync percentage after this frame.
    pub sync_percent: SyncPercent,
    /// Ribbon segments drawn.
    pub segments_drawn: usize,
    /// Grid lines drawn.
    pub grid_lines: usize,
    /// Time spent running ticks, in microseconds.
    pub simulate_us: u64,
    /// Time spent rendering, in microseconds.
    pub render_us: u64,
    /// Wall-clock time for the whole frame, in microseconds.
    pub total_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = FrameMetrics::default();
        assert_eq!(m.ticks_executed, 0);
        assert_eq!(m.total_ticks, TickId(0));
        assert_eq!(m.history_len, 0);
        assert_eq!(m.sync_percent, SyncPercent::ZERO);
        assert_eq!(m.segments_drawn, 0);
        assert_eq!(m.grid_lines, 0);
        assert_eq!(m.simulate_us, 0);
        assert_eq!(m.render_us, 0);
        assert_eq!(m.total_us, 0);
    }
}
