//! Fixed-timestep simulation clock.
//!
//! Converts wall-clock frame timestamps into a whole number of owed
//! simulation ticks. Time debt is kept in units of
//! `nanoseconds × tick_rate_hz`, where one tick costs exactly `1e9`
//! units, so the tick count for a span of time is independent of how
//! that span is split across frames.

use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Accumulator-based fixed-timestep clock.
#[derive(Clone, Debug)]
pub struct SimulationClock {
    tick_rate_hz: u32,
    /// Time debt in `ns × tick_rate_hz`.
    accumulator: u128,
    last_timestamp: Option<Duration>,
}

impl SimulationClock {
    /// Create a clock running at `tick_rate_hz` ticks per second.
    ///
    /// # Panics
    ///
    /// Panics if `tick_rate_hz` is zero. [`EngineConfig::validate`](crate::EngineConfig::validate)
    /// rejects that value before an engine builds its clock.
    pub fn new(tick_rate_hz: u32) -> Self {
        assert!(tick_rate_hz > 0, "tick_rate_hz must be at least 1");
        Self {
            tick_rate_hz,
            accumulator: 0,
            last_timestamp: None,
        }
    }

    /// Rebase the clock at `now` and drop any owed time.
    pub fn reset(&mut self, now: Duration) {
        self.last_timestamp = Some(now);
        self.accumulator = 0;
    }

    /// Advance to `now` and return how many ticks are owed.
    ///
    /// The first call after construction only establishes the baseline.
    /// A timestamp earlier than the previous one contributes nothing.
    pub fn advance(&mut self, now: Duration) -> u64 {
        let delta = match self.last_timestamp {
            Some(last) => now.saturating_sub(last),
            None => Duration::ZERO,
        };
        if self.last_timestamp.is_none_or(|last| now > last) {
            self.last_timestamp = Some(now);
        }

        self.accumulator += delta.as_nanos() * u128::from(self.tick_rate_hz);
        let ticks = self.accumulator / NANOS_PER_SEC;
        self.accumulator %= NANOS_PER_SEC;
        u64::try_from(ticks).unwrap_or(u64::MAX)
    }

    /// Ticks per second.
    pub fn tick_rate_hz(&self) -> u32 {
        self.tick_rate_hz
    }

    /// Nominal duration of one tick (rounded down to whole nanoseconds).
    pub fn tick_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.tick_rate_hz))
    }

    /// Time owed but not yet converted into a tick.
    pub fn accumulated(&self) -> Duration {
        let nanos = self.accumulator / u128::from(self.tick_rate_hz);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }

    /// Timestamp of the last frame seen, if any.
    pub fn last_timestamp(&self) -> Option<Duration> {
        self.last_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn first_advance_sets_baseline() {
        let mut clock = SimulationClock::new(240);
        assert_eq!(clock.advance(ms(5_000)), 0);
        assert_eq!(clock.last_timestamp(), Some(ms(5_000)));
    }

    #[test]
    fn one_second_is_tick_rate_ticks() {
        let mut clock = SimulationClock::new(240);
        clock.reset(ms(0));
        assert_eq!(clock.advance(ms(1_000)), 240);
        assert_eq!(clock.accumulated(), Duration::ZERO);
    }

    #[test]
    fn single_frame_and_split_frames_agree() {
        let mut whole = SimulationClock::new(240);
        whole.reset(ms(0));
        let a = whole.advance(ms(100));

        let mut split = SimulationClock::new(240);
        split.reset(ms(0));
        let b: u64 = (1..=10).map(|i| split.advance(ms(i * 10))).sum();

        assert_eq!(a, 24);
        assert_eq!(b, 24);
    }

    #[test]
    fn short_frame_carries_debt() {
        let mut clock = SimulationClock::new(240);
        clock.reset(ms(0));
        // 1000/240 ms ≈ 4.1667 ms per tick.
        assert_eq!(clock.advance(ms(4)), 0);
        assert!(clock.accumulated() > Duration::ZERO);
        assert_eq!(clock.advance(ms(5)), 1);
    }

    #[test]
    fn backwards_timestamp_adds_nothing() {
        let mut clock = SimulationClock::new(240);
        clock.reset(ms(100));
        assert_eq!(clock.advance(ms(50)), 0);
        // Baseline stays at 100; going forward counts from there.
        assert_eq!(clock.advance(ms(200)), 24);
    }

    #[test]
    fn reset_drops_owed_time() {
        let mut clock = SimulationClock::new(240);
        clock.reset(ms(0));
        clock.advance(ms(3));
        clock.reset(ms(10_000));
        assert_eq!(clock.accumulated(), Duration::ZERO);
        assert_eq!(clock.advance(ms(10_000)), 0);
    }

    #[test]
    fn tick_interval_for_default_rate() {
        let clock = SimulationClock::new(240);
        assert_eq!(clock.tick_interval(), Duration::from_nanos(4_166_666));
    }

    #[test]
    #[should_panic(expected = "tick_rate_hz")]
    fn zero_rate_panics() {
        let _ = SimulationClock::new(0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn tick_count_independent_of_frame_split(
                frames in prop::collection::vec(0u64..50_000_000, 1..64),
                rate in 1u32..1_000,
            ) {
                let mut split = SimulationClock::new(rate);
                split.reset(Duration::ZERO);
                let mut now = 0u64;
                let mut total = 0u64;
                for f in &frames {
                    now += f;
                    total += split.advance(Duration::from_nanos(now));
                }

                let mut whole = SimulationClock::new(rate);
                whole.reset(Duration::ZERO);
                let expected = whole.advance(Duration::from_nanos(now));

                prop_assert_eq!(total, expected);
                let exact = u128::from(now) * u128::from(rate) / NANOS_PER_SEC;
                prop_assert_eq!(u128::from(total), exact);
            }
        }
    }
}
