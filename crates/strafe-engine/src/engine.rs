//! The engine controller.
//!
//! [`StrafeEngine`] owns the clock, the history and the renderer. The
//! host calls [`frame()`](StrafeEngine::frame) once per display frame
//! with a monotonic timestamp; the engine converts elapsed time into
//! fixed-rate ticks, records each one, and redraws the history.
//!
//! # Ownership model
//!
//! All mutating methods take `&mut self`. The only state shared with
//! other threads is the input snapshot, read through [`InputSource`]
//! once per tick. `StrafeEngine` is [`Send`], so it can be moved onto a
//! [`FrameDriver`](crate::FrameDriver) thread.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::{debug, info, trace};

use strafe_core::{InputSource, ScrollSpeed, SpeedStep, SyncPercent, TickId};
use strafe_render::{RenderFrame, RenderStats, Renderer, Surface};

use crate::clock::SimulationClock;
use crate::config::{ConfigError, EngineConfig};
use crate::events::{EngineEvent, EventBus, PROGRESS_INTERVAL};
use crate::history::{TickHistory, TickOutcome};
use crate::metrics::FrameMetrics;

// Compile-time assertion: StrafeEngine can cross to the frame thread.
const _: fn() = || {
    fn assert<T: Send>() {}
    assert::<StrafeEngine>();
};

// ── EngineState ────────────────────────────────────────────────────

/// Run state of the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// Not ticking or rendering. The initial state.
    #[default]
    Idle,
    /// Ticking and rendering on every frame.
    Running,
}

// ── StrafeEngine ───────────────────────────────────────────────────

/// Fixed-timestep strafe sync engine.
///
/// Created from an [`EngineConfig`] and an input source via
/// [`new()`](StrafeEngine::new). Starts [`Idle`](EngineState::Idle).
///
/// # Example
///
/// ```ignore
/// let input = SharedInput::shared();
/// let mut engine = StrafeEngine::new(EngineConfig::default(), input.clone())?;
/// engine.start(now());
/// loop {
///     engine.frame(now(), Some(&mut canvas));
/// }
/// ```
pub struct StrafeEngine {
    config: EngineConfig,
    input: Arc<dyn InputSource>,
    clock: SimulationClock,
    history: TickHistory,
    renderer: Renderer,
    scroll_speed: ScrollSpeed,
    state: EngineState,
    events: EventBus,
    last_metrics: Option<FrameMetrics>,
}

impl StrafeEngine {
    /// Validate `config` and build an idle engine reading from `input`.
    pub fn new(config: EngineConfig, input: Arc<dyn InputSource>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            clock: SimulationClock::new(config.tick_rate_hz),
            history: TickHistory::new(config.history_capacity, config.plot),
            renderer: Renderer::new(config.render),
            scroll_speed: config.scroll_speed,
            state: EngineState::Idle,
            events: EventBus::default(),
            last_metrics: None,
            input,
            config,
        })
    }

    // ── Lifecycle ──────────────────────────────────────────────────

    /// Current run state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Whether the engine is [`Running`](EngineState::Running).
    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    /// Go from idle to running.
    ///
    /// Clears the history and rebases the clock at `now`, so time spent
    /// idle never turns into owed ticks. Returns `false` if already
    /// running.
    pub fn start(&mut self, now: Duration) -> bool {
        if self.is_running() {
            return false;
        }
        self.history.clear();
        self.clock.reset(now);
        self.last_metrics = None;
        self.state = EngineState::Running;
        info!(
            "strafe engine started: {} Hz, history {}",
            self.config.tick_rate_hz, self.config.history_capacity
        );
        self.events.emit(EngineEvent::Started);
        self.events.emit(EngineEvent::SyncChanged(SyncPercent::ZERO));
        true
    }

    /// Go from running to idle. History is kept so the paused view can
    /// still be drawn with [`render()`](Self::render). Returns `false` if
    /// already idle.
    pub fn pause(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = EngineState::Idle;
        info!(
            "strafe engine paused after {} ticks at {}",
            self.history.total_ticks(),
            self.history.sync_percent()
        );
        self.events.emit(EngineEvent::Paused);
        true
    }

    /// Flip between idle and running; returns the new state.
    pub fn toggle(&mut self, now: Duration) -> EngineState {
        match self.state {
            EngineState::Idle => self.start(now),
            EngineState::Running => self.pause(),
        };
        self.state
    }

    // ── Frame processing ───────────────────────────────────────────

    /// Process one display frame at monotonic time `now`.
    ///
    /// Runs every tick owed since the previous frame, then redraws
    /// `surface`. Returns `None` without touching anything when idle.
    /// With no surface the frame is skipped and the clock is rebased, so
    /// the missing interval is not replayed later.
    pub fn frame(
        &mut self,
        now: Duration,
        surface: Option<&mut dyn Surface>,
    ) -> Option<FrameMetrics> {
        if !self.is_running() {
            return None;
        }
        let Some(surface) = surface else {
            self.clock.reset(now);
            return None;
        };

        let frame_start = Instant::now();
        let viewport_width = surface.size().width;
        let ticks = self.clock.advance(now);
        for _ in 0..ticks {
            self.run_tick(viewport_width);
        }
        if ticks > self.config.catch_up_log_threshold {
            debug!(
                "catch-up frame: {ticks} ticks (threshold {})",
                self.config.catch_up_log_threshold
            );
        }
        let simulate_us = frame_start.elapsed().as_micros() as u64;

        let render_start = Instant::now();
        let stats = self.render(surface);
        let render_us = render_start.elapsed().as_micros() as u64;

        let metrics = FrameMetrics {
            ticks_executed: ticks,
            total_ticks: self.history.total_ticks(),
            history_len: self.history.len(),
            sync_percent: self.history.sync_percent(),
            segments_drawn: stats.segments,
            grid_lines: stats.grid_lines,
            simulate_us,
            render_us,
            total_us: frame_start.elapsed().as_micros() as u64,
        };
        self.last_metrics = Some(metrics);
        Some(metrics)
    }

    /// Run exactly one tick, ignoring the clock.
    ///
    /// For lockstep hosts and tests. Returns `None` when idle.
    pub fn step(&mut self, viewport_width: f64) -> Option<TickOutcome> {
        if !self.is_running() {
            return None;
        }
        Some(self.run_tick(viewport_width))
    }

    /// Draw the current history without ticking.
    pub fn render(&self, surface: &mut dyn Surface) -> RenderStats {
        self.renderer.render(
            surface,
            RenderFrame {
                slots: self.history.ring().iter(),
                len: self.history.len(),
                total_ticks: self.history.total_ticks().0,
                scroll_speed: self.scroll_speed,
            },
        )
    }

    fn run_tick(&mut self, viewport_width: f64) -> TickOutcome {
        let input = self.input.sample();
        let outcome = self.history.record_tick(&input, viewport_width);
        if let Some(percent) = outcome.published {
            trace!("sync changed to {percent} at tick {}", outcome.tick);
            self.events.emit(EngineEvent::SyncChanged(percent));
        }
        if outcome.tick.0 % PROGRESS_INTERVAL == 0 {
            self.events.emit(EngineEvent::Progress {
                total_ticks: outcome.tick.0,
            });
        }
        outcome
    }

    // ── Accessors ──────────────────────────────────────────────────

    /// Current sync percentage. Zero for an empty history.
    pub fn sync_percent(&self) -> SyncPercent {
        self.history.sync_percent()
    }

    /// Ticks recorded since the last start.
    pub fn total_ticks(&self) -> TickId {
        self.history.total_ticks()
    }

    /// Records currently held.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Read-only view of the history.
    pub fn history(&self) -> &TickHistory {
        &self.history
    }

    /// Current scroll speed.
    pub fn scroll_speed(&self) -> ScrollSpeed {
        self.scroll_speed
    }

    /// Replace the scroll speed.
    pub fn set_scroll_speed(&mut self, speed: ScrollSpeed) {
        self.scroll_speed = speed;
    }

    /// Step the scroll speed once, clamped to its range; returns the new value.
    pub fn adjust_scroll_speed(&mut self, step: SpeedStep) -> ScrollSpeed {
        self.scroll_speed = self.scroll_speed.adjust(step);
        self.scroll_speed
    }

    /// Receive every [`EngineEvent`] emitted from now on.
    ///
    /// The queue holds [`EVENT_QUEUE_CAPACITY`](crate::events::EVENT_QUEUE_CAPACITY)
    /// events; a subscriber that stops reading misses later events rather
    /// than growing the queue.
    pub fn subscribe(&mut self) -> Receiver<EngineEvent> {
        self.events.subscribe()
    }

    /// Metrics from the most recent processed frame.
    pub fn last_metrics(&self) -> Option<FrameMetrics> {
        self.last_metrics
    }

    /// The configuration this engine was built from.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl std::fmt::Debug for StrafeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrafeEngine")
            .field("state", &self.state)
            .field("total_ticks", &self.history.total_ticks())
            .field("history_len", &self.history.len())
            .field("sync_percent", &self.history.sync_percent())
            .field("scroll_speed", &self.scroll_speed)
            .finish()
    }
}
