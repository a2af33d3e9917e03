//! Display-frame thread for hosts without their own frame callback.
//!
//! [`FrameDriver`] moves a [`StrafeEngine`] and its [`Surface`] onto a
//! dedicated thread that calls [`StrafeEngine::frame`] at a fixed
//! display rate. Control arrives over a bounded crossbeam channel and is
//! drained before every frame, so a pause takes effect before the next
//! tick or render. No locks on the frame path.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use log::info;

use strafe_core::{ScrollSpeed, SpeedStep, SyncPercent};
use strafe_render::Surface;

use crate::config::{ConfigError, DriverConfig};
use crate::engine::StrafeEngine;

// ── DriverCommand ──────────────────────────────────────────────────

/// A control request for the frame thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverCommand {
    /// [`StrafeEngine::start`].
    Start,
    /// [`StrafeEngine::pause`].
    Pause,
    /// [`StrafeEngine::toggle`].
    Toggle,
    /// [`StrafeEngine::adjust_scroll_speed`].
    AdjustSpeed(SpeedStep),
    /// [`StrafeEngine::set_scroll_speed`].
    SetSpeed(ScrollSpeed),
}

// ── DriverError ────────────────────────────────────────────────────

/// Error submitting a [`DriverCommand`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverError {
    /// The frame thread has stopped.
    Shutdown,
    /// The command queue is full.
    ChannelFull,
}

impl std::fmt::Display for DriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shutdown => write!(f, "frame thread has shut down"),
            Self::ChannelFull => write!(f, "command channel full"),
        }
    }
}

impl std::error::Error for DriverError {}

impl<T> From<TrySendError<T>> for DriverError {
    fn from(e: TrySendError<T>) -> Self {
        match e {
            TrySendError::Full(_) => Self::ChannelFull,
            TrySendError::Disconnected(_) => Self::Shutdown,
        }
    }
}

// ── DriverReport ───────────────────────────────────────────────────

/// Everything handed back by [`FrameDriver::shutdown`].
#[derive(Debug)]
pub struct DriverReport<S> {
    /// The engine, with its history and last metrics intact.
    pub engine: StrafeEngine,
    /// The surface, as last drawn.
    pub surface: S,
    /// Frames processed while running.
    pub frames: u64,
}

// ── Shared status ──────────────────────────────────────────────────

/// Values the frame thread publishes after every frame.
#[derive(Debug, Default)]
struct DriverStatus {
    sync_percent: AtomicU8,
    running: AtomicBool,
    frames: AtomicU64,
    total_ticks: AtomicU64,
}

// ── FrameLoop ──────────────────────────────────────────────────────

/// State owned by the frame thread.
struct FrameLoop<S> {
    engine: StrafeEngine,
    surface: S,
    cmd_rx: Receiver<DriverCommand>,
    shutdown_flag: Arc<AtomicBool>,
    status: Arc<DriverStatus>,
    frame_budget: Duration,
    frames: u64,
}

impl<S: Surface + 'static> FrameLoop<S> {
    /// Main frame loop. Runs until `shutdown_flag` is set, then hands
    /// the engine and surface back through the `JoinHandle`.
    fn run(mut self) -> (StrafeEngine, S, u64) {
        let epoch = Instant::now();
        loop {
            if self.shutdown_flag.load(Ordering::Acquire) {
                break;
            }
            let frame_start = Instant::now();
            let now = frame_start.duration_since(epoch);

            // 1. Apply control before anything can tick.
            self.drain_commands(now);

            // 2. Tick and draw.
            if self.engine.frame(now, Some(&mut self.surface)).is_some() {
                self.frames += 1;
            }

            // 3. Publish status.
            self.status
                .sync_percent
                .store(self.engine.sync_percent().value(), Ordering::Release);
            self.status
                .running
                .store(self.engine.is_running(), Ordering::Release);
            self.status.frames.store(self.frames, Ordering::Release);
            self.status
                .total_ticks
                .store(self.engine.total_ticks().0, Ordering::Release);

            // 4. Sleep out the frame budget.
            self.park_until(frame_start + self.frame_budget);
        }
        // Commands queued before shutdown still apply.
        self.drain_commands(epoch.elapsed());
        info!("frame thread stopped after {} frames", self.frames);
        (self.engine, self.surface, self.frames)
    }

    /// Park until `deadline`. Only a queued command or shutdown ends the
    /// wait early; a stale unpark token just parks again.
    fn park_until(&self, deadline: Instant) {
        loop {
            if self.shutdown_flag.load(Ordering::Acquire) || !self.cmd_rx.is_empty() {
                return;
            }
            match deadline.checked_duration_since(Instant::now()) {
                Some(remaining) if !remaining.is_zero() => thread::park_timeout(remaining),
                _ => return,
            }
        }
    }

    fn drain_commands(&mut self, now: Duration) {
        while let Ok(cmd) = self.cmd_rx.try_recv() {
            match cmd {
                DriverCommand::Start => {
                    self.engine.start(now);
                }
                DriverCommand::Pause => {
                    self.engine.pause();
                }
                DriverCommand::Toggle => {
                    self.engine.toggle(now);
                }
                DriverCommand::AdjustSpeed(step) => {
                    self.engine.adjust_scroll_speed(step);
                }
                DriverCommand::SetSpeed(speed) => self.engine.set_scroll_speed(speed),
            }
        }
    }
}

// ── FrameDriver ────────────────────────────────────────────────────

/// Runs a [`StrafeEngine`] on its own display-frame thread.
///
/// Dropping the driver stops and joins the thread; use
/// [`shutdown()`](Self::shutdown) to get the engine and surface back.
pub struct FrameDriver<S: Surface + Send + 'static> {
    cmd_tx: Option<Sender<DriverCommand>>,
    shutdown_flag: Arc<AtomicBool>,
    status: Arc<DriverStatus>,
    thread: Option<JoinHandle<(StrafeEngine, S, u64)>>,
}

// Compile-time assertion: the driver handle can be shared with input threads.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<FrameDriver<strafe_render::DisplayList>>();
};

impl<S: Surface + Send + 'static> FrameDriver<S> {
    /// Validate `config` and start the frame thread.
    ///
    /// The engine keeps its current state; send [`DriverCommand::Start`]
    /// to begin ticking.
    pub fn spawn(
        engine: StrafeEngine,
        surface: S,
        config: DriverConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let frame_budget = Duration::try_from_secs_f64(1.0 / config.display_rate_hz).map_err(
            |_| ConfigError::InvalidDisplayRate {
                value: config.display_rate_hz,
            },
        )?;

        let (cmd_tx, cmd_rx) = crossbeam_channel::bounded(config.command_queue_capacity);
        let shutdown_flag = Arc::new(AtomicBool::new(false));
        let status = Arc::new(DriverStatus::default());
        status
            .sync_percent
            .store(engine.sync_percent().value(), Ordering::Relaxed);
        status.running.store(engine.is_running(), Ordering::Relaxed);

        let frame_loop = FrameLoop {
            engine,
            surface,
            cmd_rx,
            shutdown_flag: Arc::clone(&shutdown_flag),
            status: Arc::clone(&status),
            frame_budget,
            frames: 0,
        };
        let thread = thread::Builder::new()
            .name("strafe-frame".into())
            .spawn(move || frame_loop.run())
            .map_err(|e| ConfigError::ThreadSpawnFailed {
                reason: format!("strafe-frame: {e}"),
            })?;

        info!("frame driver spawned at {} Hz", config.display_rate_hz);
        Ok(Self {
            cmd_tx: Some(cmd_tx),
            shutdown_flag,
            status,
            thread: Some(thread),
        })
    }

    /// Queue a command for the next frame and wake the thread.
    pub fn send(&self, cmd: DriverCommand) -> Result<(), DriverError> {
        let tx = self.cmd_tx.as_ref().ok_or(DriverError::Shutdown)?;
        tx.try_send(cmd)?;
        if let Some(handle) = &self.thread {
            handle.thread().unpark();
        }
        Ok(())
    }

    /// Queue [`DriverCommand::Start`].
    pub fn start(&self) -> Result<(), DriverError> {
        self.send(DriverCommand::Start)
    }

    /// Queue [`DriverCommand::Pause`].
    pub fn pause(&self) -> Result<(), DriverError> {
        self.send(DriverCommand::Pause)
    }

    /// Queue [`DriverCommand::Toggle`].
    pub fn toggle(&self) -> Result<(), DriverError> {
        self.send(DriverCommand::Toggle)
    }

    /// Queue [`DriverCommand::AdjustSpeed`].
    pub fn adjust_speed(&self, step: SpeedStep) -> Result<(), DriverError> {
        self.send(DriverCommand::AdjustSpeed(step))
    }

    /// Sync percentage as of the last frame.
    pub fn sync_percent(&self) -> SyncPercent {
        SyncPercent::from_value(self.status.sync_percent.load(Ordering::Acquire))
    }

    /// Whether the engine was running at the end of the last frame.
    pub fn is_running(&self) -> bool {
        self.status.running.load(Ordering::Acquire)
    }

    /// Frames processed while running.
    pub fn frames(&self) -> u64 {
        self.status.frames.load(Ordering::Acquire)
    }

    /// Ticks recorded since the last start, as of the last frame.
    pub fn total_ticks(&self) -> u64 {
        self.status.total_ticks.load(Ordering::Acquire)
    }

    /// Stop the frame thread and recover the engine and surface.
    ///
    /// Returns [`ConfigError::EngineRecoveryFailed`] if the thread panicked.
    pub fn shutdown(mut self) -> Result<DriverReport<S>, ConfigError> {
        self.shutdown_flag.store(true, Ordering::Release);
        self.cmd_tx.take();
        let handle = self.thread.take().ok_or(ConfigError::EngineRecoveryFailed)?;
        handle.thread().unpark();
        let (engine, surface, frames) = handle
            .join()
            .map_err(|_| ConfigError::EngineRecoveryFailed)?;
        info!("frame driver shut down after {frames} frames");
        Ok(DriverReport {
            engine,
            surface,
            frames,
        })
    }
}

impl<S: Surface + Send + 'static> Drop for FrameDriver<S> {
    fn drop(&mut self) {
        self.shutdown_flag.store(true, Ordering::Release);
        self.cmd_tx.take();
        if let Some(handle) = self.thread.take() {
            handle.thread().unpark();
            let _ = handle.join();
        }
    }
}

impl<S: Surface + Send + 'static> std::fmt::Debug for FrameDriver<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameDriver")
            .field("running", &self.is_running())
            .field("frames", &self.frames())
            .field("total_ticks", &self.total_ticks())
            .field("sync_percent", &self.sync_percent())
            .finish()
    }
}
