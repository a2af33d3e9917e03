//! Engine and driver configuration, validation, and error types.
//!
//! [`EngineConfig`] is the builder-input for [`StrafeEngine`](crate::StrafeEngine);
//! [`DriverConfig`] configures the optional [`FrameDriver`](crate::FrameDriver)
//! thread. Both are checked up front by `validate()` so the running
//! engine has no failure modes of its own.

use std::error::Error;
use std::fmt;

use strafe_core::ScrollSpeed;
use strafe_render::{RenderConfig, StyleError};

/// Default number of ticks kept in the history ring.
pub const DEFAULT_HISTORY_CAPACITY: usize = 500;

/// Default simulation rate in ticks per second.
pub const DEFAULT_TICK_RATE_HZ: u32 = 240;

// ── PlotTransform ──────────────────────────────────────────────────

/// Maps the raw pointer position to a horizontal plot position.
///
/// `x = viewport_width * viewport_ratio + pointer_x * pointer_scale`.
/// The scale compresses the strafe swing into the drawable width; the
/// ratio anchors the ribbon slightly left of center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotTransform {
    /// Fraction of the viewport width used as the left offset. Default: 1/2.6.
    pub viewport_ratio: f64,
    /// Multiplier applied to the pointer x-coordinate. Default: 0.25.
    pub pointer_scale: f64,
}

impl Default for PlotTransform {
    fn default() -> Self {
        Self {
            viewport_ratio: 1.0 / 2.6,
            pointer_scale: 0.25,
        }
    }
}

impl PlotTransform {
    /// Plot position for a pointer coordinate on a viewport of the given width.
    pub fn x_for(&self, viewport_width: f64, pointer_x: f32) -> f64 {
        viewport_width * self.viewport_ratio + f64::from(pointer_x) * self.pointer_scale
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.viewport_ratio.is_finite() {
            return Err(ConfigError::InvalidPlot {
                field: "viewport_ratio",
                value: self.viewport_ratio,
            });
        }
        if !self.pointer_scale.is_finite() || self.pointer_scale <= 0.0 {
            return Err(ConfigError::InvalidPlot {
                field: "pointer_scale",
                value: self.pointer_scale,
            });
        }
        Ok(())
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating or running an engine configuration.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// History capacity is below the minimum of 2.
    HistoryTooSmall {
        /// The configured capacity that was too small.
        configured: usize,
    },
    /// tick_rate_hz is zero.
    InvalidTickRate {
        /// The invalid value.
        value: u32,
    },
    /// A plot transform field is not finite, or the scale is not positive.
    InvalidPlot {
        /// Name of the offending field.
        field: &'static str,
        /// The invalid value.
        value: f64,
    },
    /// Ribbon or grid style invariant violated.
    InvalidRender(StyleError),
    /// display_rate_hz is NaN, infinite, zero, or negative.
    InvalidDisplayRate {
        /// The invalid value.
        value: f64,
    },
    /// Driver command queue capacity is zero.
    CommandQueueZero,
    /// The frame thread could not be spawned.
    ThreadSpawnFailed {
        /// Description of the spawn failure.
        reason: String,
    },
    /// Engine could not be recovered from the frame thread (it panicked).
    EngineRecoveryFailed,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HistoryTooSmall { configured } => {
                write!(f, "history_capacity {configured} is below minimum of 2")
            }
            Self::InvalidTickRate { value } => {
                write!(f, "tick_rate_hz must be at least 1, got {value}")
            }
            Self::InvalidPlot { field, value } => {
                write!(f, "invalid plot transform: {field} = {value}")
            }
            Self::InvalidRender(e) => write!(f, "invalid render config: {e}"),
            Self::InvalidDisplayRate { value } => {
                write!(f, "display_rate_hz must be finite and positive, got {value}")
            }
            Self::CommandQueueZero => write!(f, "command_queue_capacity must be at least 1"),
            Self::ThreadSpawnFailed { reason } => write!(f, "thread spawn failed: {reason}"),
            Self::EngineRecoveryFailed => {
                write!(f, "engine could not be recovered from frame thread")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidRender(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StyleError> for ConfigError {
    fn from(e: StyleError) -> Self {
        Self::InvalidRender(e)
    }
}

// ── EngineConfig ───────────────────────────────────────────────────

/// Complete configuration for constructing a [`StrafeEngine`](crate::StrafeEngine).
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Number of ticks retained in the history ring. Default: 500. Minimum: 2.
    pub history_capacity: usize,
    /// Simulation ticks per second. Default: 240.
    pub tick_rate_hz: u32,
    /// Initial scroll speed. Default: 3.0.
    pub scroll_speed: ScrollSpeed,
    /// Pointer-to-plot mapping.
    pub plot: PlotTransform,
    /// Ribbon and grid appearance.
    pub render: RenderConfig,
    /// A frame that runs more than this many ticks is logged as a
    /// catch-up burst. Default: 8.
    pub catch_up_log_threshold: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
            scroll_speed: ScrollSpeed::DEFAULT,
            plot: PlotTransform::default(),
            render: RenderConfig::default(),
            catch_up_log_threshold: 8,
        }
    }
}

impl EngineConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. A ribbon needs two records to draw a segment.
        if self.history_capacity < 2 {
            return Err(ConfigError::HistoryTooSmall {
                configured: self.history_capacity,
            });
        }
        // 2. Tick rate must be non-zero.
        if self.tick_rate_hz == 0 {
            return Err(ConfigError::InvalidTickRate {
                value: self.tick_rate_hz,
            });
        }
        // 3. Plot transform.
        self.plot.validate()?;
        // 4. Render styles.
        self.render.validate()?;
        Ok(())
    }
}

// ── DriverConfig ───────────────────────────────────────────────────

/// Configuration for [`FrameDriver`](crate::FrameDriver).
#[derive(Clone, Debug)]
pub struct DriverConfig {
    /// Display frames per second. Default: 60.
    pub display_rate_hz: f64,
    /// Maximum commands buffered between frames. Default: 64.
    pub command_queue_capacity: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            display_rate_hz: 60.0,
            command_queue_capacity: 64,
        }
    }
}

impl DriverConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // The reciprocal must also be finite: subnormal rates would make
        // the frame budget infinite.
        let hz = self.display_rate_hz;
        if !hz.is_finite() || hz <= 0.0 || !(1.0 / hz).is_finite() {
            return Err(ConfigError::InvalidDisplayRate { value: hz });
        }
        if self.command_queue_capacity == 0 {
            return Err(ConfigError::CommandQueueZero);
        }
        Ok(())
    }
}
