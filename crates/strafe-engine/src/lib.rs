//! Fixed-timestep strafe sync engine.
//!
//! Provides [`StrafeEngine`], which samples the shared input snapshot at a
//! fixed tick rate, classifies every tick, keeps a bounded ring of
//! classified ticks, derives the rolling sync percentage, and renders
//! the history once per display frame. [`FrameDriver`] runs an engine on
//! a dedicated display-frame thread for hosts without their own frame
//! callback.
//!
//! # Frame flow
//!
//! ```text
//! input layer ──► SharedInput
//!                     │ sample() once per tick
//! frame(now) ──► SimulationClock ──► n × TickHistory::record_tick
//!                                        │ SyncChanged / Progress events
//!                                        ▼
//!                Renderer::render(surface, ring oldest→newest)
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod aggregator;
pub mod clock;
pub mod config;
pub mod driver;
pub mod engine;
pub mod events;
pub mod history;
pub mod metrics;
pub mod ring;

pub use aggregator::SyncAggregator;
pub use clock::SimulationClock;
pub use config::{ConfigError, DriverConfig, EngineConfig, PlotTransform};
pub use driver::{DriverCommand, DriverError, DriverReport, FrameDriver};
pub use engine::{EngineState, StrafeEngine};
pub use events::{EngineEvent, EVENT_QUEUE_CAPACITY, PROGRESS_INTERVAL};
pub use history::{TickHistory, TickOutcome};
pub use metrics::FrameMetrics;
pub use ring::TickRing;
