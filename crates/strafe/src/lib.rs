//! Strafe: a fixed-timestep trainer for keeping strafe keys in sync with
//! pointer movement.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Strafe sub-crates. For most users, adding `strafe` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::time::Duration;
//! use strafe::prelude::*;
//!
//! let input = SharedInput::shared();
//! let writer = InputWriter::new(input.clone());
//! let mut engine = StrafeEngine::new(EngineConfig::default(), input).unwrap();
//! engine.start(Duration::ZERO);
//!
//! // Holding "d" while the pointer moves right is in sync.
//! writer.key_event("d", true);
//! writer.pointer_moved(1010.0);
//!
//! let mut surface = DisplayList::new(1280.0, 720.0);
//! let metrics = engine
//!     .frame(Duration::from_millis(100), Some(&mut surface))
//!     .unwrap();
//! assert_eq!(metrics.ticks_executed, 24);
//! assert_eq!(engine.sync_percent().value(), 100);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `strafe-core` | Input snapshot, classification, sync percent, scroll speed |
//! | [`render`] | `strafe-render` | Surface trait, grid, ribbon, display list |
//! | [`engine`] | `strafe-engine` | Clock, history, engine controller, frame driver |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`strafe-core`).
///
/// Contains the input snapshot and its lock-free cell
/// ([`types::SharedInput`]), tick classification, [`types::SyncPercent`]
/// and [`types::ScrollSpeed`].
pub use strafe_core as types;

/// Rendering (`strafe-render`).
///
/// Implement [`render::Surface`] for your canvas, or draw into a
/// [`render::DisplayList`] for headless use.
pub use strafe_render as render;

/// The engine (`strafe-engine`).
///
/// [`engine::StrafeEngine`] for hosts with their own frame callback,
/// [`engine::FrameDriver`] to run one on a background thread.
pub use strafe_engine as engine;

/// Common imports for typical Strafe usage.
///
/// ```rust
/// use strafe::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use strafe_core::{
        ControlKey, InputSource, InputState, InputWriter, PointerMotion, ScrollSpeed,
        SharedInput, SpeedStep, StrafeKey, SyncCategory, SyncGrade, SyncPercent, TickId,
        TickRecord,
    };

    // Rendering
    pub use strafe_render::{DisplayList, RenderConfig, Renderer, Surface, SurfaceSize};

    // Engine
    pub use strafe_engine::{
        ConfigError, DriverCommand, DriverConfig, DriverError, EngineConfig, EngineEvent,
        EngineState, FrameDriver, FrameMetrics, StrafeEngine,
    };
}
