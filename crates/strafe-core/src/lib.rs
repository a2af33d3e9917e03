//! Core types and traits for the Strafe sync trainer.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the engine and the renderer: the input
//! snapshot and its lock-free shared cell, tick classification, the
//! sync percentage, and the user-adjustable scroll speed.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod id;
pub mod input;
pub mod record;
pub mod scroll;
pub mod sync;
pub mod traits;

pub use id::TickId;
pub use input::{ControlKey, InputState, InputWriter, PointerMotion, SharedInput, StrafeKey};
pub use record::{SyncCategory, TickRecord};
pub use scroll::{ScrollSpeed, SpeedStep};
pub use sync::{SyncGrade, SyncPercent};
pub use traits::InputSource;
