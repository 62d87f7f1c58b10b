//! Input layer: raw snapshots, edge detection, input-mode arbitration
//!
//! The platform fills an [`InputSnapshot`] once per frame; the
//! [`InputArbiter`] picks the active [`InputMode`] from it; edge detection
//! turns held buttons and stick deflections into one-shot presses for the
//! menu layer.

pub mod arbiter;
pub mod edge;
pub mod snapshot;

pub use arbiter::{InputArbiter, InputMode};
pub use edge::{EdgeState, PadEdges};
pub use snapshot::{InputSnapshot, PadSnapshot, NAV_STICK_THRESHOLD, STICK_DEADZONE};
