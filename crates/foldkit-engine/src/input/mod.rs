//! Input subsystem.
//!
//! Public API is platform-agnostic: hosts translate their native touch or mouse
//! events into [`PointerEvent`]s. The fold layer only needs a single pointer
//! stream with timestamps, plus an optional fling velocity on release.

mod types;
mod velocity;

pub use types::{PointerAction, PointerEvent};
pub use velocity::VelocityTracker;
