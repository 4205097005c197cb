//! Time subsystem.
//!
//! Provides stable, testable frame timing without coupling to a runtime.
//! Intended usage:
//! - one `FrameClock` per render loop
//! - call `tick()` once per presented frame to obtain `FrameTime`
//! - feed `FrameTime::dt` to animations that advance once per frame
//!
//! Headless hosts and tests use [`FrameClock::fixed`] so every frame advances
//! by exactly the same step.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
