//! Foldkit engine crate.
//!
//! This crate owns the host-agnostic pieces used by the fold layer: geometry,
//! paint and bitmaps, the `Canvas` drawing seam with its recording and software
//! raster backends, pointer input types, frame timing and logging setup.

pub mod canvas;
pub mod coords;
pub mod error;
pub mod input;
pub mod logging;
pub mod paint;
pub mod time;

pub use error::EngineError;
