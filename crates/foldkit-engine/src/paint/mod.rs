//! Paint model shared between the fold layer and canvas backends.
//!
//! Scope:
//! - color representation (premultiplied alpha)
//! - offscreen RGBA bitmaps and how they are allocated
//!
//! Geometry types remain in `coords`.

pub mod alloc;
pub mod bitmap;
pub mod color;

pub use alloc::{BitmapAllocator, BudgetAllocator, HeapAllocator};
pub use bitmap::Bitmap;
pub use color::Color;
