//! Coordinate and geometry types shared by the canvas backends and the fold layer.
//!
//! Canonical CPU space:
//! - pixels, origin top-left
//! - +X right, +Y down
//!
//! `Rect` is the float rectangle used for layout and drawing; `IRect` is the
//! integer, edge-based rectangle used for bitmap sampling regions. `Mat3` is the
//! projective transform that carries perspective rotations.

mod irect;
mod mat3;
mod rect;
mod vec2;

pub use irect::IRect;
pub use mat3::Mat3;
pub use rect::Rect;
pub use vec2::Vec2;
