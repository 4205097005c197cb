//! Canvas: the drawing seam between the fold layer and a host renderer.
//!
//! Responsibilities:
//! - define the small immediate-mode API the fold layer draws through ([`Canvas`])
//! - track the save/restore stack of transforms and device clips ([`CanvasState`])
//! - provide two backends: [`DrawList`] records calls for hosts with their own
//!   renderer, [`RasterCanvas`] rasterizes into a [`Bitmap`] in software
//!
//! Transforms are projective ([`Mat3`]) so perspective rotations pass through
//! unchanged. Clips are kept as device-space rectangles.

mod cmd;
mod list;
mod raster;
mod state;

pub use cmd::DrawCmd;
pub use list::{DrawItem, DrawList};
pub use raster::RasterCanvas;
pub use state::CanvasState;

use crate::coords::{IRect, Mat3, Rect};
use crate::paint::{Bitmap, Color};

/// Immediate-mode drawing surface.
///
/// Geometry passed to the draw calls is in local coordinates: it is mapped
/// through the current transform, then clipped by the current device clip.
pub trait Canvas {
    /// Pushes a copy of the current transform and clip.
    fn save(&mut self);

    /// Pops the state pushed by the matching [`save`](Canvas::save).
    fn restore(&mut self);

    /// Pre-concatenates `transform`: it applies to geometry before the current one.
    fn concat(&mut self, transform: Mat3);

    /// Intersects the clip with the device bounds of `rect`.
    fn clip_rect(&mut self, rect: Rect);

    /// Replaces every pixel inside the current clip with `color`.
    fn clear(&mut self, color: Color);

    /// Fills `rect` with `color` (src-over).
    fn draw_rect(&mut self, rect: Rect, color: Color);

    /// Draws the `src` region of `bitmap` stretched into `dst` (src-over).
    fn draw_bitmap(&mut self, bitmap: &Bitmap, src: IRect, dst: Rect);

    /// Current local-to-device transform.
    fn transform(&self) -> Mat3;

    /// Convenience for `concat(Mat3::translate(dx, dy))`.
    fn translate(&mut self, dx: f32, dy: f32) {
        self.concat(Mat3::translate(dx, dy));
    }
}
