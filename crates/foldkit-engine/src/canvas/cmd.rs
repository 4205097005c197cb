use crate::coords::{IRect, Rect};
use crate::paint::Color;

/// Renderer-agnostic draw command recorded by [`DrawList`](super::DrawList).
///
/// Geometry is in the local space of the item's transform.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Replace the clipped region with a color.
    Clear(Color),
    /// Solid src-over rectangle.
    Rect { rect: Rect, color: Color },
    /// Bitmap region stretched into `dst`.
    ///
    /// Only the bitmap's dimensions are recorded; renderers that replay a
    /// list resolve pixel data through their own texture cache.
    Bitmap { bitmap_size: (u32, u32), src: IRect, dst: Rect },
}
