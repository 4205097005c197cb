use crate::coords::{IRect, Mat3, Rect};
use crate::paint::{Bitmap, Color};

use super::state::device_bounds;
use super::{Canvas, CanvasState, DrawCmd};

/// A single recorded call: command + transform + clip at the time of the call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub cmd: DrawCmd,
    pub transform: Mat3,
    /// Device clip rect. `None` = no clipping (draw everywhere).
    pub clip_rect: Option<Rect>,
}

impl DrawItem {
    /// Device-space bounding box of the command's geometry, ignoring the clip.
    ///
    /// `Clear` has no geometry of its own and reports the clip.
    pub fn device_bounds(&self) -> Option<Rect> {
        match &self.cmd {
            DrawCmd::Clear(_) => self.clip_rect,
            DrawCmd::Rect { rect, .. } => device_bounds(&self.transform, *rect),
            DrawCmd::Bitmap { dst, .. } => device_bounds(&self.transform, *dst),
        }
    }
}

/// Recorded draw stream for a frame, in call order.
///
/// Performance characteristics:
/// - each draw call is an O(1) push
/// - [`reset`](DrawList::reset) keeps allocated capacity for reuse across frames
///
/// Paint order is insertion order: the last item is on top.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    state: CanvasState,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops recorded items and the save stack. Keeps allocated capacity.
    #[inline]
    pub fn reset(&mut self) {
        self.items.clear();
        self.state.reset();
    }

    /// Returns items in paint order (back-to-front).
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn push(&mut self, cmd: DrawCmd) {
        self.items.push(DrawItem {
            cmd,
            transform: self.state.transform(),
            clip_rect: self.state.clip(),
        });
    }
}

impl Canvas for DrawList {
    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn concat(&mut self, transform: Mat3) {
        self.state.concat(transform);
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.state.clip_rect(rect);
    }

    fn clear(&mut self, color: Color) {
        self.push(DrawCmd::Clear(color));
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawCmd::Rect { rect, color });
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, src: IRect, dst: Rect) {
        self.push(DrawCmd::Bitmap {
            bitmap_size: (bitmap.width(), bitmap.height()),
            src,
            dst,
        });
    }

    fn transform(&self) -> Mat3 {
        self.state.transform()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_transform_and_clip_per_item() {
        let mut list = DrawList::new();
        list.save();
        list.translate(10.0, 0.0);
        list.clip_rect(Rect::new(0.0, 0.0, 20.0, 20.0));
        list.draw_rect(Rect::new(0.0, 0.0, 5.0, 5.0), Color::BLACK);
        list.restore();
        list.draw_rect(Rect::new(0.0, 0.0, 5.0, 5.0), Color::WHITE);

        let items = list.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].transform, Mat3::translate(10.0, 0.0));
        assert_eq!(items[0].clip_rect, Some(Rect::new(10.0, 0.0, 20.0, 20.0)));
        assert_eq!(items[0].device_bounds(), Some(Rect::new(10.0, 0.0, 5.0, 5.0)));
        assert!(items[1].transform.is_identity());
        assert_eq!(items[1].clip_rect, None);
    }

    #[test]
    fn reset_drops_state_and_items() {
        let mut list = DrawList::new();
        list.save();
        list.translate(3.0, 3.0);
        list.clear(Color::BLACK);
        list.reset();
        assert!(list.is_empty());
        assert!(list.transform().is_identity());
    }
}
