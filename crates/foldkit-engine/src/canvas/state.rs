use crate::coords::{Mat3, Rect, Vec2};

/// Save/restore stack shared by the canvas backends.
///
/// The top entry is always the effective state: its transform is the product
/// of every `concat` since the bottom, and its clip is already intersected with
/// all parent clips.
#[derive(Debug, Clone)]
pub struct CanvasState {
    stack: Vec<Entry>,
}

#[derive(Debug, Copy, Clone)]
struct Entry {
    transform: Mat3,
    /// Device-space clip. `None` = no clipping.
    clip: Option<Rect>,
}

impl CanvasState {
    pub fn new() -> Self {
        Self {
            stack: vec![Entry { transform: Mat3::IDENTITY, clip: None }],
        }
    }

    /// Drops every saved entry and resets to identity / no clip.
    pub fn reset(&mut self) {
        self.stack.truncate(1);
        self.stack[0] = Entry { transform: Mat3::IDENTITY, clip: None };
    }

    #[inline]
    pub fn save(&mut self) {
        let top = *self.top();
        self.stack.push(top);
    }

    /// Restores the previous state. Unbalanced calls are ignored (debug-asserted).
    #[inline]
    pub fn restore(&mut self) {
        debug_assert!(self.stack.len() > 1, "restore called without matching save");
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    #[inline]
    pub fn transform(&self) -> Mat3 {
        self.top().transform
    }

    #[inline]
    pub fn clip(&self) -> Option<Rect> {
        self.top().clip
    }

    pub fn concat(&mut self, transform: Mat3) {
        let top = self.top_mut();
        top.transform = top.transform * transform;
    }

    /// Intersects the clip with the device bounding box of `rect`.
    ///
    /// If the rect cannot be projected (behind the camera) or does not overlap
    /// the parent, the clip becomes a zero-area rect so later draws are skipped.
    pub fn clip_rect(&mut self, rect: Rect) {
        let empty = Rect::new(0.0, 0.0, 0.0, 0.0);
        let device = self.device_bounds(rect).unwrap_or(empty);
        let top = self.top_mut();
        top.clip = Some(match top.clip {
            None => device,
            Some(parent) => parent.intersect(device).unwrap_or(empty),
        });
    }

    /// Device-space bounding box of `rect` under the current transform.
    pub fn device_bounds(&self, rect: Rect) -> Option<Rect> {
        device_bounds(&self.transform(), rect)
    }

    #[inline]
    fn top(&self) -> &Entry {
        // The bottom entry is never popped.
        &self.stack[self.stack.len() - 1]
    }

    #[inline]
    fn top_mut(&mut self) -> &mut Entry {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }
}

impl Default for CanvasState {
    fn default() -> Self {
        Self::new()
    }
}

/// Bounding box of the projected corners of `rect`, or `None` if any corner
/// falls behind the camera.
pub(crate) fn device_bounds(transform: &Mat3, rect: Rect) -> Option<Rect> {
    let mut min = Vec2::new(f32::INFINITY, f32::INFINITY);
    let mut max = Vec2::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
    for corner in rect.normalized().corners() {
        let p = transform.map_point(corner)?;
        min = Vec2::new(min.x.min(p.x), min.y.min(p.y));
        max = Vec2::new(max.x.max(p.x), max.y.max(p.y));
    }
    Some(Rect::new(min.x, min.y, max.x - min.x, max.y - min.y))
}
