use foldkit_engine::canvas::Canvas;
use foldkit_engine::coords::{IRect, Mat3, Rect, Vec2};
use foldkit_engine::paint::Bitmap;

use crate::shading::{FoldShading, Gravity};

/// Normalizes an angle in degrees into (−180, 180].
pub fn normalize_rotation(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let p = degrees.rem_euclid(360.0);
    if p > 180.0 { p - 360.0 } else { p }
}

/// One of the two halves of a [`FoldItem`](crate::FoldItem).
///
/// A half samples its part of the item's capture bitmap and draws it with its
/// own rotation about the item's horizontal centerline. It never owns the
/// bitmap: the item lends it for the duration of a draw.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldHalf {
    gravity: Gravity,
    clipping_factor: f32,
    bitmap_bounds: IRect,
    external_visible: bool,
    internal_visible: bool,
    local_rotation: f32,
    rotation_x: f32,
    translation_y: f32,
    scale_x: f32,
    scale_y: f32,
}

impl FoldHalf {
    pub fn new(gravity: Gravity) -> Self {
        Self {
            gravity,
            clipping_factor: 0.5,
            bitmap_bounds: IRect::EMPTY,
            external_visible: true,
            internal_visible: true,
            local_rotation: 0.0,
            rotation_x: 0.0,
            translation_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    #[inline]
    pub fn gravity(&self) -> Gravity {
        self.gravity
    }

    /// Share of the item height this half samples, in `[0, 1]`.
    #[inline]
    pub fn clipping_factor(&self) -> f32 {
        self.clipping_factor
    }

    /// Sampled region of the capture bitmap, also the region it is drawn to
    /// before the half's transform. Empty when nothing is sampled.
    #[inline]
    pub fn bitmap_bounds(&self) -> IRect {
        self.bitmap_bounds
    }

    /// Visible only when both the item and the rotation policy allow it.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.external_visible && self.internal_visible
    }

    #[inline]
    pub fn rotation_x(&self) -> f32 {
        self.rotation_x
    }

    /// Item fold rotation as last applied, normalized.
    #[inline]
    pub fn local_rotation(&self) -> f32 {
        self.local_rotation
    }

    #[inline]
    pub fn translation_y(&self) -> f32 {
        self.translation_y
    }

    #[inline]
    pub fn scale(&self) -> Vec2 {
        Vec2::new(self.scale_x, self.scale_y)
    }

    // ── mutation (driven by the item) ─────────────────────────────────────

    pub(crate) fn set_external_visible(&mut self, visible: bool) {
        self.external_visible = visible;
    }

    /// Applies the rotation policy for an already normalized angle.
    ///
    /// TOP rotates on (−90, 0) and is hidden on (−180, −90] ∪ {180};
    /// BOTTOM rotates on (0, 90) and is hidden on [90, 180]. Otherwise the
    /// half holds still.
    pub(crate) fn apply_fold_rotation(&mut self, position: f32) {
        let (rotation_x, visible) = match self.gravity {
            Gravity::Top if position <= -90.0 || position == 180.0 => (0.0, false),
            Gravity::Top if position < 0.0 => (position, true),
            Gravity::Top => (0.0, true),
            Gravity::Bottom if position >= 90.0 => (0.0, false),
            Gravity::Bottom if position > 0.0 => (position, true),
            Gravity::Bottom => (0.0, true),
        };
        self.rotation_x = rotation_x;
        self.internal_visible = visible;
        self.local_rotation = position;
    }

    pub(crate) fn set_scale(&mut self, scale_x: f32, scale_y: f32) {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
    }

    /// Sets the Y translation and this half's clipping from the shared top clipping.
    pub(crate) fn apply_rolling(&mut self, translation_y: f32, top_clipping: f32) {
        self.translation_y = translation_y;
        self.clipping_factor = match self.gravity {
            Gravity::Top => top_clipping,
            Gravity::Bottom => 1.0 - top_clipping,
        };
    }

    /// Recomputes the sampled region for a `width × height` capture.
    pub(crate) fn compute_bounds(&mut self, width: u32, height: u32, visible: Option<IRect>) {
        if width == 0 || height == 0 {
            self.bitmap_bounds = IRect::EMPTY;
            return;
        }
        let (w, h) = (width as i32, height as i32);
        let c = self.clipping_factor;
        let (top, bottom) = match self.gravity {
            Gravity::Top => (0, (height as f32 * c).round() as i32),
            Gravity::Bottom => ((height as f32 * (1.0 - c)).round() as i32, h),
        };
        let bounds = IRect::new(0, top.clamp(0, h), w, bottom.clamp(0, h));

        self.bitmap_bounds = match visible {
            Some(v) => bounds.intersect(v).unwrap_or(IRect::EMPTY),
            None if bounds.is_empty() => IRect::EMPTY,
            None => bounds,
        };
    }

    /// Local-to-parent transform: scale, then rotate about X, then translate,
    /// all about `pivot`.
    pub fn transform(&self, pivot: Vec2, camera_depth: f32) -> Mat3 {
        Mat3::translate(pivot.x, pivot.y + self.translation_y)
            * Mat3::rotate_x(self.rotation_x, camera_depth)
            * Mat3::scale(self.scale_x, self.scale_y)
            * Mat3::translate(-pivot.x, -pivot.y)
    }

    /// Draws the half's region of `bitmap` between the shading hooks.
    pub(crate) fn draw(
        &self,
        canvas: &mut dyn Canvas,
        bitmap: &Bitmap,
        shading: Option<&dyn FoldShading>,
        pivot: Vec2,
        camera_depth: f32,
    ) {
        if !self.is_visible() || self.bitmap_bounds.is_empty() {
            return;
        }
        let bounds = self.bitmap_bounds;

        canvas.save();
        canvas.concat(self.transform(pivot, camera_depth));
        if let Some(shading) = shading {
            shading.on_pre_draw(canvas, bounds, self.local_rotation, self.gravity);
        }
        canvas.draw_bitmap(bitmap, bounds, Rect::from(bounds));
        if let Some(shading) = shading {
            shading.on_post_draw(canvas, bounds, self.local_rotation, self.gravity);
        }
        canvas.restore();
    }
}
