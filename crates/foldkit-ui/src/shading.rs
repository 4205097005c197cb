//! Overlays drawn on top of each fold half.
//!
//! A [`FoldShading`] is invoked twice per visible half and frame, with the
//! canvas already carrying the half's transform. `bounds` is the half's
//! sampled region in item coordinates, `rotation` the item's local fold angle
//! normalized into (−180, 180].

use foldkit_engine::canvas::Canvas;
use foldkit_engine::coords::{IRect, Rect};
use foldkit_engine::paint::{Bitmap, Color};

use crate::config::SHADOW_MAX_ALPHA;

/// Which half of the item a callback is for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Gravity {
    Top,
    Bottom,
}

/// Per-half pre/post overlay hooks.
pub trait FoldShading {
    /// Called before the half's bitmap region is drawn.
    fn on_pre_draw(&self, canvas: &mut dyn Canvas, bounds: IRect, rotation: f32, gravity: Gravity) {
        let _ = (canvas, bounds, rotation, gravity);
    }

    /// Called after the half's bitmap region is drawn.
    fn on_post_draw(&self, canvas: &mut dyn Canvas, bounds: IRect, rotation: f32, gravity: Gravity) {
        let _ = (canvas, bounds, rotation, gravity);
    }
}

/// Shadow intensity in `[0, 1)` for a half at the given local rotation.
///
/// Only the half that is actually rotating darkens: TOP on (−90, 0),
/// BOTTOM on (0, 90).
pub fn shadow_intensity(rotation: f32, gravity: Gravity) -> f32 {
    match gravity {
        Gravity::Top if rotation > -90.0 && rotation < 0.0 => -rotation / 90.0,
        Gravity::Bottom if rotation > 0.0 && rotation < 90.0 => rotation / 90.0,
        _ => 0.0,
    }
}

/// Shadow alpha for an intensity, scaled to `max_alpha`.
pub fn shadow_alpha(intensity: f32, max_alpha: u8) -> u8 {
    (max_alpha as f32 * intensity.clamp(0.0, 1.0)).round() as u8
}

// ── solid ────────────────────────────────────────────────────────────────

/// Darkens the rotating half with a translucent rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidShading {
    color: Color,
    max_alpha: u8,
}

impl SolidShading {
    pub fn new() -> Self {
        Self { color: Color::BLACK, max_alpha: SHADOW_MAX_ALPHA }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn max_alpha(mut self, alpha: u8) -> Self {
        self.max_alpha = alpha;
        self
    }

    fn draw_shadow(&self, canvas: &mut dyn Canvas, bounds: IRect, intensity: f32) {
        if intensity <= 0.0 || bounds.is_empty() {
            return;
        }
        let alpha = shadow_alpha(intensity, self.max_alpha);
        if alpha == 0 {
            return;
        }
        canvas.draw_rect(Rect::from(bounds), self.color.with_alpha_u8(alpha));
    }
}

impl Default for SolidShading {
    fn default() -> Self {
        Self::new()
    }
}

impl FoldShading for SolidShading {
    fn on_post_draw(&self, canvas: &mut dyn Canvas, bounds: IRect, rotation: f32, gravity: Gravity) {
        self.draw_shadow(canvas, bounds, shadow_intensity(rotation, gravity));
    }
}

// ── glance ───────────────────────────────────────────────────────────────

/// Shadow on the folding top half plus a highlight image sweeping down the
/// bottom half while it rotates.
#[derive(Debug)]
pub struct GlanceShading {
    shadow: SolidShading,
    glance: Bitmap,
}

impl GlanceShading {
    pub fn new(glance: Bitmap) -> Self {
        Self { shadow: SolidShading::new(), glance }
    }

    pub fn shadow(mut self, shadow: SolidShading) -> Self {
        self.shadow = shadow;
        self
    }

    pub fn glance(&self) -> &Bitmap {
        &self.glance
    }

    /// Where the whole glance image lands for a BOTTOM half at `rotation`.
    ///
    /// The image is scaled to the bounds' width and slides from above the
    /// half (at 0°) through it, its top edge crossing `bounds.top` at 60°.
    /// Returns `None` when nothing of it would be visible inside `bounds`.
    pub fn glance_placement(&self, bounds: IRect, rotation: f32, gravity: Gravity) -> Option<Rect> {
        if gravity != Gravity::Bottom || rotation <= 0.0 || rotation >= 90.0 {
            return None;
        }
        let (gw, gh) = (self.glance.width(), self.glance.height());
        if bounds.is_empty() || gw == 0 || gh == 0 {
            return None;
        }

        let aspect = gw as f32 / bounds.width() as f32;
        let distance = (bounds.height() as f32 * ((rotation - 60.0) / 15.0)) as i32;
        let scaled_height = (gh as f32 / aspect) as i32;

        let to = IRect::new(
            bounds.left,
            bounds.top + distance,
            bounds.right,
            bounds.top + distance + scaled_height,
        );
        to.intersect(bounds)?;
        Some(Rect::from(to))
    }
}

impl FoldShading for GlanceShading {
    fn on_post_draw(&self, canvas: &mut dyn Canvas, bounds: IRect, rotation: f32, gravity: Gravity) {
        if gravity == Gravity::Top {
            self.shadow.draw_shadow(canvas, bounds, shadow_intensity(rotation, gravity));
        }

        if let Some(dst) = self.glance_placement(bounds, rotation, gravity) {
            canvas.save();
            canvas.clip_rect(Rect::from(bounds));
            canvas.draw_bitmap(&self.glance, self.glance.bounds(), dst);
            canvas.restore();
        }
    }
}
