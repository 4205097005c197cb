use std::fmt;
use std::rc::Rc;

use foldkit_engine::canvas::{Canvas, RasterCanvas};
use foldkit_engine::coords::{IRect, Mat3, Rect, Vec2};
use foldkit_engine::input::PointerEvent;
use foldkit_engine::paint::{Bitmap, BitmapAllocator, Color, HeapAllocator};

use crate::config::FoldConfig;
use crate::event::EventResult;
use crate::half::{normalize_rotation, FoldHalf};
use crate::provider::ContentView;
use crate::shading::{FoldShading, Gravity};

/// The fold primitive: one content rectangle split into two halves.
///
/// At rest (`fold_rotation == 0`) the content is drawn directly. While
/// folding, the content is captured into an offscreen bitmap every frame and
/// each half draws its part of that bitmap with its own transform.
///
/// Setters are idempotent: repeating a call with the same arguments leaves
/// the item unchanged apart from the redraw request.
pub struct FoldItem<V> {
    content: Option<V>,
    width: u32,
    height: u32,

    capture: Option<Bitmap>,
    capture_failed: bool,
    allocator: Rc<dyn BitmapAllocator>,

    in_transformation: bool,
    fold_rotation: f32,
    scale: f32,
    scale_factor: f32,
    scale_factor_y: f32,
    rolling_distance: f32,
    auto_scale: bool,
    auto_fit_factor: f32,
    camera_depth: f32,
    visible_bounds: Option<IRect>,
    shading: Option<Rc<dyn FoldShading>>,

    halves: [FoldHalf; 2],
    redraw: bool,
}

impl<V> FoldItem<V> {
    pub fn new(config: &FoldConfig) -> Self {
        let mut item = Self {
            content: None,
            width: 0,
            height: 0,
            capture: None,
            capture_failed: false,
            allocator: Rc::new(HeapAllocator),
            in_transformation: true,
            fold_rotation: 0.0,
            scale: 1.0,
            scale_factor: 1.0,
            scale_factor_y: 1.0,
            rolling_distance: 0.0,
            auto_scale: false,
            auto_fit_factor: config.auto_fit_factor(),
            camera_depth: config.camera_depth(),
            visible_bounds: None,
            shading: None,
            halves: [FoldHalf::new(Gravity::Top), FoldHalf::new(Gravity::Bottom)],
            redraw: true,
        };
        item.set_in_transformation(false);
        item.update_halves();
        item
    }

    // ── content ───────────────────────────────────────────────────────────

    /// Sets the captured content, returning the previous one.
    pub fn attach_content(&mut self, view: V) -> Option<V> {
        self.redraw = true;
        self.content.replace(view)
    }

    pub fn detach_content(&mut self) -> Option<V> {
        self.redraw = true;
        self.content.take()
    }

    pub fn content(&self) -> Option<&V> {
        self.content.as_ref()
    }

    // ── geometry ──────────────────────────────────────────────────────────

    /// Sets the content rectangle size. A size change drops the capture.
    pub fn set_size(&mut self, width: u32, height: u32) {
        if (self.width, self.height) == (width, height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.release_capture();
        self.update_scale_factor();
        self.update_halves();
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Item center, the pivot of every half transform.
    #[inline]
    pub fn pivot(&self) -> Vec2 {
        Vec2::new(self.width as f32 * 0.5, self.height as f32 * 0.5)
    }

    // ── fold state ────────────────────────────────────────────────────────

    /// Sets the fold rotation in degrees (normalized into (−180, 180]).
    pub fn set_fold_rotation(&mut self, rotation: f32) {
        let rotation = normalize_rotation(rotation);
        self.fold_rotation = rotation;
        for half in &mut self.halves {
            half.apply_fold_rotation(rotation);
        }
        self.set_in_transformation(rotation != 0.0);
        self.update_scale_factor();
        self.update_halves();
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale.max(0.0);
        self.update_halves();
    }

    /// Vertical pre-stretch applied on top of `scale`.
    pub fn set_scale_factor_y(&mut self, scale_factor_y: f32) {
        if scale_factor_y > 0.0 && scale_factor_y.is_finite() {
            self.scale_factor_y = scale_factor_y;
            self.update_halves();
        }
    }

    /// Slides both halves by `distance` while keeping their seam together.
    pub fn set_rolling_distance(&mut self, distance: f32) {
        self.rolling_distance = if distance.is_finite() { distance } else { 0.0 };
        self.update_halves();
    }

    pub fn set_auto_scale_enabled(&mut self, enabled: bool) {
        self.auto_scale = enabled;
        self.update_scale_factor();
        self.update_halves();
    }

    /// Restricts what the halves sample to `bounds` (item coordinates).
    pub fn set_visible_bounds(&mut self, bounds: Option<IRect>) {
        self.visible_bounds = bounds;
        self.update_halves();
    }

    pub fn set_shading(&mut self, shading: Option<Rc<dyn FoldShading>>) {
        self.shading = shading;
        self.redraw = true;
    }

    pub fn set_bitmap_allocator(&mut self, allocator: Rc<dyn BitmapAllocator>) {
        self.allocator = allocator;
        self.capture_failed = false;
    }

    /// Picks up camera settings from `config`.
    pub fn apply_config(&mut self, config: &FoldConfig) {
        self.auto_fit_factor = config.auto_fit_factor();
        self.camera_depth = config.camera_depth();
        self.update_scale_factor();
        self.update_halves();
    }

    /// Clears per-binding transforms before the item shell is reused.
    pub(crate) fn reset_binding(&mut self) {
        self.scale = 1.0;
        self.scale_factor_y = 1.0;
        self.rolling_distance = 0.0;
        self.visible_bounds = None;
        self.update_halves();
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn fold_rotation(&self) -> f32 {
        self.fold_rotation
    }

    #[inline]
    pub fn in_transformation(&self) -> bool {
        self.in_transformation
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Auto-fit shrink, `1.0` unless auto-scale is on and the item is folding.
    #[inline]
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    #[inline]
    pub fn scale_factor_y(&self) -> f32 {
        self.scale_factor_y
    }

    #[inline]
    pub fn rolling_distance(&self) -> f32 {
        self.rolling_distance
    }

    #[inline]
    pub fn is_auto_scale_enabled(&self) -> bool {
        self.auto_scale
    }

    #[inline]
    pub fn visible_bounds(&self) -> Option<IRect> {
        self.visible_bounds
    }

    #[inline]
    pub fn top(&self) -> &FoldHalf {
        &self.halves[0]
    }

    #[inline]
    pub fn bottom(&self) -> &FoldHalf {
        &self.halves[1]
    }

    pub fn half(&self, gravity: Gravity) -> &FoldHalf {
        match gravity {
            Gravity::Top => self.top(),
            Gravity::Bottom => self.bottom(),
        }
    }

    /// Whether an offscreen capture is currently held.
    #[inline]
    pub fn has_capture(&self) -> bool {
        self.capture.is_some()
    }

    #[inline]
    pub fn needs_redraw(&self) -> bool {
        self.redraw
    }

    /// Returns and clears the redraw request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    /// Frees the capture bitmap; the next folding frame allocates a new one.
    pub fn release_capture(&mut self) {
        if self.capture.take().is_some() {
            log::debug!("released {}x{} capture", self.width, self.height);
        }
        self.capture_failed = false;
    }

    /// Drops the capture and hands back the content.
    pub fn detach(&mut self) -> Option<V> {
        self.release_capture();
        self.detach_content()
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn set_in_transformation(&mut self, in_transformation: bool) {
        if self.in_transformation == in_transformation {
            return;
        }
        self.in_transformation = in_transformation;
        for half in &mut self.halves {
            half.set_external_visible(in_transformation);
        }
        self.redraw = true;
    }

    /// Auto-fit: a tilted half projects wider than the item, shrink to compensate.
    fn update_scale_factor(&mut self) {
        self.scale_factor = 1.0;
        if self.auto_scale && self.width > 0 {
            let w = self.width as f32;
            let sin = self.fold_rotation.to_radians().sin().abs();
            let dw = self.height as f32 * sin * self.auto_fit_factor;
            self.scale_factor = w / (w + dw);
        }
    }

    fn update_halves(&mut self) {
        let scale_x = self.scale * self.scale_factor;
        let scale_y = scale_x * self.scale_factor_y;
        let translation_y = (self.rolling_distance * scale_y).round();

        let h = (self.height / 2) as f32;
        let top_clipping = if h == 0.0 {
            0.5
        } else {
            (0.5 * (h - self.rolling_distance) / h).clamp(0.0, 1.0)
        };

        for half in &mut self.halves {
            half.set_scale(scale_x, scale_y);
            half.apply_rolling(translation_y, top_clipping);
            half.compute_bounds(self.width, self.height, self.visible_bounds);
        }
        self.redraw = true;
    }

    /// Makes sure a capture of the current size exists.
    fn ensure_capture(&mut self) -> bool {
        let (w, h) = (self.width, self.height);
        if w == 0 || h == 0 {
            self.capture = None;
            return false;
        }
        if self.capture.as_ref().is_some_and(|b| b.has_size(w, h)) {
            return true;
        }
        self.capture = None;
        if self.capture_failed {
            return false;
        }
        match self.allocator.allocate(w, h) {
            Ok(bitmap) => {
                self.capture = Some(bitmap);
                true
            }
            Err(err) => {
                log::warn!("fold capture unavailable ({err}); drawing {w}x{h} content unfolded");
                self.capture_failed = true;
                false
            }
        }
    }

    fn direct_transform(&self) -> Mat3 {
        let scale_x = self.scale * self.scale_factor;
        let pivot = self.pivot();
        Mat3::translate(pivot.x, pivot.y)
            * Mat3::scale(scale_x, scale_x * self.scale_factor_y)
            * Mat3::translate(-pivot.x, -pivot.y)
    }
}

impl<V: ContentView> FoldItem<V> {
    /// Draws the item in its own coordinates (origin at the content's top-left).
    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        self.redraw = false;
        if self.content.is_none() {
            return;
        }
        let folded = self.in_transformation && self.ensure_capture();
        let rect = Rect::new(0.0, 0.0, self.width as f32, self.height as f32);
        let pivot = self.pivot();

        if folded {
            let (Some(content), Some(capture)) = (self.content.as_ref(), self.capture.as_mut()) else {
                return;
            };
            capture.clear(Color::TRANSPARENT);
            content.paint(&mut RasterCanvas::new(capture), rect);

            let shading = self.shading.as_deref();
            for half in &self.halves {
                half.draw(canvas, capture, shading, pivot, self.camera_depth);
            }
        } else if let Some(content) = self.content.as_ref() {
            let transform = self.direct_transform();
            canvas.save();
            if !transform.is_identity() {
                canvas.concat(transform);
            }
            content.paint(canvas, rect);
            canvas.restore();
        }
    }

    /// Offers a pointer event (item coordinates) to the content.
    ///
    /// Content is not interactive while the item is folding.
    pub fn on_pointer(&mut self, event: &PointerEvent) -> EventResult {
        if self.in_transformation {
            return EventResult::Ignored;
        }
        match self.content.as_mut() {
            Some(content) => content.on_pointer(event),
            None => EventResult::Ignored,
        }
    }
}

impl<V> fmt::Debug for FoldItem<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FoldItem")
            .field("size", &(self.width, self.height))
            .field("has_content", &self.content.is_some())
            .field("has_capture", &self.capture.is_some())
            .field("fold_rotation", &self.fold_rotation)
            .field("scale", &self.scale)
            .field("scale_factor", &self.scale_factor)
            .field("scale_factor_y", &self.scale_factor_y)
            .field("rolling_distance", &self.rolling_distance)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use foldkit_engine::canvas::{DrawCmd, DrawList};
    use foldkit_engine::paint::BudgetAllocator;

    use super::*;

    struct Solid(Color);

    impl ContentView for Solid {
        fn paint(&self, canvas: &mut dyn Canvas, rect: Rect) {
            canvas.draw_rect(rect, self.0);
        }
    }

    struct Touchable(Cell<u32>);

    impl ContentView for Touchable {
        fn paint(&self, _canvas: &mut dyn Canvas, _rect: Rect) {}

        fn on_pointer(&mut self, _event: &PointerEvent) -> EventResult {
            self.0.set(self.0.get() + 1);
            EventResult::Consumed
        }
    }

    fn item(w: u32, h: u32) -> FoldItem<Solid> {
        let mut item = FoldItem::new(&FoldConfig::default());
        item.set_size(w, h);
        item.attach_content(Solid(Color::WHITE));
        item
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    // ── transformation state ──────────────────────────────────────────────

    #[test]
    fn rest_draws_content_directly() {
        let mut item = item(100, 100);
        let mut list = DrawList::new();
        item.draw(&mut list);
        assert_eq!(list.len(), 1);
        assert!(matches!(list.items()[0].cmd, DrawCmd::Rect { .. }));
        assert!(!item.has_capture());
        assert!(!item.top().is_visible());
    }

    #[test]
    fn folding_draws_halves_from_capture() {
        let mut item = item(100, 100);
        item.set_fold_rotation(30.0);
        assert!(item.in_transformation());

        let mut list = DrawList::new();
        item.draw(&mut list);
        assert!(item.has_capture());
        let bitmaps: Vec<_> = list
            .items()
            .iter()
            .filter_map(|i| match i.cmd {
                DrawCmd::Bitmap { src, .. } => Some(src),
                _ => None,
            })
            .collect();
        assert_eq!(bitmaps, vec![IRect::new(0, 0, 100, 50), IRect::new(0, 50, 100, 100)]);
    }

    #[test]
    fn capture_kept_at_rest_and_released_on_resize() {
        let mut item = item(40, 40);
        item.set_fold_rotation(10.0);
        item.draw(&mut DrawList::new());
        item.set_fold_rotation(0.0);
        assert!(item.has_capture());
        assert!(!item.in_transformation());

        item.set_size(40, 80);
        assert!(!item.has_capture());
    }

    #[test]
    fn detach_releases_capture_and_content() {
        let mut item = item(40, 40);
        item.set_fold_rotation(10.0);
        item.draw(&mut DrawList::new());
        assert!(item.detach().is_some());
        assert!(!item.has_capture());
        assert!(item.content().is_none());
    }

    #[test]
    fn allocation_failure_falls_back_to_direct_draw() {
        let mut item = item(100, 100);
        item.set_bitmap_allocator(Rc::new(BudgetAllocator::new(10)));
        item.set_fold_rotation(45.0);

        let mut list = DrawList::new();
        item.draw(&mut list);
        assert!(!item.has_capture());
        assert_eq!(list.len(), 1);
        assert!(matches!(list.items()[0].cmd, DrawCmd::Rect { .. }));
    }

    #[test]
    fn zero_size_never_captures() {
        let mut item = item(0, 100);
        item.set_fold_rotation(45.0);
        item.draw(&mut DrawList::new());
        assert!(!item.has_capture());
    }

    #[test]
    fn rotation_is_normalized() {
        let mut item = item(10, 10);
        item.set_fold_rotation(-180.0);
        assert_eq!(item.fold_rotation(), 180.0);
        item.set_fold_rotation(360.0);
        assert_eq!(item.fold_rotation(), 0.0);
        assert!(!item.in_transformation());
    }

    // ── scale / rolling ───────────────────────────────────────────────────

    #[test]
    fn auto_fit_at_ninety_degrees() {
        let mut item = item(400, 800);
        item.set_auto_scale_enabled(true);
        item.set_fold_rotation(90.0);
        assert!(approx(item.scale_factor(), 400.0 / (400.0 + 800.0 * 8.0 / 48.0)));
        assert!(approx(item.top().scale().x, item.scale_factor()));

        item.set_fold_rotation(0.0);
        assert_eq!(item.scale_factor(), 1.0);
    }

    #[test]
    fn auto_fit_off_keeps_unit_factor() {
        let mut item = item(400, 800);
        item.set_fold_rotation(90.0);
        assert_eq!(item.scale_factor(), 1.0);
    }

    #[test]
    fn rolling_distance_moves_seam_with_halves() {
        let mut item = item(200, 200);
        item.set_rolling_distance(50.0);
        let (top, bottom) = (item.top(), item.bottom());
        assert!(approx(top.clipping_factor() + bottom.clipping_factor(), 1.0));
        assert_eq!(top.translation_y(), 50.0);
        assert_eq!(bottom.translation_y(), 50.0);
        // seam row plus translation stays on the centerline
        assert_eq!(top.bitmap_bounds().bottom, 50);
        assert_eq!(bottom.bitmap_bounds().top, 50);
    }

    #[test]
    fn rolling_translation_follows_scale() {
        let mut item = item(200, 200);
        item.set_scale(0.5);
        item.set_scale_factor_y(3.0);
        item.set_rolling_distance(-25.0);
        assert_eq!(item.top().translation_y(), (-25.0f32 * 1.5).round());
        assert_eq!(item.bottom().scale(), Vec2::new(0.5, 1.5));
    }

    #[test]
    fn visible_bounds_restrict_halves() {
        let mut item = item(200, 200);
        item.set_visible_bounds(Some(IRect::new(50, 100, 150, 160)));
        assert!(item.top().bitmap_bounds().is_empty());
        assert_eq!(item.bottom().bitmap_bounds(), IRect::new(50, 100, 150, 160));
    }

    // ── input ─────────────────────────────────────────────────────────────

    #[test]
    fn touches_gated_while_folding() {
        let mut item = FoldItem::new(&FoldConfig::default());
        item.set_size(10, 10);
        item.attach_content(Touchable(Cell::new(0)));
        let ev = PointerEvent::down(1.0, 1.0, 0);

        assert!(item.on_pointer(&ev).is_consumed());
        item.set_fold_rotation(5.0);
        assert_eq!(item.on_pointer(&ev), EventResult::Ignored);
        assert_eq!(item.content().map(|c| c.0.get()), Some(1));
    }
}
