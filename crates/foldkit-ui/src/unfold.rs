//! Cover → details transition built on a two-item [`FoldList`].
//!
//! Item 0 holds the cover, placed in the lower half of a details-sized slot;
//! item 1 holds the details. As the list folds from 0° to 180° the whole list
//! is translated from the cover's screen position to the details' one, the
//! cover item grows to the details width and the details item rolls its seam
//! from the cover's bottom edge back to its own centerline.

use std::fmt;
use std::mem;
use std::rc::Rc;
use std::time::Duration;

use foldkit_engine::canvas::Canvas;
use foldkit_engine::coords::{IRect, Mat3, Rect, Vec2};
use foldkit_engine::input::PointerEvent;
use foldkit_engine::paint::BitmapAllocator;

use crate::config::{FoldConfig, UNFOLD_SCROLL_FACTOR};
use crate::event::EventResult;
use crate::item::FoldItem;
use crate::list::{FoldDecoration, FoldList};
use crate::provider::{ContentProvider, ContentView, ViewType};
use crate::shading::FoldShading;

// ── state ─────────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum UnfoldState {
    #[default]
    Folded,
    Unfolding,
    Unfolded,
    Folding,
}

impl UnfoldState {
    /// State after the fold angle moved from `last` to `angle`.
    pub fn next(self, last: f32, angle: f32) -> UnfoldState {
        let mut state = self;
        if angle > last {
            state = UnfoldState::Unfolding;
        }
        if angle < last {
            state = UnfoldState::Folding;
        }
        if angle == 180.0 {
            state = UnfoldState::Unfolded;
        }
        if angle == 0.0 && state == UnfoldState::Folding {
            state = UnfoldState::Folded;
        }
        state
    }
}

/// Transition callbacks. Every method defaults to a no-op.
pub trait FoldingListener {
    fn on_unfolding(&mut self) {}

    fn on_unfolded(&mut self) {}

    fn on_folding_back(&mut self) {}

    fn on_folded_back(&mut self) {}

    /// `progress` runs from 0 (cover only) to 1 (details only).
    fn on_fold_progress(&mut self, progress: f32) {
        let _ = progress;
    }
}

// ── geometry ──────────────────────────────────────────────────────────────

/// Screen rectangles of one transition and everything derived from them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UnfoldGeometry {
    cover: Rect,
    details: Rect,
    slot: (u32, u32),
    placement: Rect,
    squash: f32,
    scale: f32,
}

impl UnfoldGeometry {
    pub fn new(cover: Rect, details: Rect) -> Self {
        let slot = (
            details.width().round().max(0.0) as u32,
            details.height().round().max(0.0) as u32,
        );

        let half = (slot.1 / 2) as f32;
        let (cw, ch) = (cover.width().max(0.0), cover.height().max(0.0));
        let squash = if ch > half && ch > 0.0 { half / ch } else { 1.0 };
        let left = ((slot.0 as f32 - cw) * 0.5).floor();
        let placement = Rect::new(left, half, cw, ch * squash);

        let scale = details.width() / cover.width();
        let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };

        Self { cover, details, slot, placement, squash, scale }
    }

    #[inline]
    pub fn cover(&self) -> Rect {
        self.cover
    }

    #[inline]
    pub fn details(&self) -> Rect {
        self.details
    }

    /// Item size of both list items.
    #[inline]
    pub fn slot(&self) -> (u32, u32) {
        self.slot
    }

    /// Where the cover is drawn inside its item, after squashing.
    #[inline]
    pub fn cover_placement(&self) -> Rect {
        self.placement
    }

    /// Vertical factor applied to a cover taller than half the slot.
    #[inline]
    pub fn squash(&self) -> f32 {
        self.squash
    }

    /// Details width over cover width.
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// List offset from its details position at `stage = θ/180`.
    pub fn translation(&self, stage: f32) -> Vec2 {
        let (c, d) = (self.cover.center(), self.details.center());
        Vec2::new(
            (c.x - d.x) * (1.0 - stage),
            (self.cover.origin.y - d.y) * (1.0 - stage),
        )
    }

    pub fn cover_scale(&self, stage: f32) -> f32 {
        1.0 - (1.0 - self.scale) * stage
    }

    pub fn details_scale(&self, stage: f32) -> f32 {
        1.0 - (1.0 - 1.0 / self.scale) * (1.0 - stage)
    }

    /// Seam offset of the details item; it reaches the centerline halfway.
    pub fn details_rolling(&self, stage: f32) -> f32 {
        if stage >= 0.5 {
            return 0.0;
        }
        let dh = self.cover.height() * self.scale - 0.5 * self.details.height();
        dh * (1.0 - 2.0 * stage)
    }
}

// ── content ───────────────────────────────────────────────────────────────

/// Cover view positioned inside a details-sized item.
pub struct CoverHolder<V> {
    view: V,
    placement: Rect,
    squash: f32,
}

impl<V> CoverHolder<V> {
    pub fn new(view: V, geometry: &UnfoldGeometry) -> Self {
        Self {
            view,
            placement: geometry.placement,
            squash: geometry.squash,
        }
    }

    #[inline]
    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }
}

impl<V: ContentView> CoverHolder<V> {
    fn paint(&self, canvas: &mut dyn Canvas) {
        let Rect { origin, size } = self.placement;
        canvas.save();
        canvas.concat(Mat3::translate(origin.x, origin.y) * Mat3::scale(1.0, self.squash));
        self.view.paint(canvas, Rect::from_size(Vec2::new(size.x, size.y / self.squash)));
        canvas.restore();
    }
}

/// What a wrapper item displays.
pub enum UnfoldContent<V> {
    Cover(CoverHolder<V>),
    Details(V),
    /// Placeholder for a slot whose view is already on loan.
    Empty,
}

impl<V: ContentView> ContentView for UnfoldContent<V> {
    fn paint(&self, canvas: &mut dyn Canvas, rect: Rect) {
        match self {
            UnfoldContent::Cover(holder) => holder.paint(canvas),
            UnfoldContent::Details(view) => view.paint(canvas, rect),
            UnfoldContent::Empty => {}
        }
    }

    /// The cover is display-only; details receive events at rest.
    fn on_pointer(&mut self, event: &PointerEvent) -> EventResult {
        match self {
            UnfoldContent::Details(view) => view.on_pointer(event),
            _ => EventResult::Ignored,
        }
    }
}

/// Two-item provider lending the cover and details views to the list.
pub struct UnfoldProvider<V> {
    cover: Option<CoverHolder<V>>,
    details: Option<V>,
}

impl<V> UnfoldProvider<V> {
    fn new(cover: CoverHolder<V>, details: V) -> Self {
        Self { cover: Some(cover), details: Some(details) }
    }

    fn into_views(self) -> impl Iterator<Item = V> {
        self.cover.map(CoverHolder::into_view).into_iter().chain(self.details)
    }
}

impl<V: ContentView> ContentProvider for UnfoldProvider<V> {
    type View = UnfoldContent<V>;

    fn count(&self) -> usize {
        2
    }

    fn view_type(&self, _index: usize) -> ViewType {
        ViewType::Ignore
    }

    fn bind(&mut self, index: usize, _recycled: Option<Self::View>) -> Self::View {
        let content = match index {
            0 => self.cover.take().map(UnfoldContent::Cover),
            _ => self.details.take().map(UnfoldContent::Details),
        };
        content.unwrap_or(UnfoldContent::Empty)
    }

    fn release(&mut self, view: Self::View) {
        match view {
            UnfoldContent::Cover(holder) => self.cover = Some(holder),
            UnfoldContent::Details(view) => self.details = Some(view),
            UnfoldContent::Empty => {}
        }
    }
}

/// Applies the per-item scale and rolling of the active transition.
#[derive(Debug, Default)]
pub struct UnfoldDecoration {
    geometry: Option<UnfoldGeometry>,
}

impl UnfoldDecoration {
    #[inline]
    pub fn geometry(&self) -> Option<&UnfoldGeometry> {
        self.geometry.as_ref()
    }
}

impl<V> FoldDecoration<UnfoldContent<V>> for UnfoldDecoration {
    fn decorate(&mut self, item: &mut FoldItem<UnfoldContent<V>>, position: usize, angle: f32) {
        let Some(g) = self.geometry.as_ref() else {
            return;
        };
        let stage = angle / 180.0;
        if position == 0 {
            item.set_scale(g.cover_scale(stage));
            item.set_scale_factor_y(1.0 / g.squash);
            item.set_visible_bounds(Some(g.placement.round_out()));
        } else {
            item.set_scale(g.details_scale(stage));
            item.set_rolling_distance(g.details_rolling(stage));
        }
    }
}

pub type UnfoldList<V> = FoldList<UnfoldProvider<V>, UnfoldDecoration>;

struct PendingUnfold<V> {
    cover: V,
    cover_rect: Rect,
    details: V,
    details_rect: Rect,
}

// ── wrapper ───────────────────────────────────────────────────────────────

/// Unfolds a cover rectangle into a details rectangle and folds it back.
///
/// Rectangles and pointer events are in host (screen) coordinates. Views
/// handed to [`unfold`](Self::unfold) come back through
/// [`take_returned_views`](Self::take_returned_views) once folded back.
pub struct UnfoldWrapper<V: ContentView> {
    list: UnfoldList<V>,
    state: UnfoldState,
    last_angle: f32,
    seen_generation: u64,
    scheduled: Option<PendingUnfold<V>>,
    reopen_pending: bool,
    returned: Vec<V>,
    listener: Option<Box<dyn FoldingListener>>,
}

impl<V: ContentView> UnfoldWrapper<V> {
    pub fn new() -> Self {
        Self::with_config(FoldConfig::default().scroll_factor(UNFOLD_SCROLL_FACTOR))
    }

    pub fn with_config(config: FoldConfig) -> Self {
        let list = FoldList::with_decoration(config, UnfoldDecoration::default());
        Self {
            seen_generation: list.angle_generation(),
            list,
            state: UnfoldState::Folded,
            last_angle: 0.0,
            scheduled: None,
            reopen_pending: false,
            returned: Vec::new(),
            listener: None,
        }
    }

    pub fn set_folding_listener(&mut self, listener: impl FoldingListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn set_on_fold_rotation(&mut self, f: impl FnMut(f32, bool) + 'static) {
        self.list.set_on_fold_rotation(f);
    }

    pub fn set_shading(&mut self, shading: Option<Rc<dyn FoldShading>>) {
        self.list.set_shading(shading);
    }

    pub fn set_bitmap_allocator(&mut self, allocator: Rc<dyn BitmapAllocator>) {
        self.list.set_bitmap_allocator(allocator);
    }

    pub fn set_gestures_enabled(&mut self, enabled: bool) {
        self.list.set_gestures_enabled(enabled);
    }

    #[inline]
    pub fn list(&self) -> &UnfoldList<V> {
        &self.list
    }

    #[inline]
    pub fn state(&self) -> UnfoldState {
        self.state
    }

    #[inline]
    pub fn is_unfolding(&self) -> bool {
        self.state == UnfoldState::Unfolding
    }

    #[inline]
    pub fn is_unfolded(&self) -> bool {
        self.state == UnfoldState::Unfolded
    }

    #[inline]
    pub fn is_folding_back(&self) -> bool {
        self.state == UnfoldState::Folding
    }

    /// Whether a cover/details pair is currently installed.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.list.content_provider().is_some()
    }

    #[inline]
    pub fn geometry(&self) -> Option<&UnfoldGeometry> {
        self.list.decoration().geometry()
    }

    /// Transition progress, 0 (cover) to 1 (details).
    pub fn progress(&self) -> f32 {
        self.list.angle() / 180.0
    }

    /// Views released after folding back, in cover, details order per transition.
    pub fn take_returned_views(&mut self) -> Vec<V> {
        mem::take(&mut self.returned)
    }

    // ── transitions ───────────────────────────────────────────────────────

    /// Starts unfolding `cover` (at `cover_rect`) into `details` (at `details_rect`).
    ///
    /// While another transition is installed the pair is scheduled instead:
    /// the current one folds back and the new one opens a frame after.
    pub fn unfold(&mut self, cover: V, cover_rect: Rect, details: V, details_rect: Rect) {
        if self.is_active() {
            let pending = PendingUnfold { cover, cover_rect, details, details_rect };
            if let Some(previous) = self.scheduled.replace(pending) {
                self.returned.extend([previous.cover, previous.details]);
            }
            log::debug!("unfold scheduled after the current transition folds back");
            self.fold_back();
            return;
        }

        let geometry = UnfoldGeometry::new(cover_rect, details_rect);
        let holder = CoverHolder::new(cover, &geometry);
        let (w, h) = geometry.slot();

        self.list.decoration_mut().geometry = Some(geometry);
        self.list.set_size(w, h);
        self.list.set_content_provider(UnfoldProvider::new(holder, details));
        self.last_angle = self.list.angle();
        log::debug!("unfolding {cover_rect:?} into {details_rect:?}");

        self.set_state(UnfoldState::Unfolding);
        self.list.scroll_to_position(1);
        self.sync();
    }

    /// Continues unfolding the installed pair, e.g. after a partial fold back.
    pub fn resume_unfold(&mut self) {
        if self.is_active() {
            self.list.scroll_to_position(1);
        }
    }

    pub fn fold_back(&mut self) {
        if !self.is_active() {
            return;
        }
        self.list.scroll_to_position(0);
        if self.state != UnfoldState::Folded {
            self.set_state(UnfoldState::Folding);
        }
        self.sync();
    }

    // ── frame / input ─────────────────────────────────────────────────────

    /// Advances the transition; returns `true` when anything moved.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let reopened = self.reopen_scheduled();
        let moved = self.list.tick(dt);
        self.sync();
        reopened || moved
    }

    pub fn wants_frame(&self) -> Option<Duration> {
        if self.reopen_pending {
            return Some(self.list.config().frame_fallback_delay);
        }
        self.list.wants_frame()
    }

    #[inline]
    pub fn needs_redraw(&self) -> bool {
        self.list.needs_redraw()
    }

    pub fn take_redraw(&mut self) -> bool {
        self.list.take_redraw()
    }

    /// Pointer events in host coordinates.
    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> EventResult {
        let Some(origin) = self.geometry().map(|g| g.details().origin) else {
            return EventResult::Ignored;
        };
        let result = self.list.on_pointer_event(&event.offset(-origin));
        self.sync();
        result
    }

    #[inline]
    pub fn handles_pointer(&self) -> bool {
        self.is_active() && self.list.handles_pointer()
    }

    /// Draws the transition in host coordinates.
    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        let Some(origin) = self.geometry().map(|g| g.details().origin) else {
            self.list.take_redraw();
            return;
        };
        canvas.save();
        canvas.translate(origin.x, origin.y);
        self.list.draw(canvas);
        canvas.restore();
    }

    /// Stops everything and returns all held views; no callbacks until re-attached.
    pub fn detach(&mut self) {
        self.list.detach();
        if let Some(provider) = self.list.take_content_provider() {
            self.returned.extend(provider.into_views());
        }
        if let Some(pending) = self.scheduled.take() {
            self.returned.extend([pending.cover, pending.details]);
        }
        self.list.decoration_mut().geometry = None;
        self.list.set_translation(Vec2::zero());
        self.reopen_pending = false;
        self.state = UnfoldState::Folded;
        self.last_angle = 0.0;
        self.seen_generation = self.list.angle_generation();
    }

    pub fn attach(&mut self) {
        self.list.attach();
        self.seen_generation = self.list.angle_generation();
    }

    // ── internals ─────────────────────────────────────────────────────────

    /// Follows list angle updates made since the last call.
    fn sync(&mut self) {
        let generation = self.list.angle_generation();
        if generation == self.seen_generation {
            return;
        }
        self.seen_generation = generation;

        let Some(geometry) = self.geometry().copied() else {
            return;
        };
        let angle = self.list.angle();
        let stage = angle / 180.0;
        self.list.set_translation(geometry.translation(stage));

        let last = mem::replace(&mut self.last_angle, angle);
        if let Some(listener) = self.listener.as_mut() {
            listener.on_fold_progress(stage);
        }
        self.set_state(self.state.next(last, angle));
    }

    fn set_state(&mut self, state: UnfoldState) {
        if self.state == state {
            return;
        }
        log::debug!("unfold state {:?} -> {state:?}", self.state);
        self.state = state;

        if state == UnfoldState::Folded {
            self.on_folded_back();
        }
        if let Some(listener) = self.listener.as_mut() {
            match state {
                UnfoldState::Unfolding => listener.on_unfolding(),
                UnfoldState::Unfolded => listener.on_unfolded(),
                UnfoldState::Folding => listener.on_folding_back(),
                UnfoldState::Folded => listener.on_folded_back(),
            }
        }
    }

    fn on_folded_back(&mut self) {
        if let Some(provider) = self.list.take_content_provider() {
            self.returned.extend(provider.into_views());
        }
        self.list.decoration_mut().geometry = None;
        self.list.set_translation(Vec2::zero());
        self.last_angle = 0.0;
        self.seen_generation = self.list.angle_generation();
        self.reopen_pending = self.scheduled.is_some();
    }

    fn reopen_scheduled(&mut self) -> bool {
        if !mem::take(&mut self.reopen_pending) {
            return false;
        }
        let Some(pending) = self.scheduled.take() else {
            return false;
        };
        self.unfold(pending.cover, pending.cover_rect, pending.details, pending.details_rect);
        true
    }
}

impl<V: ContentView> Default for UnfoldWrapper<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ContentView> fmt::Debug for UnfoldWrapper<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnfoldWrapper")
            .field("state", &self.state)
            .field("angle", &self.list.angle())
            .field("geometry", &self.geometry())
            .field("scheduled", &self.scheduled.is_some())
            .field("returned", &self.returned.len())
            .finish_non_exhaustive()
    }
}
