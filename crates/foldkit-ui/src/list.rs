use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use foldkit_engine::canvas::Canvas;
use foldkit_engine::coords::Vec2;
use foldkit_engine::input::PointerEvent;
use foldkit_engine::paint::{BitmapAllocator, HeapAllocator};

use crate::animation::Motion;
use crate::config::{FoldConfig, MIN_RECYCLE_DISTANCE};
use crate::event::EventResult;
use crate::gesture::{GestureAction, GestureFold};
use crate::item::FoldItem;
use crate::provider::{ContentProvider, ViewType};
use crate::recycler::Recycler;
use crate::shading::{FoldShading, SolidShading};

/// Per-item hook run after every angle update, once for each bound visible
/// item, with the item's position and the list angle.
///
/// Wrappers use it to scale or roll items as the list folds.
pub trait FoldDecoration<V> {
    fn decorate(&mut self, item: &mut FoldItem<V>, position: usize, angle: f32) {
        let _ = (item, position, angle);
    }
}

impl<V> FoldDecoration<V> for () {}

/// Paged list that scrolls between items by folding one out and the next in.
///
/// The continuous fold angle `θ ∈ [0, 180·(N−1)]` selects the visible pair:
/// `first = ⌊θ/180⌋` folds at `θ mod 180` while `first + 1` folds at
/// `θ mod 180 − 180`. Only those two items are drawn, back one first.
///
/// # Example
/// ```rust,ignore
/// let mut list: FoldList<Cards> = FoldList::new();
/// list.set_size(360, 640);
/// list.set_content_provider(Cards::new(20));
/// list.set_on_fold_rotation(|angle, from_user| log::info!("{angle} {from_user}"));
///
/// // per host frame:
/// for ev in pointer_events { list.on_pointer_event(&ev); }
/// list.tick(frame.dt);
/// list.draw(&mut canvas);
/// ```
pub struct FoldList<P: ContentProvider, D = ()> {
    config: FoldConfig,
    provider: Option<P>,
    count: usize,
    angle: f32,
    max_angle: f32,
    generation: u64,

    width: u32,
    height: u32,
    translation: Vec2,

    shading: Option<Rc<dyn FoldShading>>,
    auto_scale: bool,
    allocator: Rc<dyn BitmapAllocator>,

    bound: BTreeMap<usize, FoldItem<P::View>>,
    pool: VecDeque<FoldItem<P::View>>,
    recycler: Recycler<P::View>,
    front: Option<usize>,
    back: Option<usize>,

    gesture: GestureFold,
    gestures_enabled: bool,
    decoration: D,
    on_fold_rotation: Option<Box<dyn FnMut(f32, bool)>>,

    attached: bool,
    redraw: bool,
}

impl<P: ContentProvider> FoldList<P> {
    pub fn new() -> Self {
        Self::with_config(FoldConfig::default())
    }

    pub fn with_config(config: FoldConfig) -> Self {
        Self::with_decoration(config, ())
    }
}

impl<P: ContentProvider> Default for FoldList<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ContentProvider, D: FoldDecoration<P::View>> FoldList<P, D> {
    pub fn with_decoration(config: FoldConfig, decoration: D) -> Self {
        Self {
            gesture: GestureFold::new(&config),
            config,
            provider: None,
            count: 0,
            angle: 0.0,
            max_angle: 0.0,
            generation: 0,
            width: 0,
            height: 0,
            translation: Vec2::zero(),
            shading: Some(Rc::new(SolidShading::new())),
            auto_scale: false,
            allocator: Rc::new(HeapAllocator),
            bound: BTreeMap::new(),
            pool: VecDeque::new(),
            recycler: Recycler::new(),
            front: None,
            back: None,
            gestures_enabled: true,
            decoration,
            on_fold_rotation: None,
            attached: true,
            redraw: true,
        }
    }

    // ── configuration ─────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &FoldConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: FoldConfig) {
        self.gesture.apply_config(&config);
        for item in self.bound.values_mut().chain(self.pool.iter_mut()) {
            item.apply_config(&config);
        }
        self.config = config;
        self.redraw = true;
    }

    /// Degrees of fold per list height of drag, divided by 180.
    pub fn set_scroll_factor(&mut self, factor: f32) {
        self.config.scroll_factor = factor;
        self.gesture.set_scroll_factor(factor);
    }

    /// Shading for every item; `None` draws plain halves.
    pub fn set_shading(&mut self, shading: Option<Rc<dyn FoldShading>>) {
        for item in self.bound.values_mut().chain(self.pool.iter_mut()) {
            item.set_shading(shading.clone());
        }
        self.shading = shading;
        self.redraw = true;
    }

    pub fn set_auto_scale_enabled(&mut self, enabled: bool) {
        self.auto_scale = enabled;
        for item in self.bound.values_mut().chain(self.pool.iter_mut()) {
            item.set_auto_scale_enabled(enabled);
        }
        self.redraw = true;
    }

    pub fn set_bitmap_allocator(&mut self, allocator: Rc<dyn BitmapAllocator>) {
        for item in self.bound.values_mut().chain(self.pool.iter_mut()) {
            item.set_bitmap_allocator(allocator.clone());
        }
        self.allocator = allocator;
    }

    /// When disabled the list ignores drags and flings; content still gets events.
    pub fn set_gestures_enabled(&mut self, enabled: bool) {
        self.gestures_enabled = enabled;
    }

    #[inline]
    pub fn gestures_enabled(&self) -> bool {
        self.gestures_enabled
    }

    /// Listener called with `(angle, from_user)` after every angle update.
    ///
    /// A resize re-lays out the bound items at the same angle without calling it.
    pub fn set_on_fold_rotation(&mut self, f: impl FnMut(f32, bool) + 'static) {
        self.on_fold_rotation = Some(Box::new(f));
    }

    pub fn clear_on_fold_rotation(&mut self) {
        self.on_fold_rotation = None;
    }

    #[inline]
    pub fn decoration(&self) -> &D {
        &self.decoration
    }

    #[inline]
    pub fn decoration_mut(&mut self) -> &mut D {
        &mut self.decoration
    }

    // ── layout ────────────────────────────────────────────────────────────

    /// Size of every item, normally the list's own size.
    pub fn set_size(&mut self, width: u32, height: u32) {
        if (self.width, self.height) == (width, height) {
            return;
        }
        self.width = width;
        self.height = height;
        for item in self.bound.values_mut().chain(self.pool.iter_mut()) {
            item.set_size(width, height);
        }
        self.place(self.angle);
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Offset applied to everything the list draws.
    ///
    /// Pointer events stay in untranslated list coordinates.
    pub fn set_translation(&mut self, translation: Vec2) {
        if self.translation != translation {
            self.translation = translation;
            self.redraw = true;
        }
    }

    #[inline]
    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    // ── content ───────────────────────────────────────────────────────────

    /// Installs a provider, returning the previous one with all its views
    /// handed back through [`ContentProvider::release`].
    pub fn set_content_provider(&mut self, provider: P) -> Option<P> {
        let previous = self.take_provider();
        self.provider = Some(provider);
        self.update_data();
        previous
    }

    /// Removes the provider; the list becomes empty.
    pub fn take_content_provider(&mut self) -> Option<P> {
        let previous = self.take_provider();
        self.update_data();
        previous
    }

    #[inline]
    pub fn content_provider(&self) -> Option<&P> {
        self.provider.as_ref()
    }

    /// Mutable provider access. Call [`notify_data_changed`](Self::notify_data_changed)
    /// after changing what it supplies.
    #[inline]
    pub fn content_provider_mut(&mut self) -> Option<&mut P> {
        self.provider.as_mut()
    }

    /// Item count as last read from the provider.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Rebinds everything after the provider's data changed.
    pub fn notify_data_changed(&mut self) {
        self.free_all();
        self.clear_recycled();
        self.update_data();
    }

    // ── angle ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Largest reachable angle, `180·(N−1)`, or 0 when empty.
    #[inline]
    pub fn max_angle(&self) -> f32 {
        self.max_angle
    }

    /// Bumped on every angle update, including unchanged ones.
    #[inline]
    pub fn angle_generation(&self) -> u64 {
        self.generation
    }

    /// Sets the fold angle, clamped to `[0, 180·(N−1)]`.
    ///
    /// User-driven updates cancel any running tween or fling first.
    pub fn set_angle(&mut self, angle: f32, from_user: bool) {
        if from_user {
            self.gesture.cancel_motion();
        }
        self.apply_angle(angle, from_user);
    }

    /// Nearest item index, `round(θ / 180)`.
    pub fn position(&self) -> usize {
        ((self.angle + 90.0) / 180.0).floor() as usize
    }

    /// Tweens to item `index` (clamped to the last item); returns the tween duration.
    pub fn scroll_to_position(&mut self, index: usize) -> Duration {
        if self.count == 0 {
            return Duration::ZERO;
        }
        let target = index.min(self.count - 1) as f32 * 180.0;
        self.gesture.start_tween(self.angle, target)
    }

    pub fn scroll_to_nearest_position(&mut self) -> Duration {
        self.scroll_to_position(self.position())
    }

    /// Flings with a release velocity of `vy` px/s.
    ///
    /// Returns `false` when the angle rests exactly on an item.
    pub fn fling(&mut self, vy: f32) -> bool {
        self.gesture.fling(vy, self.angle, self.height as f32)
    }

    #[inline]
    pub fn motion(&self) -> &Motion {
        self.gesture.motion()
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        !self.gesture.motion().is_idle()
    }

    // ── frame ─────────────────────────────────────────────────────────────

    /// Advances the active tween or fling by one frame.
    /// Returns `true` when the angle was updated.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.attached {
            return false;
        }
        match self.gesture.advance(self.angle, dt) {
            Some(angle) => {
                self.apply_angle(angle, false);
                true
            }
            None => false,
        }
    }

    /// Delay after which the next [`tick`](Self::tick) is wanted, for hosts
    /// without a vsync callback. `None` when nothing animates.
    pub fn wants_frame(&self) -> Option<Duration> {
        self.is_animating().then_some(self.config.frame_fallback_delay)
    }

    #[inline]
    pub fn needs_redraw(&self) -> bool {
        self.redraw
    }

    /// Returns and clears the redraw request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    /// Draws the back item, then the front item.
    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        self.redraw = false;
        if !self.attached {
            return;
        }
        canvas.save();
        if self.translation != Vec2::zero() {
            canvas.translate(self.translation.x, self.translation.y);
        }
        for position in [self.back, self.front].into_iter().flatten() {
            if let Some(item) = self.bound.get_mut(&position) {
                item.draw(canvas);
            }
        }
        canvas.restore();
    }

    // ── input ─────────────────────────────────────────────────────────────

    /// Whether pointer events over the list belong to it rather than to
    /// whatever is underneath.
    #[inline]
    pub fn handles_pointer(&self) -> bool {
        self.attached && self.count > 0
    }

    /// Routes a pointer event: gestures first, then the front item.
    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> EventResult {
        if !self.handles_pointer() {
            return EventResult::Ignored;
        }

        let mut result = EventResult::Ignored;
        if self.gestures_enabled {
            let outcome = self.gesture.on_pointer(event, self.angle, self.height as f32);
            match outcome.action {
                GestureAction::SetAngle(angle) => self.set_angle(angle, true),
                GestureAction::Snap => {
                    self.scroll_to_nearest_position();
                }
                GestureAction::None => {}
            }
            result = outcome.result;
        }

        if !result.is_consumed() {
            let local = event.offset(-self.translation);
            if let Some(item) = self.front.and_then(|p| self.bound.get_mut(&p)) {
                result = item.on_pointer(&local);
            }
        }
        result
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    /// Stops animations and frees every capture, item and queued view.
    /// No listener runs until [`attach`](Self::attach).
    pub fn detach(&mut self) {
        self.gesture.reset();
        self.free_all();
        self.clear_recycled();
        for item in &mut self.pool {
            item.release_capture();
        }
        self.pool.clear();
        self.front = None;
        self.back = None;
        self.attached = false;
        log::debug!("fold list detached");
    }

    /// Re-attaches after [`detach`](Self::detach) and rebinds the current angle.
    pub fn attach(&mut self) {
        if self.attached {
            return;
        }
        self.attached = true;
        self.apply_angle(self.angle, false);
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    // ── inspection ────────────────────────────────────────────────────────

    /// Position of the item drawn last and offered input first.
    #[inline]
    pub fn front_position(&self) -> Option<usize> {
        self.front
    }

    #[inline]
    pub fn back_position(&self) -> Option<usize> {
        self.back
    }

    pub fn front_item(&self) -> Option<&FoldItem<P::View>> {
        self.front.and_then(|p| self.bound.get(&p))
    }

    pub fn back_item(&self) -> Option<&FoldItem<P::View>> {
        self.back.and_then(|p| self.bound.get(&p))
    }

    pub fn item(&self, position: usize) -> Option<&FoldItem<P::View>> {
        self.bound.get(&position)
    }

    /// Bound positions in ascending order.
    pub fn bound_positions(&self) -> Vec<usize> {
        self.bound.keys().copied().collect()
    }

    /// Unbound item shells ready for reuse.
    #[inline]
    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// Content views waiting in the recycle queues.
    #[inline]
    pub fn recycled_len(&self) -> usize {
        self.recycler.len()
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn apply_angle(&mut self, angle: f32, from_user: bool) {
        if !self.place(angle) {
            return;
        }
        if let Some(listener) = self.on_fold_rotation.as_mut() {
            listener(self.angle, from_user);
        }
    }

    /// Clamps and stores `angle`, then binds and rotates the visible pair.
    /// Returns `false` while detached.
    fn place(&mut self, angle: f32) -> bool {
        self.sync_count();

        let angle = if angle.is_finite() { angle } else { self.angle };
        self.angle = angle.clamp(0.0, self.max_angle);
        self.generation = self.generation.wrapping_add(1);
        self.redraw = true;

        if !self.attached {
            return false;
        }

        let angle = self.angle;
        let first = (angle / 180.0) as usize;
        let second = first + 1;
        let local = angle % 180.0;

        let first = (first < self.count).then_some(first);
        let second = (second < self.count).then_some(second);

        if let Some(p) = first {
            self.unbind_far_from(p);
            self.bind(p);
        }
        if let Some(p) = second {
            self.bind(p);
        }
        for (position, rotation) in [(first, local), (second, local - 180.0)] {
            let Some(position) = position else { continue };
            if let Some(item) = self.bound.get_mut(&position) {
                item.set_fold_rotation(rotation);
                self.decoration.decorate(item, position, angle);
            }
        }

        // The first item's folding bottom half covers the second until it
        // passes 90°; after that the second item unfolds on top.
        (self.front, self.back) = if local <= 90.0 { (first, second) } else { (second, first) };

        log::trace!("fold angle {angle:.2}° (front {:?}, back {:?})", self.front, self.back);
        true
    }

    /// Picks up a count change the provider made without notification.
    fn sync_count(&mut self) {
        let live = self.provider.as_ref().map_or(0, P::count);
        if live == self.count {
            return;
        }
        if self.provider.is_some() {
            log::warn!("provider count changed from {} to {live} without notification", self.count);
        }
        self.set_count(live);

        let stale: Vec<usize> = self.bound.range(live..).map(|(&p, _)| p).collect();
        for position in stale {
            if let Some(mut item) = self.bound.remove(&position) {
                if let Some(view) = item.detach_content() {
                    self.release_view(view);
                }
                self.pool.push_back(item);
            }
        }
    }

    fn set_count(&mut self, count: usize) {
        self.count = count;
        self.max_angle = if count == 0 { 0.0 } else { 180.0 * (count - 1) as f32 };
    }

    fn update_data(&mut self) {
        let count = self.provider.as_ref().map_or(0, P::count);
        self.set_count(count);
        log::debug!("content changed: {count} items, angle range [0, {}]", self.max_angle);
        if count == 0 {
            self.front = None;
            self.back = None;
        }
        self.apply_angle(self.angle, false);
    }

    /// Ensures `position` is bound, evicting, reusing or creating an item.
    fn bind(&mut self, position: usize) {
        if self.bound.contains_key(&position) {
            return;
        }

        let mut item = match self.evict_farthest(position).or_else(|| self.pool.pop_front()) {
            Some(mut item) => {
                item.reset_binding();
                item
            }
            None => self.new_item(),
        };

        let Some(provider) = self.provider.as_mut() else {
            self.pool.push_back(item);
            return;
        };
        let recycled = match provider.view_type(position) {
            ViewType::Recyclable(ty) => self.recycler.take(ty),
            ViewType::Ignore => None,
        };
        log::trace!("binding item {position} (recycled view: {})", recycled.is_some());
        let view = provider.bind(position, recycled);
        item.attach_content(view);
        self.bound.insert(position, item);
    }

    /// Index distance at which a bound item may be unbound. Never below 2,
    /// so binding `second` cannot evict `first`.
    fn recycle_distance(&self) -> usize {
        self.config.recycle_distance.max(MIN_RECYCLE_DISTANCE)
    }

    /// Moves every item at least `recycle_distance` away from `first` into the
    /// pool. A jump across several items would otherwise leave them bound.
    fn unbind_far_from(&mut self, first: usize) {
        let distance = self.recycle_distance();
        let far: Vec<usize> = self
            .bound
            .keys()
            .copied()
            .filter(|p| p.abs_diff(first) >= distance)
            .collect();
        for position in far {
            let Some(mut item) = self.bound.remove(&position) else {
                continue;
            };
            if let Some(view) = item.detach_content() {
                self.recycle_view(position, view);
            }
            log::debug!("unbound item {position}, too far from {first}");
            self.pool.push_back(item);
        }
    }

    /// Unbinds the bound item farthest from `position` if it is at least
    /// `recycle_distance` away, recycling its view.
    fn evict_farthest(&mut self, position: usize) -> Option<FoldItem<P::View>> {
        let farthest = self.bound.keys().copied().max_by_key(|p| p.abs_diff(position))?;
        if farthest.abs_diff(position) < self.recycle_distance() {
            return None;
        }
        let mut item = self.bound.remove(&farthest)?;
        if let Some(view) = item.detach_content() {
            self.recycle_view(farthest, view);
        }
        log::debug!("evicted item {farthest} to bind {position}");
        Some(item)
    }

    fn new_item(&self) -> FoldItem<P::View> {
        let mut item = FoldItem::new(&self.config);
        item.set_size(self.width, self.height);
        item.set_shading(self.shading.clone());
        item.set_auto_scale_enabled(self.auto_scale);
        item.set_bitmap_allocator(self.allocator.clone());
        log::debug!("created fold item ({} bound, {} pooled)", self.bound.len(), self.pool.len());
        item
    }

    fn recycle_view(&mut self, position: usize, view: P::View) {
        let Some(provider) = self.provider.as_mut() else {
            return;
        };
        match provider.view_type(position) {
            ViewType::Recyclable(ty) => self.recycler.put(ty, view),
            ViewType::Ignore => provider.release(view),
        }
    }

    fn release_view(&mut self, view: P::View) {
        if let Some(provider) = self.provider.as_mut() {
            provider.release(view);
        }
    }

    /// Moves every bound item to the pool; views go to the recycle queues.
    fn free_all(&mut self) {
        let bound = std::mem::take(&mut self.bound);
        for (position, mut item) in bound {
            if let Some(view) = item.detach_content() {
                self.recycle_view(position, view);
            }
            self.pool.push_back(item);
        }
        self.front = None;
        self.back = None;
    }

    /// Hands every queued view back to the provider.
    fn clear_recycled(&mut self) {
        let views: Vec<P::View> = self.recycler.drain().collect();
        for view in views {
            self.release_view(view);
        }
    }

    /// Frees all bindings into the current provider and removes it.
    fn take_provider(&mut self) -> Option<P> {
        self.free_all();
        self.clear_recycled();
        self.provider.take()
    }
}

impl<P: ContentProvider, D> fmt::Debug for FoldList<P, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FoldList")
            .field("count", &self.count)
            .field("angle", &self.angle)
            .field("size", &(self.width, self.height))
            .field("bound", &self.bound.keys().collect::<Vec<_>>())
            .field("front", &self.front)
            .field("back", &self.back)
            .field("pool", &self.pool.len())
            .field("recycled", &self.recycler.len())
            .field("attached", &self.attached)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use foldkit_engine::coords::Rect;

    use super::*;
    use crate::provider::ContentView;

    struct Card(usize);

    impl ContentView for Card {
        fn paint(&self, _canvas: &mut dyn Canvas, _rect: Rect) {}
    }

    #[derive(Default)]
    struct Cards {
        count: usize,
        created: usize,
        released: usize,
    }

    impl ContentProvider for Cards {
        type View = Card;

        fn count(&self) -> usize {
            self.count
        }

        fn bind(&mut self, index: usize, recycled: Option<Card>) -> Card {
            match recycled {
                Some(mut card) => {
                    card.0 = index;
                    card
                }
                None => {
                    self.created += 1;
                    Card(index)
                }
            }
        }

        fn release(&mut self, _view: Card) {
            self.released += 1;
        }
    }

    fn list(count: usize) -> FoldList<Cards> {
        let mut list = FoldList::new();
        list.set_size(100, 200);
        list.set_content_provider(Cards { count, ..Default::default() });
        list
    }

    // ── angle ─────────────────────────────────────────────────────────────

    #[test]
    fn angle_is_clamped() {
        let mut l = list(3);
        l.set_angle(-10.0, false);
        assert_eq!(l.angle(), 0.0);
        l.set_angle(1000.0, false);
        assert_eq!(l.angle(), 360.0);
        l.set_angle(f32::NAN, false);
        assert_eq!(l.angle(), 360.0);
    }

    #[test]
    fn empty_list_stays_at_zero() {
        let mut l = list(0);
        l.set_angle(90.0, false);
        assert_eq!(l.angle(), 0.0);
        assert_eq!(l.front_position(), None);
        assert!(!l.handles_pointer());
    }

    #[test]
    fn binds_first_and_second() {
        let mut l = list(5);
        l.set_angle(200.0, false);
        assert_eq!(l.item(1).map(|i| i.fold_rotation()), Some(20.0));
        assert_eq!(l.item(2).map(|i| i.fold_rotation()), Some(-160.0));
    }

    #[test]
    fn last_item_has_no_second() {
        let mut l = list(2);
        l.set_angle(180.0, false);
        assert_eq!(l.front_position(), Some(1));
        assert_eq!(l.back_position(), None);
    }

    #[test]
    fn front_switches_after_ninety() {
        let mut l = list(3);
        l.set_angle(90.0, false);
        assert_eq!((l.front_position(), l.back_position()), (Some(0), Some(1)));
        l.set_angle(91.0, false);
        assert_eq!((l.front_position(), l.back_position()), (Some(1), Some(0)));
    }

    #[test]
    fn listener_sees_every_update() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut l = list(3);
        let sink = seen.clone();
        l.set_on_fold_rotation(move |a, user| sink.borrow_mut().push((a, user)));
        l.set_angle(45.0, true);
        l.set_angle(45.0, false);
        assert_eq!(*seen.borrow(), vec![(45.0, true), (45.0, false)]);
    }

    #[test]
    fn cleared_listener_is_not_called() {
        let calls = Rc::new(RefCell::new(0));
        let mut l = list(3);
        let sink = calls.clone();
        l.set_on_fold_rotation(move |_, _| *sink.borrow_mut() += 1);
        l.clear_on_fold_rotation();
        l.set_angle(30.0, false);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn front_and_back_items_carry_their_local_rotation() {
        let mut l = list(3);
        l.set_angle(120.0, false);
        assert_eq!(l.front_item().map(FoldItem::fold_rotation), Some(-60.0));
        assert_eq!(l.back_item().map(FoldItem::fold_rotation), Some(120.0));
    }

    #[test]
    fn resize_relays_out_without_notifying() {
        let calls = Rc::new(RefCell::new(0));
        let mut l = list(3);
        l.set_angle(45.0, false);
        let sink = calls.clone();
        l.set_on_fold_rotation(move |_, _| *sink.borrow_mut() += 1);
        let generation = l.angle_generation();

        l.set_size(120, 240);
        assert_eq!(*calls.borrow(), 0);
        assert_ne!(l.angle_generation(), generation);
        assert_eq!(l.item(0).unwrap().fold_rotation(), 45.0);

        l.set_angle(45.0, false);
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn tiny_recycle_distance_keeps_the_visible_pair() {
        let mut config = FoldConfig::default();
        config.recycle_distance = 1;
        let mut l = FoldList::with_config(config);
        l.set_size(100, 200);
        l.set_content_provider(Cards { count: 4, ..Default::default() });

        assert_eq!(l.bound_positions(), vec![0, 1]);
        assert_eq!(l.front_position(), Some(0));
        assert!(l.front_item().is_some());
    }

    #[test]
    fn settings_reach_bound_items() {
        let mut l = list(3);
        l.set_angle(30.0, false);
        l.set_auto_scale_enabled(true);
        assert!(l.item(0).unwrap().is_auto_scale_enabled());
        assert!(l.item(1).unwrap().is_auto_scale_enabled());

        l.set_config(FoldConfig::default().scroll_factor(2.0).touch_slop(4.0));
        assert_eq!(l.config().scroll_factor, 2.0);
        assert_eq!(l.angle(), 30.0);
    }

    // ── recycling ─────────────────────────────────────────────────────────

    #[test]
    fn far_item_is_evicted_and_its_view_recycled() {
        let mut l = list(10);
        for step in 0..=4 {
            l.set_angle(step as f32 * 180.0 + 10.0, false);
        }
        assert!(l.bound_positions().iter().all(|&p| p + 2 >= 4));
        let provider = l.content_provider().unwrap();
        assert_eq!(provider.created, 3);
    }

    #[test]
    fn data_change_rebinds_from_pool() {
        let mut l = list(4);
        l.set_angle(100.0, false);
        l.content_provider_mut().unwrap().count = 1;
        l.notify_data_changed();
        assert_eq!(l.angle(), 0.0);
        assert_eq!(l.bound_positions(), vec![0]);
        assert_eq!(l.pool_len(), 1);
        assert_eq!(l.recycled_len(), 0);
        assert_eq!(l.content_provider().unwrap().released, 2);
    }

    #[test]
    fn silent_count_change_drops_stale_bindings() {
        let mut l = list(4);
        l.set_angle(450.0, false);
        l.content_provider_mut().unwrap().count = 2;
        l.set_angle(450.0, false);
        assert_eq!(l.angle(), 180.0);
        assert!(l.bound_positions().iter().all(|&p| p < 2));
    }

    #[test]
    fn replacing_provider_returns_old_one_with_views() {
        let mut l = list(3);
        l.set_angle(30.0, false);
        let old = l.set_content_provider(Cards { count: 2, ..Default::default() }).unwrap();
        assert_eq!(old.released, 2);
        assert_eq!(l.content_provider().unwrap().created, 2);
    }

    // ── motion ────────────────────────────────────────────────────────────

    #[test]
    fn user_angle_cancels_motion() {
        let mut l = list(3);
        l.scroll_to_position(2);
        assert!(l.is_animating());
        assert_eq!(l.wants_frame(), Some(Duration::from_millis(10)));
        l.set_angle(10.0, true);
        assert!(!l.is_animating());
        assert_eq!(l.wants_frame(), None);
    }

    #[test]
    fn tween_reaches_target() {
        let mut l = list(3);
        let duration = l.scroll_to_position(5);
        assert_eq!(duration, Duration::from_millis(1200));
        let mut frames = 0;
        while l.tick(Duration::from_millis(16)) {
            frames += 1;
            assert!(frames < 100);
        }
        assert_eq!(l.angle(), 360.0);
        assert_eq!(l.position(), 2);
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn detach_releases_everything_and_silences_listener() {
        let calls = Rc::new(RefCell::new(0));
        let mut l = list(5);
        let sink = calls.clone();
        l.set_on_fold_rotation(move |_, _| *sink.borrow_mut() += 1);
        l.set_angle(200.0, false);
        l.scroll_to_position(0);
        l.detach();

        assert!(!l.is_attached());
        assert!(!l.is_animating());
        assert!(l.bound_positions().is_empty());
        assert_eq!(l.pool_len(), 0);
        assert!(!l.tick(Duration::from_millis(16)));
        l.set_angle(300.0, false);
        assert_eq!(*calls.borrow(), 1);

        l.attach();
        assert!(l.is_attached());
        assert_eq!(*calls.borrow(), 2);
        assert_eq!(l.bound_positions(), vec![1, 2]);
    }
}
