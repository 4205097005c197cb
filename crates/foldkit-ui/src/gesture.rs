use std::time::Duration;

use foldkit_engine::input::{PointerAction, PointerEvent, VelocityTracker};

use crate::animation::{Fling, Motion, Tween};
use crate::config::FoldConfig;
use crate::event::EventResult;

/// What the list should do after a pointer event went through the gesture layer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GestureAction {
    None,
    /// Apply this angle as a user-driven update.
    SetAngle(f32),
    /// Tween to the nearest item.
    Snap,
}

/// Result of [`GestureFold::on_pointer`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GestureOutcome {
    pub result: EventResult,
    pub action: GestureAction,
}

impl GestureOutcome {
    const IGNORED: GestureOutcome = GestureOutcome {
        result: EventResult::Ignored,
        action: GestureAction::None,
    };
}

/// Turns vertical drags and flings into fold angle updates.
///
/// The gesture layer does not own the angle: callers pass the current angle
/// and list height in, and apply what comes out. It does own the list's
/// single active [`Motion`] (snap tween or fling), advanced on every frame.
#[derive(Debug)]
pub struct GestureFold {
    scroll_factor: f32,
    slop: f32,
    min_fling_velocity: f32,
    min_pointer_velocity: f32,
    duration_per_item: Duration,

    tracking: bool,
    scrolling: bool,
    down_y: f32,
    scroll_start_angle: f32,
    scroll_start_y: f32,
    velocity: VelocityTracker,

    last_event: Option<(u64, PointerAction)>,
    last_result: EventResult,

    motion: Motion,
}

impl GestureFold {
    pub fn new(config: &FoldConfig) -> Self {
        Self {
            scroll_factor: config.scroll_factor,
            slop: config.touch_slop,
            min_fling_velocity: config.min_fling_velocity,
            min_pointer_velocity: config.min_fling_pointer_velocity,
            duration_per_item: config.animation_duration_per_item,
            tracking: false,
            scrolling: false,
            down_y: 0.0,
            scroll_start_angle: 0.0,
            scroll_start_y: 0.0,
            velocity: VelocityTracker::new(),
            last_event: None,
            last_result: EventResult::Ignored,
            motion: Motion::Idle,
        }
    }

    pub fn apply_config(&mut self, config: &FoldConfig) {
        self.scroll_factor = config.scroll_factor;
        self.slop = config.touch_slop;
        self.min_fling_velocity = config.min_fling_velocity;
        self.min_pointer_velocity = config.min_fling_pointer_velocity;
        self.duration_per_item = config.animation_duration_per_item;
    }

    #[inline]
    pub fn scroll_factor(&self) -> f32 {
        self.scroll_factor
    }

    pub fn set_scroll_factor(&mut self, factor: f32) {
        self.scroll_factor = factor;
    }

    /// True between the drag crossing the slop and the pointer release.
    #[inline]
    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    #[inline]
    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    // ── pointer ───────────────────────────────────────────────────────────

    /// Processes one pointer event at the given list state.
    ///
    /// An event repeating the previous one's timestamp and action returns the
    /// previous result without acting again.
    pub fn on_pointer(&mut self, event: &PointerEvent, angle: f32, height: f32) -> GestureOutcome {
        let key = (event.time_ms, event.action);
        if self.last_event == Some(key) {
            return GestureOutcome { result: self.last_result, ..GestureOutcome::IGNORED };
        }
        self.last_event = Some(key);

        let outcome = match event.action {
            PointerAction::Down => self.on_down(event),
            PointerAction::Move => self.on_move(event, angle, height),
            PointerAction::Up => self.on_up(event, angle, height),
            PointerAction::Cancel => self.on_release(false),
        };
        self.last_result = outcome.result;
        outcome
    }

    fn on_down(&mut self, event: &PointerEvent) -> GestureOutcome {
        self.cancel_motion();
        self.tracking = true;
        self.scrolling = false;
        self.down_y = event.pos.y;
        self.velocity.clear();
        self.velocity.add(event.time_ms, event.pos);
        GestureOutcome::IGNORED
    }

    fn on_move(&mut self, event: &PointerEvent, angle: f32, height: f32) -> GestureOutcome {
        if !self.tracking {
            // Stream joined mid-gesture: treat the first sample as the press.
            self.on_down(event);
        }
        self.velocity.add(event.time_ms, event.pos);

        let y = event.pos.y;
        if !self.scrolling && (y - self.down_y).abs() > self.slop && height > 0.0 {
            self.scrolling = true;
            self.scroll_start_angle = angle;
            self.scroll_start_y = y;
            log::trace!("fold drag started at {angle}°");
        }

        if !self.scrolling {
            return GestureOutcome::IGNORED;
        }
        let delta = 180.0 * self.scroll_factor * (self.scroll_start_y - y) / height;
        GestureOutcome {
            result: EventResult::Consumed,
            action: GestureAction::SetAngle(self.scroll_start_angle + delta),
        }
    }

    fn on_up(&mut self, event: &PointerEvent, angle: f32, height: f32) -> GestureOutcome {
        self.velocity.add(event.time_ms, event.pos);

        let mut flung = false;
        if self.scrolling {
            let vy = match event.velocity {
                Some(v) => v.y,
                None => self.velocity.velocity().y,
            };
            if vy.abs() > self.min_pointer_velocity {
                flung = self.fling(vy, angle, height);
            }
        }
        self.on_release(self.scrolling || flung)
    }

    fn on_release(&mut self, consumed: bool) -> GestureOutcome {
        self.tracking = false;
        self.scrolling = false;
        self.velocity.clear();
        let action = if self.motion.is_flinging() { GestureAction::None } else { GestureAction::Snap };
        GestureOutcome { result: consumed.into(), action }
    }

    // ── motion ────────────────────────────────────────────────────────────

    /// Starts a fling for a release velocity of `vy` px/s.
    ///
    /// Returns `false` (leaving any running motion alone) when the list has no
    /// height or `angle` rests exactly on an item.
    pub fn fling(&mut self, vy: f32, angle: f32, height: f32) -> bool {
        if height <= 0.0 || !vy.is_finite() {
            return false;
        }
        let omega = -vy / height * 180.0;
        if omega == 0.0 {
            return false;
        }
        let omega = omega.abs().max(self.min_fling_velocity).copysign(omega);

        match Fling::start(angle, omega) {
            Some(fling) => {
                log::debug!("fling at {omega:.0}°/s within {:?}", fling.bounds());
                self.motion = Motion::Fling(fling);
                true
            }
            None => {
                log::debug!("fling rejected: {angle}° rests on an item");
                false
            }
        }
    }

    /// Replaces any motion with a tween from `from` to `to`.
    pub fn start_tween(&mut self, from: f32, to: f32) -> Duration {
        let tween = Tween::for_distance(from, to, self.duration_per_item);
        let duration = tween.duration();
        log::debug!("tween {from}° → {to}° over {duration:?}");
        self.motion = Motion::Tween(tween);
        duration
    }

    pub fn cancel_motion(&mut self) {
        self.motion = Motion::Idle;
    }

    /// Advances the active motion by one frame; returns the angle to apply.
    pub fn advance(&mut self, angle: f32, dt: Duration) -> Option<f32> {
        self.motion.advance(angle, dt)
    }

    /// Forgets gesture progress and any motion.
    pub fn reset(&mut self) {
        self.cancel_motion();
        self.tracking = false;
        self.scrolling = false;
        self.velocity.clear();
        self.last_event = None;
        self.last_result = EventResult::Ignored;
    }
}
