//! Frame-driven fold motions.
//!
//! Both motions are plain state advanced by the list on every frame tick;
//! they never call back into the list. [`Motion`] keeps them exclusive.

use std::time::Duration;

/// Linear-in-time interpolation of the fold angle towards a target.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self { from, to, duration, elapsed: Duration::ZERO }
    }

    /// Tween whose duration is `per_item` for every 180° travelled,
    /// rounded to whole milliseconds.
    pub fn for_distance(from: f32, to: f32, per_item: Duration) -> Self {
        let items = (to as f64 - from as f64).abs() / 180.0;
        let millis = (per_item.as_millis() as f64 * items).round();
        let duration = if millis.is_finite() { Duration::from_millis(millis as u64) } else { Duration::ZERO };
        Self::new(from, to, duration)
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.to
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Advances by `dt`; returns the new angle and whether the tween is done.
    pub fn advance(&mut self, dt: Duration) -> (f32, bool) {
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= self.duration {
            return (self.to, true);
        }
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        (self.from + (self.to - self.from) * t, false)
    }
}

/// Inertial motion at constant angular velocity, bounded to one item.
#[derive(Debug, Clone, PartialEq)]
pub struct Fling {
    velocity: f32,
    min: f32,
    max: f32,
}

impl Fling {
    /// Starts a fling from `angle` at `velocity` degrees per second.
    ///
    /// Bounds are the multiples of 180 around `angle`. Returns `None` when
    /// `angle` already is an exact multiple of 180: there is nothing to
    /// settle, and the caller snaps instead.
    pub fn start(angle: f32, velocity: f32) -> Option<Self> {
        if angle % 180.0 == 0.0 || !velocity.is_finite() || velocity == 0.0 {
            return None;
        }
        let min = (angle / 180.0).floor() * 180.0;
        Some(Self { velocity, min, max: min + 180.0 })
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    #[inline]
    pub fn bounds(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    /// Moves `angle` by one frame; returns the new angle and whether it
    /// reached a bound.
    pub fn advance(&self, angle: f32, dt: Duration) -> (f32, bool) {
        let next = (angle + self.velocity * dt.as_secs_f32()).clamp(self.min, self.max);
        (next, next == self.min || next == self.max)
    }
}

/// The at-most-one active motion of a fold list.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Motion {
    #[default]
    Idle,
    Tween(Tween),
    Fling(Fling),
}

impl Motion {
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, Motion::Idle)
    }

    #[inline]
    pub fn is_flinging(&self) -> bool {
        matches!(self, Motion::Fling(_))
    }

    #[inline]
    pub fn is_tweening(&self) -> bool {
        matches!(self, Motion::Tween(_))
    }

    /// Advances the active motion; returns the angle to apply, if any.
    /// A finished motion returns its final angle and becomes idle.
    pub fn advance(&mut self, angle: f32, dt: Duration) -> Option<f32> {
        let (next, done) = match self {
            Motion::Idle => return None,
            Motion::Tween(tween) => tween.advance(dt),
            Motion::Fling(fling) => fling.advance(angle, dt),
        };
        if done {
            *self = Motion::Idle;
        }
        Some(next)
    }
}
