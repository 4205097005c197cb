use std::fmt;

use crate::coords::Vec2;

/// Phase of a pointer gesture.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PointerAction {
    Down,
    Move,
    Up,
    Cancel,
}

/// A pointer sample in the receiving surface's coordinates (pixels).
///
/// `time_ms` is a monotonic host timestamp. Hosts that run their own fling
/// detection attach the release velocity (pixels per second) to `Up`; when it
/// is absent the receiver estimates it from recent moves.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub pos: Vec2,
    pub time_ms: u64,
    pub velocity: Option<Vec2>,
}

impl PointerEvent {
    #[inline]
    pub fn new(action: PointerAction, x: f32, y: f32, time_ms: u64) -> Self {
        Self { action, pos: Vec2::new(x, y), time_ms, velocity: None }
    }

    #[inline]
    pub fn down(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(PointerAction::Down, x, y, time_ms)
    }

    #[inline]
    pub fn moved(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(PointerAction::Move, x, y, time_ms)
    }

    #[inline]
    pub fn up(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(PointerAction::Up, x, y, time_ms)
    }

    #[inline]
    pub fn cancel(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(PointerAction::Cancel, x, y, time_ms)
    }

    /// Attaches a release velocity in pixels per second.
    #[inline]
    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.velocity = Some(Vec2::new(vx, vy));
        self
    }

    /// Same event with its position shifted by `offset`.
    #[inline]
    pub fn offset(mut self, offset: Vec2) -> Self {
        self.pos = self.pos + offset;
        self
    }
}

impl fmt::Display for PointerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
