use std::collections::VecDeque;

use crate::coords::Vec2;

/// Samples older than this (relative to the newest) do not contribute.
const HORIZON_MS: u64 = 100;

/// Upper bound on retained samples.
const MAX_SAMPLES: usize = 20;

/// Estimates pointer velocity from recent position samples.
///
/// Uses the displacement between the oldest and newest sample inside a short
/// time horizon, which is enough to tell a flick from a slow drag.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    samples: VecDeque<(u64, Vec2)>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn add(&mut self, time_ms: u64, pos: Vec2) {
        if self.samples.back().is_some_and(|&(t, _)| time_ms < t) {
            // Time went backwards: treat as a new gesture.
            self.samples.clear();
        }
        self.samples.push_back((time_ms, pos));
        while self.samples.len() > MAX_SAMPLES {
            self.samples.pop_front();
        }
        while let Some(&(t, _)) = self.samples.front() {
            if time_ms - t > HORIZON_MS {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Velocity in pixels per second, or zero with fewer than two samples.
    pub fn velocity(&self) -> Vec2 {
        let (Some(&(t0, p0)), Some(&(t1, p1))) = (self.samples.front(), self.samples.back()) else {
            return Vec2::zero();
        };
        if t1 <= t0 {
            return Vec2::zero();
        }
        (p1 - p0) * (1000.0 / (t1 - t0) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_sample_has_no_velocity() {
        let mut vt = VelocityTracker::new();
        vt.add(0, Vec2::new(0.0, 0.0));
        assert_eq!(vt.velocity(), Vec2::zero());
    }

    #[test]
    fn steady_motion() {
        let mut vt = VelocityTracker::new();
        for i in 0..5u64 {
            vt.add(i * 10, Vec2::new(0.0, i as f32 * 10.0));
        }
        // 10 px per 10 ms.
        assert_eq!(vt.velocity(), Vec2::new(0.0, 1000.0));
    }

    #[test]
    fn old_samples_fall_out_of_horizon() {
        let mut vt = VelocityTracker::new();
        vt.add(0, Vec2::new(0.0, 0.0));
        vt.add(500, Vec2::new(0.0, 0.0));
        vt.add(550, Vec2::new(0.0, 50.0));
        assert_eq!(vt.velocity(), Vec2::new(0.0, 1000.0));
    }
}
