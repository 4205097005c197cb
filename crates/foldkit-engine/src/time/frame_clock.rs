use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick.
    pub dt: Duration,

    /// Time elapsed since the clock was created or reset.
    pub elapsed: Duration,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

#[derive(Debug, Clone)]
enum Source {
    Wall { last: Instant },
    Fixed { step: Duration },
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Wall-clock delta time is clamped to avoid pathological values when the
/// application is paused by the debugger, minimized, or stalls.
#[derive(Debug, Clone)]
pub struct FrameClock {
    source: Source,
    elapsed: Duration,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a wall clock with default clamps.
    ///
    /// Clamp rationale:
    /// - minimum prevents zero-dt behavior from tight loops on some platforms
    /// - maximum prevents an animation from jumping to its end after a long stall
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a wall clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            source: Source::Wall { last: Instant::now() },
            elapsed: Duration::ZERO,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Creates a simulated clock advancing by exactly `step` per tick.
    pub fn fixed(step: Duration) -> Self {
        Self {
            source: Source::Fixed { step },
            elapsed: Duration::ZERO,
            frame_index: 0,
            dt_min: step,
            dt_max: step,
        }
    }

    /// Simulated clock for `fps` frames per second.
    pub fn fixed_fps(fps: u32) -> Self {
        Self::fixed(Duration::from_secs(1) / fps.max(1))
    }

    /// Resets the clock baseline.
    ///
    /// Useful after the host resumes from suspension.
    pub fn reset(&mut self) {
        if let Source::Wall { last } = &mut self.source {
            *last = Instant::now();
        }
        self.elapsed = Duration::ZERO;
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let dt = match &mut self.source {
            Source::Wall { last } => {
                let now = Instant::now();
                let dt = now.saturating_duration_since(*last);
                *last = now;
                dt.clamp(self.dt_min, self.dt_max)
            }
            Source::Fixed { step } => *step,
        };

        self.elapsed += dt;

        let ft = FrameTime {
            dt,
            elapsed: self.elapsed,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
