use std::time::Duration;

/// Duration of a tween across one item (180°).
pub const ANIMATION_DURATION_PER_ITEM: Duration = Duration::from_millis(600);
/// Minimum angular fling velocity, degrees per second.
pub const MIN_FLING_VELOCITY: f32 = 600.0;
/// Fold degrees per list height of drag, divided by 180.
pub const DEFAULT_SCROLL_FACTOR: f32 = 1.33;
/// Scroll factor used by the unfold transition.
pub const UNFOLD_SCROLL_FACTOR: f32 = 2.0;
/// Camera distance coefficient, in dp.
pub const CAMERA_DISTANCE: f32 = 48.0;
/// Maximum alpha of the solid fold shadow.
pub const SHADOW_MAX_ALPHA: u8 = 192;
/// Bound items at least this far (in positions) from a requested one may be evicted.
pub const RECYCLE_DISTANCE: usize = 3;
/// Smallest usable recycle distance: binding `second` must never evict `first`.
pub const MIN_RECYCLE_DISTANCE: usize = 2;

/// Units per inch of the camera model used for perspective rotation.
const CAMERA_UNITS_PER_INCH: f32 = 72.0;

/// Tunables of the fold layer.
///
/// Defaults reproduce the reference look and feel; hosts usually only set
/// `density_dpi` and `touch_slop` from their display metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldConfig {
    pub animation_duration_per_item: Duration,
    /// Degrees per second.
    pub min_fling_velocity: f32,
    pub scroll_factor: f32,
    pub camera_distance: f32,
    pub density_dpi: f32,
    /// Pointer travel (px) before a drag starts folding.
    pub touch_slop: f32,
    /// Release velocities (px/s) at or below this are not flings.
    pub min_fling_pointer_velocity: f32,
    /// Frame delay requested by animations when the host has no vsync hook.
    pub frame_fallback_delay: Duration,
    /// Fold lists treat anything below [`MIN_RECYCLE_DISTANCE`] as that minimum.
    pub recycle_distance: usize,
    pub shadow_max_alpha: u8,
}

impl Default for FoldConfig {
    fn default() -> Self {
        Self {
            animation_duration_per_item: ANIMATION_DURATION_PER_ITEM,
            min_fling_velocity: MIN_FLING_VELOCITY,
            scroll_factor: DEFAULT_SCROLL_FACTOR,
            camera_distance: CAMERA_DISTANCE,
            density_dpi: 160.0,
            touch_slop: 16.0,
            min_fling_pointer_velocity: 50.0,
            frame_fallback_delay: Duration::from_millis(10),
            recycle_distance: RECYCLE_DISTANCE,
            shadow_max_alpha: SHADOW_MAX_ALPHA,
        }
    }
}

impl FoldConfig {
    pub fn animation_duration_per_item(mut self, v: Duration) -> Self {
        self.animation_duration_per_item = v;
        self
    }

    pub fn min_fling_velocity(mut self, v: f32) -> Self {
        self.min_fling_velocity = v;
        self
    }

    pub fn scroll_factor(mut self, v: f32) -> Self {
        self.scroll_factor = v;
        self
    }

    pub fn camera_distance(mut self, v: f32) -> Self {
        self.camera_distance = v;
        self
    }

    pub fn density_dpi(mut self, v: f32) -> Self {
        self.density_dpi = v;
        self
    }

    pub fn touch_slop(mut self, v: f32) -> Self {
        self.touch_slop = v;
        self
    }

    pub fn min_fling_pointer_velocity(mut self, v: f32) -> Self {
        self.min_fling_pointer_velocity = v;
        self
    }

    pub fn frame_fallback_delay(mut self, v: Duration) -> Self {
        self.frame_fallback_delay = v;
        self
    }

    /// Values below [`MIN_RECYCLE_DISTANCE`] are raised to it.
    pub fn recycle_distance(mut self, v: usize) -> Self {
        self.recycle_distance = v.max(MIN_RECYCLE_DISTANCE);
        self
    }

    pub fn shadow_max_alpha(mut self, v: u8) -> Self {
        self.shadow_max_alpha = v;
        self
    }

    /// Distance in pixels between the camera and the folding plane.
    ///
    /// The host requests `camera_distance · density_dpi` pixels; the camera
    /// model converts that back to inches and works at 72 units per inch, so
    /// the result is the same on every display density.
    pub fn camera_depth(&self) -> f32 {
        let distance_px = self.camera_distance * self.density_dpi;
        let inches = if self.density_dpi > 0.0 {
            distance_px / self.density_dpi
        } else {
            self.camera_distance
        };
        inches * CAMERA_UNITS_PER_INCH
    }

    /// Auto-fit coefficient: extra projected width per pixel of height at 90°.
    pub fn auto_fit_factor(&self) -> f32 {
        if self.camera_distance > 0.0 {
            8.0 / self.camera_distance
        } else {
            0.0
        }
    }
}
