/// Integer, edge-based rectangle: `[left, right) × [top, bottom)`.
///
/// Used for bitmap sampling regions where pixel rows must line up exactly.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct IRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl IRect {
    /// The canonical empty rectangle `(0, 0, 0, 0)`.
    pub const EMPTY: IRect = IRect::new(0, 0, 0, 0);

    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    #[inline]
    pub const fn width(self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub const fn height(self) -> i32 {
        self.bottom - self.top
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    #[inline]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Overlap of two rectangles, or `None` when they share no pixel.
    #[inline]
    pub fn intersect(self, other: IRect) -> Option<IRect> {
        if self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
        {
            Some(IRect::new(
                self.left.max(other.left),
                self.top.max(other.top),
                self.right.min(other.right),
                self.bottom.min(other.bottom),
            ))
        } else {
            None
        }
    }

    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }
}
