//! Bitmap allocation.
//!
//! Capture bitmaps are large (`width × height × 4` bytes) and are created lazily
//! while an item is folding. Allocation is fallible: a refused allocation is
//! reported as [`EngineError::BitmapAlloc`] and the caller degrades instead of
//! aborting the process.

use image::RgbaImage;

use crate::error::EngineError;

use super::Bitmap;

/// Source of offscreen bitmaps.
pub trait BitmapAllocator {
    /// Allocates a transparent `width × height` bitmap.
    fn allocate(&self, width: u32, height: u32) -> Result<Bitmap, EngineError>;
}

/// Allocates from the process heap using fallible reservation.
#[derive(Debug, Default, Copy, Clone)]
pub struct HeapAllocator;

impl BitmapAllocator for HeapAllocator {
    fn allocate(&self, width: u32, height: u32) -> Result<Bitmap, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::EmptyBitmap);
        }
        let refused = || EngineError::BitmapAlloc { width, height };

        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(refused)?;

        let mut buf: Vec<u8> = Vec::new();
        buf.try_reserve_exact(len).map_err(|_| refused())?;
        buf.resize(len, 0);

        let pixels = RgbaImage::from_raw(width, height, buf).ok_or_else(refused)?;
        log::debug!("allocated {width}x{height} bitmap");
        Ok(Bitmap::from_premul_image(pixels))
    }
}

/// Refuses any single allocation larger than `max_pixels`.
///
/// Lets memory-constrained hosts cap capture sizes, and makes the
/// out-of-memory path reproducible.
#[derive(Debug, Copy, Clone)]
pub struct BudgetAllocator {
    pub max_pixels: u64,
}

impl BudgetAllocator {
    pub const fn new(max_pixels: u64) -> Self {
        Self { max_pixels }
    }
}

impl BitmapAllocator for BudgetAllocator {
    fn allocate(&self, width: u32, height: u32) -> Result<Bitmap, EngineError> {
        if width as u64 * height as u64 > self.max_pixels {
            return Err(EngineError::BitmapAlloc { width, height });
        }
        HeapAllocator.allocate(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_allocates_transparent() {
        let bmp = HeapAllocator.allocate(4, 3).unwrap();
        assert_eq!((bmp.width(), bmp.height()), (4, 3));
        assert!(bmp.texels().iter().all(|px| *px == [0; 4]));
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(HeapAllocator.allocate(0, 10), Err(EngineError::EmptyBitmap)));
    }

    #[test]
    fn budget_refuses_large_requests() {
        let alloc = BudgetAllocator::new(100);
        assert!(alloc.allocate(10, 10).is_ok());
        assert!(matches!(
            alloc.allocate(11, 10),
            Err(EngineError::BitmapAlloc { width: 11, height: 10 })
        ));
    }
}
