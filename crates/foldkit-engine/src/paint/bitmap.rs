use std::fmt;

use image::RgbaImage;

use crate::coords::IRect;
use crate::error::EngineError;

use super::Color;

/// Offscreen RGBA8 surface with premultiplied alpha.
///
/// Backed by an `image::RgbaImage`; the bytes are premultiplied, so use
/// [`Bitmap::from_image`] / [`Bitmap::to_image`] when exchanging with code that
/// expects straight alpha (PNG files, decoders).
#[derive(Clone)]
pub struct Bitmap {
    pixels: RgbaImage,
}

impl Bitmap {
    /// Wraps an already premultiplied buffer.
    pub(crate) fn from_premul_image(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// Converts a straight-alpha image into a premultiplied bitmap.
    pub fn from_image(image: &RgbaImage) -> Self {
        let mut pixels = image.clone();
        for px in bytemuck::cast_slice_mut::<u8, [u8; 4]>(&mut pixels) {
            let a = px[3] as u32;
            for c in &mut px[..3] {
                *c = ((*c as u32 * a + 127) / 255) as u8;
            }
        }
        Self { pixels }
    }

    /// Decodes PNG (or any enabled `image` format) bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, EngineError> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        Ok(Self::from_image(&image))
    }

    /// Returns a straight-alpha copy suitable for encoding.
    pub fn to_image(&self) -> RgbaImage {
        let mut out = self.pixels.clone();
        for px in bytemuck::cast_slice_mut::<u8, [u8; 4]>(&mut out) {
            let a = px[3] as u32;
            if a == 0 {
                *px = [0, 0, 0, 0];
                continue;
            }
            for c in &mut px[..3] {
                *c = ((*c as u32 * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// `(0, 0, width, height)`.
    #[inline]
    pub fn bounds(&self) -> IRect {
        IRect::from_size(self.width(), self.height())
    }

    #[inline]
    pub fn has_size(&self, width: u32, height: u32) -> bool {
        self.width() == width && self.height() == height
    }

    /// Overwrites every pixel (no blending).
    pub fn clear(&mut self, color: Color) {
        let px = color.to_premul_u8();
        self.texels_mut().fill(px);
    }

    /// Premultiplied pixel at `(x, y)`, or transparent outside the bitmap.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width() || y >= self.height() {
            return [0; 4];
        }
        self.texels()[(y * self.width() + x) as usize]
    }

    #[inline]
    pub fn texels(&self) -> &[[u8; 4]] {
        bytemuck::cast_slice::<u8, [u8; 4]>(self.pixels.as_raw())
    }

    #[inline]
    pub fn texels_mut(&mut self) -> &mut [[u8; 4]] {
        bytemuck::cast_slice_mut::<u8, [u8; 4]>(&mut self.pixels)
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}
