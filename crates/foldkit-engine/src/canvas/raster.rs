use crate::coords::{IRect, Mat3, Rect, Vec2};
use crate::paint::{Bitmap, Color};

use super::{Canvas, CanvasState};

/// Software canvas that rasterizes into a [`Bitmap`].
///
/// Every draw call is handled by inverse mapping: for each device pixel inside
/// the projected bounds, the pixel center is mapped back into local space and
/// shaded if it falls inside the source geometry. That makes perspective
/// transforms exact at the cost of one matrix-vector product per pixel.
///
/// Bitmaps are sampled bilinearly; blending is premultiplied src-over.
pub struct RasterCanvas<'a> {
    target: &'a mut Bitmap,
    state: CanvasState,
}

impl<'a> RasterCanvas<'a> {
    pub fn new(target: &'a mut Bitmap) -> Self {
        Self { target, state: CanvasState::new() }
    }

    /// Device pixel range covered by `local` under the current transform,
    /// intersected with the clip and the target.
    fn pixel_span(&self, local: Rect) -> Option<IRect> {
        let mut device = self.state.device_bounds(local)?;
        if let Some(clip) = self.state.clip() {
            device = device.intersect(clip)?;
        }
        device.round_out().intersect(self.target.bounds())
    }

    /// Shades every device pixel whose center maps inside `local`.
    fn fill_mapped<F>(&mut self, local: Rect, shade: F)
    where
        F: Fn(Vec2) -> Option<Color>,
    {
        let Some(span) = self.pixel_span(local) else {
            return;
        };
        let Some(inverse) = self.state.transform().invert() else {
            // Edge-on: the geometry has no area on screen.
            return;
        };
        let clip = self.state.clip();
        let width = self.target.width() as usize;
        let texels = self.target.texels_mut();

        for y in span.top..span.bottom {
            for x in span.left..span.right {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if clip.is_some_and(|c| !c.contains(center)) {
                    continue;
                }
                let Some(p) = inverse.map_point(center) else {
                    continue;
                };
                if !local.contains(p) {
                    continue;
                }
                if let Some(src) = shade(p) {
                    let dst = &mut texels[y as usize * width + x as usize];
                    *dst = blend_src_over(src, *dst);
                }
            }
        }
    }
}

impl Canvas for RasterCanvas<'_> {
    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn concat(&mut self, transform: Mat3) {
        self.state.concat(transform);
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.state.clip_rect(rect);
    }

    fn clear(&mut self, color: Color) {
        let region = match self.state.clip() {
            None => Some(self.target.bounds()),
            Some(clip) => clip.round_out().intersect(self.target.bounds()),
        };
        let Some(region) = region else {
            return;
        };
        let px = color.to_premul_u8();
        let width = self.target.width() as usize;
        let texels = self.target.texels_mut();
        for y in region.top..region.bottom {
            let row = y as usize * width;
            texels[row + region.left as usize..row + region.right as usize].fill(px);
        }
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        if color.a <= 0.0 {
            return;
        }
        self.fill_mapped(rect, |_| Some(color));
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, src: IRect, dst: Rect) {
        let Some(src) = src.intersect(bitmap.bounds()) else {
            return;
        };
        if dst.is_empty() {
            return;
        }
        let sx = src.width() as f32 / dst.width();
        let sy = src.height() as f32 / dst.height();
        self.fill_mapped(dst, |p| {
            let u = src.left as f32 + (p.x - dst.origin.x) * sx;
            let v = src.top as f32 + (p.y - dst.origin.y) * sy;
            Some(sample_bilinear(bitmap, src, u, v))
        });
    }

    fn transform(&self) -> Mat3 {
        self.state.transform()
    }
}

/// Bilinear sample at texel coordinates `(u, v)`, clamped to `region`.
fn sample_bilinear(bitmap: &Bitmap, region: IRect, u: f32, v: f32) -> Color {
    let fx = (u - 0.5).clamp(region.left as f32, (region.right - 1) as f32);
    let fy = (v - 0.5).clamp(region.top as f32, (region.bottom - 1) as f32);
    let x0 = fx.floor() as i32;
    let y0 = fy.floor() as i32;
    let x1 = (x0 + 1).min(region.right - 1);
    let y1 = (y0 + 1).min(region.bottom - 1);
    let tx = fx - x0 as f32;
    let ty = fy - y0 as f32;

    let texel = |x: i32, y: i32| Color::from_premul_u8(bitmap.pixel(x as u32, y as u32));
    let mix = |a: Color, b: Color, t: f32| {
        Color::from_premul(
            a.r + (b.r - a.r) * t,
            a.g + (b.g - a.g) * t,
            a.b + (b.b - a.b) * t,
            a.a + (b.a - a.a) * t,
        )
    };

    let top = mix(texel(x0, y0), texel(x1, y0), tx);
    let bottom = mix(texel(x0, y1), texel(x1, y1), tx);
    mix(top, bottom, ty)
}

#[inline]
fn blend_src_over(src: Color, dst: [u8; 4]) -> [u8; 4] {
    let d = Color::from_premul_u8(dst);
    let k = 1.0 - src.a.clamp(0.0, 1.0);
    Color::from_premul(src.r + d.r * k, src.g + d.g * k, src.b + d.b * k, src.a + d.a * k)
        .to_premul_u8()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::{BitmapAllocator, HeapAllocator};

    fn bitmap(w: u32, h: u32) -> Bitmap {
        HeapAllocator.allocate(w, h).unwrap()
    }

    #[test]
    fn draw_rect_fills_covered_pixels_only() {
        let mut target = bitmap(4, 4);
        {
            let mut canvas = RasterCanvas::new(&mut target);
            canvas.draw_rect(Rect::new(1.0, 1.0, 2.0, 2.0), Color::WHITE);
        }
        assert_eq!(target.pixel(1, 1), [255; 4]);
        assert_eq!(target.pixel(2, 2), [255; 4]);
        assert_eq!(target.pixel(0, 0), [0; 4]);
        assert_eq!(target.pixel(3, 3), [0; 4]);
    }

    #[test]
    fn translucent_rect_blends_over() {
        let mut target = bitmap(1, 1);
        target.clear(Color::WHITE);
        {
            let mut canvas = RasterCanvas::new(&mut target);
            canvas.draw_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::BLACK.with_alpha_u8(128));
        }
        let px = target.pixel(0, 0);
        assert_eq!(px[3], 255);
        assert!((px[0] as i32 - 127).abs() <= 1, "got {px:?}");
    }

    #[test]
    fn clip_limits_drawing() {
        let mut target = bitmap(4, 1);
        {
            let mut canvas = RasterCanvas::new(&mut target);
            canvas.clip_rect(Rect::new(0.0, 0.0, 2.0, 1.0));
            canvas.draw_rect(Rect::new(0.0, 0.0, 4.0, 1.0), Color::WHITE);
        }
        assert_eq!(target.pixel(1, 0), [255; 4]);
        assert_eq!(target.pixel(2, 0), [0; 4]);
    }

    #[test]
    fn draw_bitmap_copies_region_unscaled() {
        let mut source = bitmap(2, 2);
        {
            let mut canvas = RasterCanvas::new(&mut source);
            canvas.draw_rect(Rect::new(0.0, 1.0, 2.0, 1.0), Color::WHITE);
        }
        let mut target = bitmap(2, 2);
        {
            let mut canvas = RasterCanvas::new(&mut target);
            let region = IRect::new(0, 1, 2, 2);
            canvas.draw_bitmap(&source, region, Rect::from(region));
        }
        assert_eq!(target.pixel(0, 0), [0; 4]);
        assert_eq!(target.pixel(0, 1), [255; 4]);
        assert_eq!(target.pixel(1, 1), [255; 4]);
    }

    #[test]
    fn edge_on_transform_draws_nothing() {
        let mut target = bitmap(8, 8);
        {
            let mut canvas = RasterCanvas::new(&mut target);
            canvas.concat(Mat3::translate(4.0, 4.0) * Mat3::rotate_x(90.0, 500.0));
            canvas.draw_rect(Rect::new(-4.0, 0.0, 8.0, 4.0), Color::WHITE);
        }
        assert!(target.texels().iter().all(|px| *px == [0; 4]));
    }

    #[test]
    fn clear_respects_clip() {
        let mut target = bitmap(2, 1);
        target.clear(Color::WHITE);
        {
            let mut canvas = RasterCanvas::new(&mut target);
            canvas.clip_rect(Rect::new(1.0, 0.0, 1.0, 1.0));
            canvas.clear(Color::TRANSPARENT);
        }
        assert_eq!(target.pixel(0, 0), [255; 4]);
        assert_eq!(target.pixel(1, 0), [0; 4]);
    }
}
