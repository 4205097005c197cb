use core::ops::Mul;

use super::Vec2;

/// Projective 2D transform stored row-major; points are column vectors.
///
/// `a * b` applies `b` first, then `a`. The bottom row is `[0, 0, 1]` for affine
/// transforms; perspective rotations put a non-zero term in it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat3 {
    pub m: [[f32; 3]; 3],
}

/// Homogeneous weights at or below this are treated as behind the camera.
const MIN_W: f32 = 1e-6;

/// Determinants below this magnitude are treated as singular.
const MIN_DET: f32 = 1e-6;

impl Mat3 {
    pub const IDENTITY: Mat3 = Mat3 {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    #[inline]
    pub const fn from_rows(m: [[f32; 3]; 3]) -> Self {
        Self { m }
    }

    #[inline]
    pub const fn translate(tx: f32, ty: f32) -> Self {
        Self::from_rows([[1.0, 0.0, tx], [0.0, 1.0, ty], [0.0, 0.0, 1.0]])
    }

    #[inline]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self::from_rows([[sx, 0.0, 0.0], [0.0, sy, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Perspective projection of a rotation about the X axis through the origin.
    ///
    /// The camera sits `depth` pixels in front of the plane. Positive angles
    /// bring the part below the axis towards the viewer (it appears larger);
    /// negative angles do the same for the part above it. At ±90° the plane is
    /// seen edge-on and collapses onto the axis.
    pub fn rotate_x(degrees: f32, depth: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let p = if depth > 0.0 { -sin / depth } else { 0.0 };
        Self::from_rows([[1.0, 0.0, 0.0], [0.0, cos, 0.0], [0.0, p, 1.0]])
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    #[inline]
    pub fn is_affine(&self) -> bool {
        self.m[2][0] == 0.0 && self.m[2][1] == 0.0 && self.m[2][2] == 1.0
    }

    /// Maps `p` through the transform, or `None` if it projects behind the camera.
    #[inline]
    pub fn map_point(&self, p: Vec2) -> Option<Vec2> {
        let m = &self.m;
        let x = m[0][0] * p.x + m[0][1] * p.y + m[0][2];
        let y = m[1][0] * p.x + m[1][1] * p.y + m[1][2];
        let w = m[2][0] * p.x + m[2][1] * p.y + m[2][2];
        if w <= MIN_W {
            return None;
        }
        Some(Vec2::new(x / w, y / w))
    }

    pub fn determinant(&self) -> f32 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Inverse transform, or `None` for degenerate (edge-on or zero-scale) matrices.
    pub fn invert(&self) -> Option<Mat3> {
        let det = self.determinant();
        if det.abs() < MIN_DET || !det.is_finite() {
            return None;
        }
        let m = &self.m;
        let inv = 1.0 / det;
        Some(Self::from_rows([
            [
                (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv,
                (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv,
                (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv,
            ],
            [
                (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv,
                (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv,
                (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv,
            ],
            [
                (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv,
                (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv,
                (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv,
            ],
        ]))
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Mat3 {
        let mut out = [[0.0f32; 3]; 3];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.m[r][k] * rhs.m[k][c]).sum();
            }
        }
        Mat3 { m: out }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    #[test]
    fn translate_then_scale_order() {
        // Scale applies first, then translation.
        let m = Mat3::translate(10.0, 5.0) * Mat3::scale(2.0, 3.0);
        assert_eq!(m.map_point(Vec2::new(1.0, 1.0)), Some(Vec2::new(12.0, 8.0)));
    }

    #[test]
    fn rotate_x_keeps_axis_fixed() {
        let m = Mat3::rotate_x(45.0, 1000.0);
        let p = m.map_point(Vec2::new(30.0, 0.0)).unwrap();
        assert!(close(p, Vec2::new(30.0, 0.0)));
    }

    #[test]
    fn rotate_x_positive_enlarges_lower_part() {
        let m = Mat3::rotate_x(45.0, 1000.0);
        let below = m.map_point(Vec2::new(100.0, 100.0)).unwrap();
        let above = m.map_point(Vec2::new(100.0, -100.0)).unwrap();
        assert!(below.x > 100.0, "lower edge should come towards the viewer");
        assert!(above.x < 100.0, "upper edge should recede");
        assert!(below.y < 100.0, "height is foreshortened");
    }

    #[test]
    fn rotate_x_ninety_is_edge_on() {
        let m = Mat3::rotate_x(90.0, 1000.0);
        let p = m.map_point(Vec2::new(10.0, 50.0)).unwrap();
        assert!(p.y.abs() < 1e-3);
        assert!(m.invert().is_none());
    }

    #[test]
    fn invert_round_trips_perspective() {
        let m = Mat3::translate(40.0, 60.0)
            * Mat3::rotate_x(-30.0, 800.0)
            * Mat3::scale(0.8, 0.9)
            * Mat3::translate(-40.0, -60.0);
        let inv = m.invert().unwrap();
        let p = Vec2::new(12.0, 7.0);
        let q = inv.map_point(m.map_point(p).unwrap()).unwrap();
        assert!(close(p, q));
    }

    #[test]
    fn point_behind_camera_is_rejected() {
        // Depth 10: anything more than 10px below the axis at 90° is behind the eye.
        let m = Mat3::rotate_x(89.0, 10.0);
        assert!(m.map_point(Vec2::new(0.0, 50.0)).is_none());
    }
}
