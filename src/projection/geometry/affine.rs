use crate::projection::geometry::Point2;

/// 2D affine map `(x, y) -> (a*x + c*y + e, b*x + d*y + f)`.
///
/// Coefficient naming follows the column-major convention of most 2D graphics
/// APIs: `a`, `b` are the first column, `c`, `d` the second, `e`, `f` the
/// translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl AffineTransform {
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    pub const fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    #[inline]
    pub fn apply(&self, point: &Point2) -> Point2 {
        Point2::new(
            self.a * point.x + self.c * point.y + self.e,
            self.b * point.x + self.d * point.y + self.f,
        )
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}
