//! Immutable vertex sequences used both as calibration cells and as ROIs.

use crate::projection::common::error::{MappingError, Result};
use crate::projection::geometry::Point2;

/// An ordered, non-empty sequence of vertices.
///
/// As a calibration cell the vertices describe a simple closed boundary.
/// As an ROI the polygon may be degenerate, e.g. a single point.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point2>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point2>) -> Result<Self> {
        if vertices.is_empty() {
            return Err(MappingError::EmptyPolygon);
        }
        Ok(Self { vertices })
    }

    /// Axis-aligned rectangle, vertices clockwise from the top-left corner.
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            vertices: vec![
                Point2::new(x, y),
                Point2::new(x + width, y),
                Point2::new(x + width, y + height),
                Point2::new(x, y + height),
            ],
        }
    }

    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false, a polygon holds at least one vertex.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Even-odd containment test, boundary resolved along the x axis.
    ///
    /// A point on a boundary is inside when a step towards +x keeps it in the
    /// closed polygon: left edges and horizontal (top or bottom) edges are
    /// inclusive, right edges exclusive. Side-by-side cells split their shared
    /// vertical edge; stacked cells both claim a shared horizontal edge.
    /// Polygons with fewer than three vertices contain nothing.
    pub fn contains(&self, point: &Point2) -> bool {
        if self.vertices.len() < 3 {
            return false;
        }
        self.crossing_parity(point, |vy, py| vy > py) || self.crossing_parity(point, |vy, py| vy >= py)
    }

    /// Crossing-number parity for a ray cast towards +x. `above` decides on
    /// which side of the ray a vertex level with the point falls.
    fn crossing_parity(&self, point: &Point2, above: impl Fn(f64, f64) -> bool) -> bool {
        let n = self.vertices.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = self.vertices[i];
            let vj = self.vertices[j];
            if above(vi.y, point.y) != above(vj.y, point.y) {
                let x_cross = vi.x + (point.y - vi.y) * (vj.x - vi.x) / (vj.y - vi.y);
                if point.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Arithmetic mean of the vertices.
    ///
    /// For calibration cells the vertices are the calibration samples that
    /// defined the cell, so this is the sample mean rather than the area centroid.
    pub fn centroid(&self) -> Point2 {
        let n = self.vertices.len() as f64;
        let (sx, sy) = self
            .vertices
            .iter()
            .fold((0.0, 0.0), |(sx, sy), v| (sx + v.x, sy + v.y));
        Point2::new(sx / n, sy / n)
    }
}
