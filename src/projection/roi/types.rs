//! ROI shape types as handed over by a shape editor

use crate::projection::geometry::Point2;

/// A region of interest in image-space pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum RoiShape {
    /// A cluster of independent points
    Point(Vec<Point2>),
    /// Axis-aligned rectangle from its top-left corner
    Rectangle { x: f64, y: f64, width: f64, height: f64 },
    /// Ellipse inscribed in the given bounding box
    Oval { x: f64, y: f64, width: f64, height: f64 },
    Polygon(Vec<Point2>),
    Freehand(Vec<Point2>),
    Line { start: Point2, end: Point2 },
    Composite(Vec<RoiShape>),
}

impl RoiShape {
    pub fn kind(&self) -> &'static str {
        match self {
            RoiShape::Point(_) => "point",
            RoiShape::Rectangle { .. } => "rectangle",
            RoiShape::Oval { .. } => "oval",
            RoiShape::Polygon(_) => "polygon",
            RoiShape::Freehand(_) => "freehand",
            RoiShape::Line { .. } => "line",
            RoiShape::Composite(_) => "composite",
        }
    }
}
