//! Canonicalization of editor shapes into plain polygons.
//!
//! Only shapes with an unambiguous polygon form are accepted. Anything else is
//! reported as [`MappingError::UnsupportedShape`] so it never reaches the mapper.

use std::f64::consts::TAU;

use tracing::debug;

use crate::projection::common::error::{MappingError, Result};
use crate::projection::geometry::{Point2, Polygon};
use crate::projection::roi::types::RoiShape;

/// Settings for ROI normalization
#[derive(Debug, Clone)]
pub struct NormalizeConfig {
    /// Number of vertices used to approximate an oval
    pub ellipse_segments: usize,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self { ellipse_segments: 72 }
    }
}

impl NormalizeConfig {
    pub fn builder() -> NormalizeConfigBuilder {
        NormalizeConfigBuilder::default()
    }
}

/// Builder for NormalizeConfig
#[derive(Default)]
pub struct NormalizeConfigBuilder {
    ellipse_segments: Option<usize>,
}

impl NormalizeConfigBuilder {
    pub fn ellipse_segments(mut self, segments: usize) -> Self {
        self.ellipse_segments = Some(segments);
        self
    }

    pub fn build(self) -> NormalizeConfig {
        let default = NormalizeConfig::default();
        NormalizeConfig {
            // An ellipse needs at least three vertices
            ellipse_segments: self.ellipse_segments.unwrap_or(default.ellipse_segments).max(3),
        }
    }
}

/// Converts one shape into the polygons that represent it.
///
/// A point cluster yields one single-vertex polygon per point, every other
/// supported shape exactly one polygon.
pub fn roi_as_polygons(roi: &RoiShape, config: &NormalizeConfig) -> Result<Vec<Polygon>> {
    match roi {
        RoiShape::Point(points) => points
            .iter()
            .map(|p| Polygon::new(vec![*p]))
            .collect(),
        RoiShape::Rectangle { x, y, width, height } => {
            Ok(vec![Polygon::rectangle(*x, *y, *width, *height)])
        }
        RoiShape::Oval { x, y, width, height } => {
            Ok(vec![ellipse_polygon(*x, *y, *width, *height, config.ellipse_segments)?])
        }
        RoiShape::Polygon(vertices) | RoiShape::Freehand(vertices) => {
            Ok(vec![Polygon::new(vertices.clone())?])
        }
        RoiShape::Line { .. } | RoiShape::Composite(_) => {
            Err(MappingError::UnsupportedShape(roi.kind().to_string()))
        }
    }
}

/// Normalizes a list of shapes, failing on the first unsupported one.
pub fn rois_as_polygons(rois: &[RoiShape], config: &NormalizeConfig) -> Result<Vec<Polygon>> {
    let mut polygons = Vec::with_capacity(rois.len());
    for roi in rois {
        polygons.extend(roi_as_polygons(roi, config)?);
    }
    debug!("Normalized {} ROIs into {} polygons", rois.len(), polygons.len());
    Ok(polygons)
}

/// Ellipse inscribed in the bounding box, major axis along the longer side.
fn ellipse_polygon(x: f64, y: f64, width: f64, height: f64, segments: usize) -> Result<Polygon> {
    if !(width > 0.0 && height > 0.0) {
        return Err(MappingError::UnsupportedShape(format!(
            "oval with empty bounds {}x{}",
            width, height
        )));
    }

    let center = Point2::new(x + width / 2.0, y + height / 2.0);
    let (rx, ry) = (width / 2.0, height / 2.0);
    let segments = segments.max(3);
    let vertices = (0..segments)
        .map(|i| {
            let t = TAU * i as f64 / segments as f64;
            Point2::new(center.x + rx * t.cos(), center.y + ry * t.sin())
        })
        .collect();
    Polygon::new(vertices)
}
