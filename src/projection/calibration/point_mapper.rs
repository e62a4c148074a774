use tracing::trace;

use crate::projection::calibration::cell_map::{Cell, CellMap};
use crate::projection::common::error::{MappingError, Result};
use crate::projection::geometry::Point2;

/// Maps image-space points into device space.
///
/// [`CellMap`] is the production implementation; the trait exists so ROI and
/// mask transforms can be driven by any mapper.
pub trait PointMapper {
    fn map_point(&self, point: &Point2) -> Result<Point2>;
}

/// How [`locate_cell`] picked its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The point lies inside the cell's polygon.
    Contained,
    /// No cell contains the point; this cell has the closest centroid.
    Nearest,
}

#[derive(Debug, Clone, Copy)]
pub struct CellLookup<'a> {
    pub cell: &'a Cell,
    pub kind: MatchKind,
}

/// Finds the cell whose transform applies to `point`.
///
/// The first cell (in insertion order) containing the point wins. If cells
/// overlap, which one is chosen for a point in the overlap is unspecified.
/// When no cell contains the point, the cell with the strictly smallest
/// Euclidean distance from its centroid is chosen, the earliest cell winning
/// ties. Returns `None` only for an empty map.
pub fn locate_cell<'a>(cells: &'a CellMap, point: &Point2) -> Option<CellLookup<'a>> {
    if let Some(cell) = cells.iter().find(|cell| cell.polygon().contains(point)) {
        return Some(CellLookup { cell, kind: MatchKind::Contained });
    }

    let mut iter = cells.iter();
    let first = iter.next()?;
    let mut best = first;
    let mut best_distance = first.centroid().distance(point);
    for cell in iter {
        let distance = cell.centroid().distance(point);
        if distance < best_distance {
            best = cell;
            best_distance = distance;
        }
    }

    trace!(
        x = point.x,
        y = point.y,
        cell = best.id().index(),
        distance = best_distance,
        "Point outside all cells, using nearest centroid"
    );
    Some(CellLookup { cell: best, kind: MatchKind::Nearest })
}

/// Transforms `point` from image space to device space.
///
/// Fails with [`MappingError::UnmappablePoint`] only when `cells` is empty.
pub fn map_point(cells: &CellMap, point: &Point2) -> Result<Point2> {
    let lookup = locate_cell(cells, point).ok_or(MappingError::UnmappablePoint {
        x: point.x,
        y: point.y,
    })?;
    Ok(lookup.cell.transform().apply(point))
}

impl PointMapper for CellMap {
    fn map_point(&self, point: &Point2) -> Result<Point2> {
        map_point(self, point)
    }
}

impl<M: PointMapper + ?Sized> PointMapper for &M {
    fn map_point(&self, point: &Point2) -> Result<Point2> {
        (**self).map_point(point)
    }
}
