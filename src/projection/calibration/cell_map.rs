use crate::projection::geometry::{AffineTransform, Point2, Polygon};

/// Identity of a cell inside its [`CellMap`], assigned in insertion order.
///
/// Cells are distinguished by identity, never by value: two cells with
/// numerically equal polygons are still two cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(usize);

impl CellId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One calibration cell: an image-space polygon and its transform to device space.
#[derive(Debug, Clone)]
pub struct Cell {
    id: CellId,
    polygon: Polygon,
    transform: AffineTransform,
    centroid: Point2,
}

impl Cell {
    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    pub fn transform(&self) -> &AffineTransform {
        &self.transform
    }

    /// Cached [`Polygon::centroid`], the distance proxy for nearest-cell fallback.
    pub fn centroid(&self) -> Point2 {
        self.centroid
    }
}

/// Read-only set of calibration cells for one calibration session.
///
/// Built once by the calibration source and shared immutably by every mapping
/// operation. The map may be empty, in which case no point can be mapped.
/// Overlaps and gaps between cells are not checked.
#[derive(Debug, Clone, Default)]
pub struct CellMap {
    cells: Vec<Cell>,
}

impl CellMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Polygon, AffineTransform)>,
    {
        let cells = pairs
            .into_iter()
            .enumerate()
            .map(|(index, (polygon, transform))| Cell {
                id: CellId(index),
                centroid: polygon.centroid(),
                polygon,
                transform,
            })
            .collect();
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    pub fn get(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<(Polygon, AffineTransform)> for CellMap {
    fn from_iter<I: IntoIterator<Item = (Polygon, AffineTransform)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl<'a> IntoIterator for &'a CellMap {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
