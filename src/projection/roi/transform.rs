use tracing::{debug, instrument};

use crate::projection::calibration::PointMapper;
use crate::projection::common::error::{MappingError, Result};
use crate::projection::geometry::Polygon;

/// What a batch transform does after a polygon fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPolicy {
    /// Stop at the first failed polygon; later polygons are left unprocessed.
    #[default]
    AbortRemaining,
    /// Record the failure and carry on with the next polygon.
    SkipFailed,
}

/// A polygon that could not be transformed, by position in the input batch.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonFailure {
    pub index: usize,
    pub error: MappingError,
}

/// Result of a batch transform.
#[derive(Debug, Clone, Default)]
pub struct PolygonBatch {
    /// Successfully transformed polygons with their input positions, in input order.
    pub transformed: Vec<(usize, Polygon)>,
    pub failures: Vec<PolygonFailure>,
    /// Polygons never attempted because the batch was aborted.
    pub unprocessed: usize,
}

impl PolygonBatch {
    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> {
        self.transformed.iter().map(|(_, polygon)| polygon)
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.unprocessed == 0
    }

    /// All polygons in input order, or the first failure.
    pub fn into_result(self) -> std::result::Result<Vec<Polygon>, PolygonFailure> {
        match self.failures.into_iter().next() {
            Some(failure) => Err(failure),
            None => Ok(self.transformed.into_iter().map(|(_, polygon)| polygon).collect()),
        }
    }
}

/// Maps every vertex of `polygon`, keeping count and order.
///
/// Either every vertex maps or the whole polygon fails; no partial polygon is
/// ever returned.
pub fn transform_polygon<M: PointMapper + ?Sized>(mapper: &M, polygon: &Polygon) -> Result<Polygon> {
    let vertices = polygon
        .vertices()
        .iter()
        .map(|vertex| mapper.map_point(vertex))
        .collect::<Result<Vec<_>>>()?;
    Polygon::new(vertices)
}

/// Transforms each polygon independently.
///
/// Polygons already transformed are always kept; `policy` decides whether the
/// rest of the batch is attempted after a failure.
#[instrument(skip(mapper, polygons), fields(count = polygons.len()))]
pub fn transform_polygons<M: PointMapper + ?Sized>(
    mapper: &M,
    polygons: &[Polygon],
    policy: BatchPolicy,
) -> PolygonBatch {
    let mut batch = PolygonBatch::default();

    for (index, polygon) in polygons.iter().enumerate() {
        match transform_polygon(mapper, polygon) {
            Ok(transformed) => batch.transformed.push((index, transformed)),
            Err(error) => {
                debug!(index, %error, "Polygon transform failed");
                batch.failures.push(PolygonFailure { index, error });
                if policy == BatchPolicy::AbortRemaining {
                    batch.unprocessed = polygons.len() - index - 1;
                    break;
                }
            }
        }
    }

    debug!(
        transformed = batch.transformed.len(),
        failed = batch.failures.len(),
        unprocessed = batch.unprocessed,
        "Polygon batch complete"
    );
    batch
}
