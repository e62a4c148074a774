//! Region-of-interest handling
//!
//! Editor shapes are first normalized into plain polygons, which are then
//! mapped vertex by vertex into device space.

mod types;
mod normalize;
mod transform;


pub use types::RoiShape;
pub use normalize::{NormalizeConfig, NormalizeConfigBuilder, roi_as_polygons, rois_as_polygons};
pub use transform::{BatchPolicy, PolygonBatch, PolygonFailure, transform_polygon, transform_polygons};
