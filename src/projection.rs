//! Piecewise-affine mapping between image space and device space
//!
//! A calibration splits image space into polygonal cells, each with its own
//! affine transform to device space. Points, ROI polygons and binary masks are
//! all mapped through the same cell lookup: containment first, nearest cell
//! centroid as a fallback.

pub mod common;
pub mod geometry;
pub mod calibration;
pub mod roi;
pub mod mask;
pub mod device;

pub use common::{
    MappingError,
    Result,
};

pub use geometry::{
    AffineTransform,
    Point2,
    Polygon,
};

pub use calibration::{
    Cell,
    CellId,
    CellLookup,
    CellMap,
    MatchKind,
    PointMapper,
    locate_cell,
    map_point,
};

pub use roi::{
    BatchPolicy,
    NormalizeConfig,
    NormalizeConfigBuilder,
    PolygonBatch,
    PolygonFailure,
    RoiShape,
    roi_as_polygons,
    rois_as_polygons,
    transform_polygon,
    transform_polygons,
};

pub use mask::{
    MaskImage,
    MaskStats,
    MaskTransform,
    MaskTransformConfig,
    MaskTransformConfigBuilder,
    MaskTransformer,
    transform_mask,
};

pub use device::{
    ProjectionDevice,
    RasterDevice,
    display_center_spot,
    display_spot,
    set_exposure,
    transform_and_set_mask,
    transform_rois,
};
