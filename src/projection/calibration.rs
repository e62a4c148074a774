//! Calibration data and point mapping
//!
//! A [`CellMap`] partitions image space into polygonal cells, each carrying the
//! affine transform into device space that is valid inside it. [`PointMapper`]
//! is the primitive every ROI and mask transform funnels through.

mod cell_map;
mod point_mapper;


pub use cell_map::{Cell, CellId, CellMap};
pub use point_mapper::{CellLookup, MatchKind, PointMapper, locate_cell, map_point};
