//! Projection device boundary
//!
//! The mapping core never talks to hardware directly. Devices are reached
//! through [`ProjectionDevice`], and raster support is a capability queried at
//! runtime rather than a concrete device type.

mod target;
mod actions;

#[cfg(test)]
mod tests;

pub use target::{ProjectionDevice, RasterDevice};
pub use actions::{
    display_center_spot, display_spot, set_exposure, transform_and_set_mask, transform_rois,
};
