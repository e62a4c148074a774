//! Mask transformation module
//!
//! Rasterizes binary masks from image space into device space one pixel at a
//! time, using the same point mapping as ROI transforms.

mod types;
mod transformer;


pub use types::{MaskImage, MaskStats, MaskTransformConfig, MaskTransformConfigBuilder};
pub use transformer::{MaskTransform, MaskTransformer, transform_mask};
