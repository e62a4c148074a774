use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MappingError {
    #[error("Unable to map point ({x}, {y}) to device: calibration has no cells")]
    UnmappablePoint { x: f64, y: f64 },

    #[error("Invalid mask dimensions: buffer holds {len} pixels, expected width={width} x height={height}")]
    InvalidMaskDimensions { len: usize, width: usize, height: usize },

    #[error("Unsupported ROI shape: {0}")]
    UnsupportedShape(String),

    #[error("Polygon must have at least one vertex")]
    EmptyPolygon,

    #[error("Device does not support raster images: {0}")]
    RasterUnsupported(String),

    #[error("Device error: {0}")]
    Device(String),
}

pub type Result<T> = std::result::Result<T, MappingError>;
