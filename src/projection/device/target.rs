use crate::projection::common::error::Result;
use crate::projection::mask::MaskImage;

/// A light-targeting device addressed in device-space coordinates.
pub trait ProjectionDevice {
    fn name(&self) -> &str;

    fn x_minimum(&self) -> f64;
    fn y_minimum(&self) -> f64;
    fn x_range(&self) -> f64;
    fn y_range(&self) -> f64;

    /// Current exposure in microseconds
    fn exposure_us(&self) -> Result<u64>;
    fn set_exposure_us(&mut self, exposure_us: u64) -> Result<()>;

    fn display_spot(&mut self, x: f64, y: f64) -> Result<()>;

    /// Raster (mask) capability. Spot-only devices keep the default `None`.
    fn raster(&mut self) -> Option<&mut dyn RasterDevice> {
        None
    }

    fn supports_raster(&mut self) -> bool {
        self.raster().is_some()
    }
}

/// A device that can show a whole mask image at once.
pub trait RasterDevice {
    /// Addressable raster as (width, height) in pixels
    fn raster_size(&self) -> (usize, usize);
    fn display_image(&mut self, image: &MaskImage) -> Result<()>;
}
