//! Operations that combine calibration data with a projection device.

use tracing::{debug, info, instrument, warn};

use crate::projection::calibration::CellMap;
use crate::projection::common::error::{MappingError, Result};
use crate::projection::device::target::ProjectionDevice;
use crate::projection::mask::{MaskStats, MaskTransformer};
use crate::projection::roi::{BatchPolicy, NormalizeConfig, PolygonBatch, RoiShape, rois_as_polygons, transform_polygons};

/// Illuminates a spot at device coordinates (x, y).
///
/// Points outside `[min, min + range)` on either axis are ignored. Returns
/// whether the spot was shown.
pub fn display_spot(device: &mut dyn ProjectionDevice, x: f64, y: f64) -> Result<bool> {
    let x_min = device.x_minimum();
    let y_min = device.y_minimum();
    let in_range = x >= x_min
        && x < x_min + device.x_range()
        && y >= y_min
        && y < y_min + device.y_range();

    if !in_range {
        debug!(x, y, device = device.name(), "Spot outside device range, ignored");
        return Ok(false);
    }
    device.display_spot(x, y)?;
    Ok(true)
}

/// Illuminates the centre of the device range.
pub fn display_center_spot(device: &mut dyn ProjectionDevice) -> Result<()> {
    let x = device.x_range() / 2.0 + device.x_minimum();
    let y = device.y_range() / 2.0 + device.y_minimum();
    device.display_spot(x, y)
}

/// Sets the exposure, truncated to whole microseconds.
///
/// The device is only written when the value changes. Returns whether it did.
pub fn set_exposure(device: &mut dyn ProjectionDevice, interval_us: f64) -> Result<bool> {
    let new_exposure = interval_us as u64;
    if device.exposure_us()? == new_exposure {
        return Ok(false);
    }
    device.set_exposure_us(new_exposure)?;
    info!(exposure_us = new_exposure, device = device.name(), "Exposure updated");
    Ok(true)
}

/// Normalizes editor shapes and maps them into device space.
///
/// Normalization errors abort before anything is mapped; mapping failures are
/// reported per polygon in the returned batch.
pub fn transform_rois(
    rois: &[RoiShape],
    cells: &CellMap,
    normalize: &NormalizeConfig,
    policy: BatchPolicy,
) -> Result<PolygonBatch> {
    let polygons = rois_as_polygons(rois, normalize)?;
    Ok(transform_polygons(cells, &polygons, policy))
}

/// Transforms an image-space mask into the device raster and uploads it.
///
/// Fails with [`MappingError::RasterUnsupported`] for spot-only devices and
/// with [`MappingError::InvalidMaskDimensions`] when the buffer does not match
/// `width * height`; in both cases nothing is sent to the device.
#[instrument(skip(cells, device, image, transformer), fields(device = device.name()))]
pub fn transform_and_set_mask(
    cells: &CellMap,
    device: &mut dyn ProjectionDevice,
    image: &[u8],
    width: usize,
    height: usize,
    transformer: &MaskTransformer,
) -> Result<MaskStats> {
    let name = device.name().to_string();
    let Some(raster) = device.raster() else {
        warn!(device = %name, "Mask requested for a device without raster support");
        return Err(MappingError::RasterUnsupported(name));
    };

    let (raster_width, raster_height) = raster.raster_size();
    let result = transformer.transform_buffer(cells, image, width, height, raster_width, raster_height)?;
    raster.display_image(&result.image)?;

    debug!(device = %name, "Mask uploaded");
    Ok(result.stats)
}
