use rayon::prelude::*;
use tracing::{debug, info, instrument};

use crate::projection::calibration::{CellMap, PointMapper};
use crate::projection::common::error::Result;
use crate::projection::geometry::Point2;
use crate::projection::mask::types::{MaskImage, MaskStats, MaskTransformConfig, check_dimensions};

/// Output of [`MaskTransformer::transform_with_stats`]
#[derive(Debug, Clone)]
pub struct MaskTransform {
    pub image: MaskImage,
    pub stats: MaskStats,
}

/// Maps binary masks from image space into a device raster.
///
/// Every input pixel with a value > 0 at (x, y) is mapped as the point (x, y).
/// The mapped coordinates are truncated towards zero; if they land inside the
/// output raster that pixel is set to the configured "on" value, otherwise the
/// pixel is dropped. Pixels the mapper rejects are dropped as well, so only a
/// buffer/dimension mismatch fails the whole call.
pub struct MaskTransformer {
    config: MaskTransformConfig,
}

impl Default for MaskTransformer {
    fn default() -> Self {
        Self::new(MaskTransformConfig::default())
    }
}

impl MaskTransformer {
    pub fn new(config: MaskTransformConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MaskTransformConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: MaskTransformConfig) {
        self.config = config;
    }

    /// Transforms a raw buffer of `input_width * input_height` pixels into a
    /// buffer of `output_width * output_height` pixels.
    pub fn transform<M: PointMapper + Sync + ?Sized>(
        &self,
        mapper: &M,
        input: &[u8],
        input_width: usize,
        input_height: usize,
        output_width: usize,
        output_height: usize,
    ) -> Result<Vec<u8>> {
        let result = self.transform_buffer(mapper, input, input_width, input_height, output_width, output_height)?;
        Ok(result.image.data)
    }

    pub fn transform_image<M: PointMapper + Sync + ?Sized>(
        &self,
        mapper: &M,
        input: &MaskImage,
        output_width: usize,
        output_height: usize,
    ) -> Result<MaskImage> {
        Ok(self.transform_with_stats(mapper, input, output_width, output_height)?.image)
    }

    pub fn transform_with_stats<M: PointMapper + Sync + ?Sized>(
        &self,
        mapper: &M,
        input: &MaskImage,
        output_width: usize,
        output_height: usize,
    ) -> Result<MaskTransform> {
        self.transform_buffer(mapper, &input.data, input.width, input.height, output_width, output_height)
    }

    /// Like [`transform`](Self::transform), also returning pixel accounting.
    #[instrument(skip(self, mapper, input), fields(input_size = input.len()))]
    pub fn transform_buffer<M: PointMapper + Sync + ?Sized>(
        &self,
        mapper: &M,
        input: &[u8],
        input_width: usize,
        input_height: usize,
        output_width: usize,
        output_height: usize,
    ) -> Result<MaskTransform> {
        check_dimensions(input.len(), input_width, input_height)?;

        let mut output = MaskImage::blank(output_width, output_height);
        let mut stats = MaskStats::default();
        if input.is_empty() {
            return Ok(MaskTransform { image: output, stats });
        }

        let target = RasterTarget { width: output_width, height: output_height };

        if self.config.parallel && input.len() >= self.config.parallel_threshold {
            debug!("Mapping {} pixels on the rayon pool", input.len());
            let rows: Vec<(Vec<usize>, MaskStats)> = input
                .par_chunks(input_width)
                .enumerate()
                .map(|(y, row)| {
                    let mut hits = Vec::new();
                    let mut row_stats = MaskStats::default();
                    map_row(mapper, row, y, &target, &mut row_stats, |index| hits.push(index));
                    (hits, row_stats)
                })
                .collect();

            for (hits, row_stats) in rows {
                for index in hits {
                    output.data[index] = self.config.on_value;
                }
                stats.merge(&row_stats);
            }
        } else {
            let on_value = self.config.on_value;
            let data = &mut output.data;
            for (y, row) in input.chunks(input_width).enumerate() {
                map_row(mapper, row, y, &target, &mut stats, |index| data[index] = on_value);
            }
        }

        info!(
            on_pixels = stats.on_pixels,
            written = stats.written,
            dropped = stats.dropped(),
            "Mask transform complete: {}x{} -> {}x{}",
            input_width,
            input_height,
            output_width,
            output_height
        );
        Ok(MaskTransform { image: output, stats })
    }
}

/// Transforms a mask with the default configuration.
///
/// Fails with [`MappingError::InvalidMaskDimensions`](crate::projection::MappingError::InvalidMaskDimensions)
/// when `input.len() != input_width * input_height`.
pub fn transform_mask(
    cells: &CellMap,
    input: &[u8],
    input_width: usize,
    input_height: usize,
    output_width: usize,
    output_height: usize,
) -> Result<Vec<u8>> {
    MaskTransformer::default().transform(
        cells,
        input,
        input_width,
        input_height,
        output_width,
        output_height,
    )
}

struct RasterTarget {
    width: usize,
    height: usize,
}

impl RasterTarget {
    /// Output index for a mapped point, truncating towards zero.
    fn index_of(&self, point: &Point2) -> Option<usize> {
        if !point.x.is_finite() || !point.y.is_finite() {
            return None;
        }
        let xt = point.x.trunc();
        let yt = point.y.trunc();
        if xt < 0.0 || yt < 0.0 || xt >= self.width as f64 || yt >= self.height as f64 {
            return None;
        }
        Some(xt as usize + yt as usize * self.width)
    }
}

fn map_row<M: PointMapper + ?Sized>(
    mapper: &M,
    row: &[u8],
    y: usize,
    target: &RasterTarget,
    stats: &mut MaskStats,
    mut hit: impl FnMut(usize),
) {
    for (x, _) in row.iter().enumerate().filter(|(_, v)| **v > 0) {
        stats.on_pixels += 1;
        match mapper.map_point(&Point2::new(x as f64, y as f64)) {
            Ok(mapped) => match target.index_of(&mapped) {
                Some(index) => {
                    stats.written += 1;
                    hit(index);
                }
                None => stats.out_of_range += 1,
            },
            Err(_) => stats.unmappable += 1,
        }
    }
}
