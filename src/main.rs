use projector_map_rs::logger;
use projector_map_rs::projection::{
    AffineTransform, BatchPolicy, CellMap, MaskImage, MaskTransformConfig, MaskTransformer,
    NormalizeConfig, Point2, Polygon, ProjectionDevice, RasterDevice, Result, RoiShape,
    display_center_spot, map_point, transform_and_set_mask, transform_rois,
};

use tracing::{info, warn};

/// Stand-in SLM that logs what it would project.
struct LoggingSlm {
    width: usize,
    height: usize,
    exposure_us: u64,
}

impl RasterDevice for LoggingSlm {
    fn raster_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn display_image(&mut self, image: &MaskImage) -> Result<()> {
        info!("SLM image {}x{} with {} lit pixels", image.width, image.height, image.count_on());
        Ok(())
    }
}

impl ProjectionDevice for LoggingSlm {
    fn name(&self) -> &str {
        "logging-slm"
    }

    fn x_minimum(&self) -> f64 {
        0.0
    }

    fn y_minimum(&self) -> f64 {
        0.0
    }

    fn x_range(&self) -> f64 {
        self.width as f64
    }

    fn y_range(&self) -> f64 {
        self.height as f64
    }

    fn exposure_us(&self) -> Result<u64> {
        Ok(self.exposure_us)
    }

    fn set_exposure_us(&mut self, exposure_us: u64) -> Result<()> {
        self.exposure_us = exposure_us;
        Ok(())
    }

    fn display_spot(&mut self, x: f64, y: f64) -> Result<()> {
        info!("SLM spot at ({:.2}, {:.2})", x, y);
        Ok(())
    }

    fn raster(&mut self) -> Option<&mut dyn RasterDevice> {
        Some(self)
    }
}

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting projector mapping demo...");

    let cells = CellMap::from_pairs([
        (Polygon::rectangle(0.0, 0.0, 10.0, 10.0), AffineTransform::identity()),
        (Polygon::rectangle(10.0, 0.0, 10.0, 10.0), AffineTransform::translation(100.0, 0.0)),
    ]);
    info!("Calibration loaded with {} cells", cells.len());

    for p in [Point2::new(5.0, 5.0), Point2::new(15.0, 5.0), Point2::new(25.0, 5.0)] {
        let mapped = map_point(&cells, &p)?;
        info!("({}, {}) -> ({}, {})", p.x, p.y, mapped.x, mapped.y);
    }

    let rois = vec![
        RoiShape::Rectangle { x: 0.0, y: 0.0, width: 10.0, height: 10.0 },
        RoiShape::Oval { x: 12.0, y: 2.0, width: 6.0, height: 4.0 },
    ];
    let batch = transform_rois(&rois, &cells, &NormalizeConfig::default(), BatchPolicy::AbortRemaining)?;
    for failure in &batch.failures {
        warn!("ROI {} could not be mapped: {}", failure.index, failure.error);
    }
    for (index, polygon) in &batch.transformed {
        info!("ROI {} mapped to {} device vertices", index, polygon.len());
    }

    let mut device = LoggingSlm { width: 200, height: 10, exposure_us: 0 };
    display_center_spot(&mut device)?;

    let mut mask = MaskImage::blank(20, 10);
    for x in 12..18 {
        mask.set(x, 5, 1);
    }
    let transformer = MaskTransformer::new(MaskTransformConfig::builder().parallel(true).build());
    let stats = transform_and_set_mask(&cells, &mut device, &mask.data, mask.width, mask.height, &transformer)?;
    info!(
        "Mask transform: {} written, {} dropped",
        stats.written,
        stats.dropped()
    );

    Ok(())
}
