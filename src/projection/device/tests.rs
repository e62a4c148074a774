use std::sync::{Arc, Mutex};

use crate::projection::calibration::CellMap;
use crate::projection::common::error::{MappingError, Result};
use crate::projection::device::{
    ProjectionDevice, RasterDevice, display_center_spot, display_spot, set_exposure,
    transform_and_set_mask, transform_rois,
};
use crate::projection::geometry::{AffineTransform, Point2, Polygon};
use crate::projection::mask::{MaskImage, MaskTransformer};
use crate::projection::roi::{BatchPolicy, NormalizeConfig, RoiShape};

#[derive(Default)]
struct Recorded {
    spots: Vec<(f64, f64)>,
    exposure_writes: Vec<u64>,
    images: Vec<MaskImage>,
}

struct MockRaster {
    width: usize,
    height: usize,
    recorded: Arc<Mutex<Recorded>>,
    should_fail: bool,
}

impl RasterDevice for MockRaster {
    fn raster_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn display_image(&mut self, image: &MaskImage) -> Result<()> {
        if self.should_fail {
            return Err(MappingError::Device("Mock upload error".to_string()));
        }
        self.recorded.lock().unwrap().images.push(image.clone());
        Ok(())
    }
}

struct MockDevice {
    exposure: u64,
    recorded: Arc<Mutex<Recorded>>,
    raster: Option<MockRaster>,
}

impl MockDevice {
    fn galvo() -> (Self, Arc<Mutex<Recorded>>) {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let device = MockDevice { exposure: 100, recorded: recorded.clone(), raster: None };
        (device, recorded)
    }

    fn slm(width: usize, height: usize, should_fail: bool) -> (Self, Arc<Mutex<Recorded>>) {
        let (mut device, recorded) = Self::galvo();
        device.raster = Some(MockRaster { width, height, recorded: recorded.clone(), should_fail });
        (device, recorded)
    }
}

impl ProjectionDevice for MockDevice {
    fn name(&self) -> &str {
        if self.raster.is_some() { "mock-slm" } else { "mock-galvo" }
    }

    fn x_minimum(&self) -> f64 {
        10.0
    }

    fn y_minimum(&self) -> f64 {
        20.0
    }

    fn x_range(&self) -> f64 {
        200.0
    }

    fn y_range(&self) -> f64 {
        100.0
    }

    fn exposure_us(&self) -> Result<u64> {
        Ok(self.exposure)
    }

    fn set_exposure_us(&mut self, exposure_us: u64) -> Result<()> {
        self.exposure = exposure_us;
        self.recorded.lock().unwrap().exposure_writes.push(exposure_us);
        Ok(())
    }

    fn display_spot(&mut self, x: f64, y: f64) -> Result<()> {
        self.recorded.lock().unwrap().spots.push((x, y));
        Ok(())
    }

    fn raster(&mut self) -> Option<&mut dyn RasterDevice> {
        self.raster.as_mut().map(|r| r as &mut dyn RasterDevice)
    }
}

fn two_cells() -> CellMap {
    CellMap::from_pairs([
        (Polygon::rectangle(0.0, 0.0, 10.0, 10.0), AffineTransform::identity()),
        (Polygon::rectangle(10.0, 0.0, 10.0, 10.0), AffineTransform::translation(100.0, 0.0)),
    ])
}

#[test]
fn test_display_spot_within_range() {
    let (mut device, recorded) = MockDevice::galvo();
    assert!(display_spot(&mut device, 10.0, 20.0).unwrap());
    assert!(display_spot(&mut device, 209.9, 119.9).unwrap());
    assert_eq!(recorded.lock().unwrap().spots, vec![(10.0, 20.0), (209.9, 119.9)]);
}

#[test]
fn test_display_spot_outside_range_ignored() {
    let (mut device, recorded) = MockDevice::galvo();
    assert!(!display_spot(&mut device, 9.9, 50.0).unwrap());
    assert!(!display_spot(&mut device, 210.0, 50.0).unwrap());
    assert!(!display_spot(&mut device, 50.0, 120.0).unwrap());
    assert!(recorded.lock().unwrap().spots.is_empty());
}

#[test]
fn test_display_center_spot() {
    let (mut device, recorded) = MockDevice::galvo();
    display_center_spot(&mut device).unwrap();
    assert_eq!(recorded.lock().unwrap().spots, vec![(110.0, 70.0)]);
}

#[test]
fn test_set_exposure_only_on_change() {
    let (mut device, recorded) = MockDevice::galvo();
    assert!(!set_exposure(&mut device, 100.7).unwrap());
    assert!(set_exposure(&mut device, 250.0).unwrap());
    assert!(!set_exposure(&mut device, 250.0).unwrap());
    assert_eq!(recorded.lock().unwrap().exposure_writes, vec![250]);
}

#[test]
fn test_capability_check() {
    let (mut galvo, _) = MockDevice::galvo();
    let (mut slm, _) = MockDevice::slm(4, 4, false);
    assert!(!galvo.supports_raster());
    assert!(slm.supports_raster());
}

#[test]
fn test_mask_rejected_for_spot_device() {
    let (mut device, recorded) = MockDevice::galvo();
    let result = transform_and_set_mask(
        &two_cells(),
        &mut device,
        &[1u8; 200],
        20,
        10,
        &MaskTransformer::default(),
    );
    assert_eq!(result, Err(MappingError::RasterUnsupported("mock-galvo".to_string())));
    assert!(recorded.lock().unwrap().images.is_empty());
}

#[test]
fn test_mask_uploaded_to_raster_device() {
    let (mut device, recorded) = MockDevice::slm(200, 10, false);
    let mut input = MaskImage::blank(20, 10);
    input.set(15, 5, 1);

    let stats = transform_and_set_mask(
        &two_cells(),
        &mut device,
        &input.data,
        20,
        10,
        &MaskTransformer::default(),
    )
    .unwrap();

    assert_eq!(stats.written, 1);
    let recorded = recorded.lock().unwrap();
    assert_eq!(recorded.images.len(), 1);
    let image = &recorded.images[0];
    assert_eq!((image.width, image.height), (200, 10));
    assert_eq!(image.on_pixels().collect::<Vec<_>>(), vec![(115, 5)]);
}

#[test]
fn test_mask_dimension_mismatch_not_uploaded() {
    let (mut device, recorded) = MockDevice::slm(200, 10, false);
    let result = transform_and_set_mask(
        &two_cells(),
        &mut device,
        &[1u8; 10],
        20,
        10,
        &MaskTransformer::default(),
    );
    assert!(matches!(result, Err(MappingError::InvalidMaskDimensions { .. })));
    assert!(recorded.lock().unwrap().images.is_empty());
}

#[test]
fn test_mask_upload_failure_propagates() {
    let (mut device, _) = MockDevice::slm(200, 10, true);
    let result = transform_and_set_mask(
        &two_cells(),
        &mut device,
        &[0u8; 200],
        20,
        10,
        &MaskTransformer::default(),
    );
    assert!(matches!(result, Err(MappingError::Device(_))));
}

#[test]
fn test_transform_rois_normalizes_then_maps() {
    let rois = vec![
        RoiShape::Rectangle { x: 0.0, y: 0.0, width: 10.0, height: 10.0 },
        RoiShape::Point(vec![Point2::new(15.0, 5.0), Point2::new(25.0, 5.0)]),
    ];
    let batch = transform_rois(&rois, &two_cells(), &NormalizeConfig::default(), BatchPolicy::AbortRemaining)
        .unwrap();

    let polygons = batch.into_result().unwrap();
    assert_eq!(polygons.len(), 3);
    assert_eq!(
        polygons[0].vertices(),
        &[
            Point2::new(0.0, 0.0),
            Point2::new(110.0, 0.0),
            Point2::new(110.0, 10.0),
            Point2::new(0.0, 10.0),
        ]
    );
    assert_eq!(polygons[1].vertices(), &[Point2::new(115.0, 5.0)]);
    assert_eq!(polygons[2].vertices(), &[Point2::new(125.0, 5.0)]);
}

#[test]
fn test_transform_rois_unsupported_shape() {
    let rois = vec![RoiShape::Line { start: Point2::new(0.0, 0.0), end: Point2::new(3.0, 3.0) }];
    let result = transform_rois(&rois, &two_cells(), &NormalizeConfig::default(), BatchPolicy::SkipFailed);
    assert!(matches!(result, Err(MappingError::UnsupportedShape(_))));
}

#[test]
fn test_transform_rois_empty_calibration_reports_failure() {
    let rois = vec![
        RoiShape::Polygon(vec![Point2::new(1.0, 1.0), Point2::new(2.0, 1.0), Point2::new(2.0, 2.0)]),
        RoiShape::Rectangle { x: 0.0, y: 0.0, width: 1.0, height: 1.0 },
    ];
    let batch = transform_rois(&rois, &CellMap::new(), &NormalizeConfig::default(), BatchPolicy::AbortRemaining)
        .unwrap();
    assert!(batch.transformed.is_empty());
    assert_eq!(batch.failures.len(), 1);
    assert_eq!(batch.failures[0].index, 0);
    assert_eq!(batch.unprocessed, 1);
}
