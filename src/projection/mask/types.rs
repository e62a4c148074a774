//! Mask data and transform configuration types

use crate::projection::common::error::{MappingError, Result};

/// Intensity written for every "on" pixel of a transformed mask.
pub const DEFAULT_ON_VALUE: u8 = 127;

/// Dense single-channel mask, row-major, index = x + y * width.
///
/// Only the on/off predicate (value > 0) matters to the transforms.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskImage {
    /// Width of the mask in pixels
    pub width: usize,
    /// Height of the mask in pixels
    pub height: usize,
    /// Pixel intensities
    pub data: Vec<u8>,
}

impl MaskImage {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        check_dimensions(data.len(), width, height)?;
        Ok(Self { width, height, data })
    }

    /// All-off mask
    pub fn blank(width: usize, height: usize) -> Self {
        Self { width, height, data: vec![0; width * height] }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(x + y * self.width).copied()
    }

    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x < self.width && y < self.height {
            self.data[x + y * self.width] = value;
        }
    }

    pub fn is_on(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some_and(|v| v > 0)
    }

    /// Coordinates of every "on" pixel, row by row.
    pub fn on_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width.max(1);
        self.data
            .iter()
            .enumerate()
            .filter(|(_, v)| **v > 0)
            .map(move |(i, _)| (i % width, i / width))
    }

    pub fn count_on(&self) -> usize {
        self.data.iter().filter(|v| **v > 0).count()
    }
}

pub(crate) fn check_dimensions(len: usize, width: usize, height: usize) -> Result<()> {
    if width.checked_mul(height) != Some(len) {
        return Err(MappingError::InvalidMaskDimensions { len, width, height });
    }
    Ok(())
}

/// Per-call pixel accounting for a mask transform
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaskStats {
    /// "On" pixels found in the input
    pub on_pixels: usize,
    /// Input pixels that landed inside the output raster
    pub written: usize,
    /// Input pixels whose mapped position fell outside the output raster
    pub out_of_range: usize,
    /// Input pixels the mapper could not place at all
    pub unmappable: usize,
}

impl MaskStats {
    pub fn merge(&mut self, other: &MaskStats) {
        self.on_pixels += other.on_pixels;
        self.written += other.written;
        self.out_of_range += other.out_of_range;
        self.unmappable += other.unmappable;
    }

    pub fn dropped(&self) -> usize {
        self.out_of_range + self.unmappable
    }
}

/// Configuration for mask transformation
#[derive(Debug, Clone)]
pub struct MaskTransformConfig {
    /// Intensity written to every output pixel hit by an input pixel
    pub on_value: u8,
    /// Whether to map rows on the rayon thread pool
    pub parallel: bool,
    /// Minimum input pixel count before the parallel path is taken
    pub parallel_threshold: usize,
}

impl Default for MaskTransformConfig {
    fn default() -> Self {
        Self {
            on_value: DEFAULT_ON_VALUE,
            parallel: false,
            parallel_threshold: 100_000,
        }
    }
}

impl MaskTransformConfig {
    pub fn builder() -> MaskTransformConfigBuilder {
        MaskTransformConfigBuilder::default()
    }
}

/// Builder for MaskTransformConfig
#[derive(Default)]
pub struct MaskTransformConfigBuilder {
    on_value: Option<u8>,
    parallel: Option<bool>,
    parallel_threshold: Option<usize>,
}

impl MaskTransformConfigBuilder {
    pub fn on_value(mut self, value: u8) -> Self {
        self.on_value = Some(value);
        self
    }

    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = Some(enable);
        self
    }

    pub fn parallel_threshold(mut self, pixels: usize) -> Self {
        self.parallel_threshold = Some(pixels);
        self
    }

    pub fn build(self) -> MaskTransformConfig {
        let default = MaskTransformConfig::default();
        MaskTransformConfig {
            // Zero reads as off
            on_value: self.on_value.unwrap_or(default.on_value).max(1),
            parallel: self.parallel.unwrap_or(default.parallel),
            parallel_threshold: self.parallel_threshold.unwrap_or(default.parallel_threshold),
        }
    }
}
