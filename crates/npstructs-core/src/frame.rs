use ndarray::Array2;
use num_traits::{Bounded, ToPrimitive};
use std::path::PathBuf;

/// Structure (`true`) / background (`false`) mask, same shape as its frame.
pub type BinaryImage = Array2<bool>;

/// Region labels: 0 is background, each positive value is one structure.
/// Values are unique per region but not guaranteed to be `1..=N` without gaps.
pub type LabelRaster = Array2<u32>;

/// A single grayscale microscopy frame.
/// Pixel values are f32, normally in [0.0, 1.0] of the sensor's full scale.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
    /// Original bit depth before conversion (8 or 16)
    pub original_bit_depth: u8,
    /// Optional per-frame metadata
    pub metadata: FrameMetadata,
}

impl Frame {
    pub fn new(data: Array2<f32>, bit_depth: u8) -> Self {
        Self {
            data,
            original_bit_depth: bit_depth,
            metadata: FrameMetadata::default(),
        }
    }

    /// Build a frame from raw integer counts, normalized by the full scale of `T`.
    ///
    /// A `u16` raster maps 65535 to 1.0, a `u8` raster maps 255 to 1.0.
    pub fn from_counts<T>(counts: &Array2<T>) -> Self
    where
        T: Bounded + ToPrimitive + Copy,
    {
        let full_scale = T::max_value().to_f64().unwrap_or(1.0).max(1.0);
        let data = counts.mapv(|v| (v.to_f64().unwrap_or(0.0) / full_scale) as f32);
        let bit_depth = (std::mem::size_of::<T>() * 8).min(u8::MAX as usize) as u8;
        Self::new(data, bit_depth)
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Brightest pixel value, or 0.0 for an empty frame.
    pub fn max_intensity(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    /// Convert a raw sensor count (ADU) into this frame's normalized units.
    pub fn normalize_counts(&self, counts: f32) -> f32 {
        let full_scale = ((1u64 << self.original_bit_depth.clamp(1, 32)) - 1) as f32;
        counts / full_scale
    }
}

#[derive(Clone, Debug, Default)]
pub struct FrameMetadata {
    /// Position of the frame in its source (page or file index).
    pub frame_index: usize,
}

/// Metadata about the source file or sequence.
#[derive(Clone, Debug)]
pub struct SourceInfo {
    pub filename: PathBuf,
    pub total_frames: usize,
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
}
