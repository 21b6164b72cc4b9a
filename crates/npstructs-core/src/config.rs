use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BALL_SIZE, DEFAULT_DILATION_SIZE, DEFAULT_EROSION_SIZE, DEFAULT_MIN_STRUCTURE_SIZE,
    DEFAULT_SCALE_FACTOR, DEFAULT_SMOOTHING_PASSES, DEFAULT_SMOOTHING_SIGMA, DEFAULT_THRESHOLD,
};
use crate::error::{LocateError, Result};

/// Tunables for turning a raw frame into a binary structure mask.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreprocessParams {
    /// Radius (pixels) of the rolling-ball disk used for background subtraction.
    #[serde(default = "default_ball_size")]
    pub ball_size: usize,
    /// Gaussian sigma for each smoothing pass.
    #[serde(default = "default_sigma")]
    pub sigma: f32,
    /// Number of sequential Gaussian passes.
    #[serde(default = "default_smoothing_passes")]
    pub smoothing_passes: usize,
    /// Linear intensity scale applied before thresholding.
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f32,
    /// Pixels with scaled intensity `>= threshold` become structure.
    #[serde(default = "default_threshold")]
    pub threshold: f32,
}

fn default_ball_size() -> usize {
    DEFAULT_BALL_SIZE
}
fn default_sigma() -> f32 {
    DEFAULT_SMOOTHING_SIGMA
}
fn default_smoothing_passes() -> usize {
    DEFAULT_SMOOTHING_PASSES
}
fn default_scale_factor() -> f32 {
    DEFAULT_SCALE_FACTOR
}
fn default_threshold() -> f32 {
    DEFAULT_THRESHOLD
}

impl Default for PreprocessParams {
    fn default() -> Self {
        Self {
            ball_size: DEFAULT_BALL_SIZE,
            sigma: DEFAULT_SMOOTHING_SIGMA,
            smoothing_passes: DEFAULT_SMOOTHING_PASSES,
            scale_factor: DEFAULT_SCALE_FACTOR,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl PreprocessParams {
    pub fn validate(&self) -> Result<()> {
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(LocateError::invalid_parameter(
                "sigma",
                format!("must be a finite non-negative number, got {}", self.sigma),
            ));
        }
        if !self.scale_factor.is_finite() {
            return Err(LocateError::invalid_parameter(
                "scale_factor",
                format!("must be finite, got {}", self.scale_factor),
            ));
        }
        if !self.threshold.is_finite() {
            return Err(LocateError::invalid_parameter(
                "threshold",
                format!("must be finite, got {}", self.threshold),
            ));
        }
        Ok(())
    }
}

/// Tunables for turning a binary mask into a label raster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentParams {
    /// Side (pixels) of the square used to close gaps in edges.
    #[serde(default = "default_dilation_size")]
    pub dilation_size: usize,
    /// Side (pixels) of the square used to shrink filled structures.
    #[serde(default = "default_erosion_size")]
    pub erosion_size: usize,
    /// Connected components with fewer pixels than this are discarded.
    #[serde(default = "default_min_structure_size")]
    pub min_structure_size: usize,
}

fn default_dilation_size() -> usize {
    DEFAULT_DILATION_SIZE
}
fn default_erosion_size() -> usize {
    DEFAULT_EROSION_SIZE
}
fn default_min_structure_size() -> usize {
    DEFAULT_MIN_STRUCTURE_SIZE
}

impl Default for SegmentParams {
    fn default() -> Self {
        Self {
            dilation_size: DEFAULT_DILATION_SIZE,
            erosion_size: DEFAULT_EROSION_SIZE,
            min_structure_size: DEFAULT_MIN_STRUCTURE_SIZE,
        }
    }
}

impl SegmentParams {
    pub fn validate(&self) -> Result<()> {
        if self.dilation_size == 0 {
            return Err(LocateError::invalid_parameter(
                "dilation_size",
                "structuring element side must be at least 1",
            ));
        }
        if self.erosion_size == 0 {
            return Err(LocateError::invalid_parameter(
                "erosion_size",
                "structuring element side must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Full parameter set for the single-frame pipeline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LocateParams {
    #[serde(default)]
    pub preprocess: PreprocessParams,
    #[serde(default)]
    pub segment: SegmentParams,
}

impl LocateParams {
    pub fn validate(&self) -> Result<()> {
        self.preprocess.validate()?;
        self.segment.validate()
    }
}

/// What the batch driver does when one frame's pipeline fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Return the failure of the lowest failing frame id as an error.
    #[default]
    Abort,
    /// Drop the failed frame's rows and list it in the batch report.
    SkipAndReport,
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Abort => write!(f, "Abort"),
            Self::SkipAndReport => write!(f, "Skip and report"),
        }
    }
}

/// Worker pool settings for the batch driver.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Worker thread count; `None` uses the available processor count.
    #[serde(default)]
    pub workers: Option<usize>,
    #[serde(default)]
    pub on_failure: FailurePolicy,
    /// Keep each frame's label raster and contours in the batch report.
    #[serde(default)]
    pub keep_locations: bool,
}

impl BatchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.workers == Some(0) {
            return Err(LocateError::invalid_parameter(
                "workers",
                "worker pool needs at least one thread",
            ));
        }
        Ok(())
    }

    /// Resolved worker count.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

/// Top-level configuration file layout.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LocateConfig {
    #[serde(default)]
    pub params: LocateParams,
    #[serde(default)]
    pub batch: BatchConfig,
}

impl LocateConfig {
    pub fn validate(&self) -> Result<()> {
        self.params.validate()?;
        self.batch.validate()
    }
}
