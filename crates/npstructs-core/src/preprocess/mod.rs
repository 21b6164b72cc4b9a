//! Raw frame to binary structure mask.
//!
//! Fixed recipe, each step feeding the next:
//! top-hat -> iterated Gaussian -> top-hat -> linear scale -> threshold.

pub mod background;
pub mod smooth;
pub mod threshold;

use ndarray::Array2;

use crate::config::PreprocessParams;
use crate::error::Result;
use crate::frame::BinaryImage;

pub use background::white_tophat;
pub use smooth::smooth;
pub use threshold::{binarize, scale_intensity};

/// Every intermediate raster of one preprocessing run.
#[derive(Clone, Debug)]
pub struct PreprocessStages {
    pub background_removed: Array2<f32>,
    pub smoothed: Array2<f32>,
    pub smoothed_background_removed: Array2<f32>,
    pub scaled: Array2<f32>,
    pub binary: BinaryImage,
}

/// Turn a raw frame into a binary image of candidate structures.
pub fn preprocess(frame: &Array2<f32>, params: &PreprocessParams) -> Result<BinaryImage> {
    Ok(preprocess_detailed(frame, params)?.binary)
}

/// Same as [`preprocess`], keeping every intermediate stage.
pub fn preprocess_detailed(
    frame: &Array2<f32>,
    params: &PreprocessParams,
) -> Result<PreprocessStages> {
    params.validate()?;

    let background_removed = white_tophat(frame, params.ball_size);
    let smoothed = smooth(&background_removed, params.sigma, params.smoothing_passes);
    let smoothed_background_removed = white_tophat(&smoothed, params.ball_size);
    let scaled = scale_intensity(&smoothed_background_removed, params.scale_factor);
    let binary = binarize(&scaled, params.threshold);

    Ok(PreprocessStages {
        background_removed,
        smoothed,
        smoothed_background_removed,
        scaled,
        binary,
    })
}
