use ndarray::Array2;

use crate::frame::BinaryImage;

/// Multiply every pixel by `factor`. No clipping.
pub fn scale_intensity(data: &Array2<f32>, factor: f32) -> Array2<f32> {
    data.mapv(|v| v * factor)
}

/// Binarize: `true` where `pixel >= threshold`.
pub fn binarize(data: &Array2<f32>, threshold: f32) -> BinaryImage {
    data.mapv(|v| v >= threshold)
}
