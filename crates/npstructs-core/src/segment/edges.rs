use ndarray::Array2;

use crate::frame::BinaryImage;
use crate::raster::from_rows;

/// Sobel gradient magnitude of a binary image.
///
/// Uses the normalized kernels (`[1, 2, 1] / 4` smoothing) and combines the
/// two directions as `sqrt((gx² + gy²) / 2)`. Pixels on the image border lack
/// full 3x3 support and get zero response.
pub fn sobel_magnitude(binary: &BinaryImage) -> Array2<f32> {
    let (h, w) = binary.dim();
    let px = |r: usize, c: usize| if binary[[r, c]] { 1.0f32 } else { 0.0 };

    from_rows(h, w, |row, out| {
        if row == 0 || row + 1 >= h {
            return;
        }
        for col in 1..w.saturating_sub(1) {
            let gx = (px(row - 1, col + 1) + 2.0 * px(row, col + 1) + px(row + 1, col + 1))
                - (px(row - 1, col - 1) + 2.0 * px(row, col - 1) + px(row + 1, col - 1));
            let gy = (px(row + 1, col - 1) + 2.0 * px(row + 1, col) + px(row + 1, col + 1))
                - (px(row - 1, col - 1) + 2.0 * px(row - 1, col) + px(row - 1, col + 1));
            let gx = gx / 4.0;
            let gy = gy / 4.0;
            out[col] = ((gx * gx + gy * gy) / 2.0).sqrt();
        }
    })
}

/// Edge mask: every pixel with a non-zero Sobel response.
pub fn detect_edges(binary: &BinaryImage) -> BinaryImage {
    sobel_magnitude(binary).mapv(|v| v > 0.0)
}
