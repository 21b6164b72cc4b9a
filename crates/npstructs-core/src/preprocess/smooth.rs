use ndarray::Array2;

use crate::consts::GAUSSIAN_TRUNCATE;
use crate::raster::from_rows;

/// Smooth `data` with `passes` sequential Gaussian blurs of width `sigma`.
///
/// Each pass consumes the previous pass's output; this is not the same as a
/// single blur with a wider sigma.
pub fn smooth(data: &Array2<f32>, sigma: f32, passes: usize) -> Array2<f32> {
    let mut current = data.clone();
    for _ in 0..passes {
        current = gaussian_blur_array(&current, sigma);
    }
    current
}

/// Apply a Gaussian blur using separable 1D convolution.
///
/// The kernel is truncated at `GAUSSIAN_TRUNCATE` sigmas and edge pixels are
/// replicated. A zero sigma returns the input unchanged.
pub fn gaussian_blur_array(data: &Array2<f32>, sigma: f32) -> Array2<f32> {
    if sigma <= 0.0 {
        return data.clone();
    }
    let kernel = make_gaussian_kernel(sigma);
    let row_pass = convolve_rows(data, &kernel);
    convolve_cols(&row_pass, &kernel)
}

fn make_gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (GAUSSIAN_TRUNCATE * sigma + 0.5) as usize;
    let size = 2 * radius + 1;
    let mut kernel = vec![0.0f32; size];
    let s2 = 2.0 * sigma * sigma;
    let mut sum = 0.0f32;

    for (i, k) in kernel.iter_mut().enumerate() {
        let x = i as f32 - radius as f32;
        *k = (-x * x / s2).exp();
        sum += *k;
    }

    for v in &mut kernel {
        *v /= sum;
    }

    kernel
}

fn convolve_rows(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = kernel.len() / 2;

    from_rows(h, w, |row, out| {
        for (col, px) in out.iter_mut().enumerate() {
            let mut sum = 0.0f32;
            for (ki, &kv) in kernel.iter().enumerate() {
                let src_col =
                    (col as isize + ki as isize - radius as isize).clamp(0, w as isize - 1) as usize;
                sum += data[[row, src_col]] * kv;
            }
            *px = sum;
        }
    })
}

fn convolve_cols(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = kernel.len() / 2;

    from_rows(h, w, |row, out| {
        for (col, px) in out.iter_mut().enumerate() {
            let mut sum = 0.0f32;
            for (ki, &kv) in kernel.iter().enumerate() {
                let src_row =
                    (row as isize + ki as isize - radius as isize).clamp(0, h as isize - 1) as usize;
                sum += data[[src_row, col]] * kv;
            }
            *px = sum;
        }
    })
}
