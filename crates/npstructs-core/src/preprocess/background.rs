//! Rolling-ball background subtraction.
//!
//! Implemented as a grey-level white top-hat: the image minus its
//! morphological opening with a disk of the ball radius. Smooth illumination
//! gradients survive the opening and cancel out; features smaller than the
//! disk do not, and remain in the result.

use ndarray::Array2;

use crate::raster::{clip_window, from_rows};

/// Horizontal half-width of a disk of `radius` for every row offset
/// `-radius..=radius`. A pixel belongs to the disk when `dx² + dy² <= radius²`.
pub fn disk_half_widths(radius: usize) -> Vec<(isize, usize)> {
    let r = radius as isize;
    let r2 = r * r;
    (-r..=r)
        .map(|dy| {
            let mut half = r;
            while half > 0 && half * half + dy * dy > r2 {
                half -= 1;
            }
            (dy, half as usize)
        })
        .collect()
}

/// Grey erosion (local minimum) over a disk footprint.
/// Neighbours outside the image are ignored.
pub fn grey_erosion_disk(data: &Array2<f32>, radius: usize) -> Array2<f32> {
    disk_filter(data, radius, f32::INFINITY, f32::min)
}

/// Grey dilation (local maximum) over a disk footprint.
/// Neighbours outside the image are ignored.
pub fn grey_dilation_disk(data: &Array2<f32>, radius: usize) -> Array2<f32> {
    disk_filter(data, radius, f32::NEG_INFINITY, f32::max)
}

/// Morphological opening: erosion followed by dilation with the same disk.
pub fn grey_opening_disk(data: &Array2<f32>, radius: usize) -> Array2<f32> {
    let eroded = grey_erosion_disk(data, radius);
    grey_dilation_disk(&eroded, radius)
}

/// White top-hat with a disk of `ball_size`: `data - opening(data)`.
///
/// The opening never exceeds the input, so the result is non-negative.
pub fn white_tophat(data: &Array2<f32>, ball_size: usize) -> Array2<f32> {
    let opened = grey_opening_disk(data, ball_size);
    data - &opened
}

fn disk_filter(
    data: &Array2<f32>,
    radius: usize,
    identity: f32,
    combine: fn(f32, f32) -> f32,
) -> Array2<f32> {
    let (h, w) = data.dim();
    let spans = disk_half_widths(radius);

    from_rows(h, w, |row, out| {
        for (col, px) in out.iter_mut().enumerate() {
            let mut acc = identity;
            for &(dy, half) in &spans {
                let src_row = row as isize + dy;
                if src_row < 0 || src_row >= h as isize {
                    continue;
                }
                let Some((c0, c1)) = clip_window(col, -(half as isize), half as isize, w) else {
                    continue;
                };
                let src = data.row(src_row as usize);
                for c in c0..=c1 {
                    acc = combine(acc, src[c]);
                }
            }
            *px = acc;
        }
    })
}
