use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

/// Build an `(h, w)` raster by filling each output row with `fill(row, out_row)`.
///
/// Rows are filled in parallel once the raster reaches `PARALLEL_PIXEL_THRESHOLD` pixels.
pub(crate) fn from_rows<T, F>(h: usize, w: usize, fill: F) -> Array2<T>
where
    T: Clone + Default + Send,
    F: Fn(usize, &mut [T]) + Sync,
{
    if h == 0 || w == 0 {
        return Array2::default((h, w));
    }

    let mut buf = vec![T::default(); h * w];
    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        buf.par_chunks_mut(w)
            .enumerate()
            .for_each(|(row, out)| fill(row, out));
    } else {
        buf.chunks_mut(w)
            .enumerate()
            .for_each(|(row, out)| fill(row, out));
    }

    Array2::from_shape_vec((h, w), buf).expect("buffer size matches dimensions")
}

/// Inclusive `[lo, hi]` window of `center + offsets` clipped to `0..len`.
/// Returns `None` when the window falls entirely outside.
pub(crate) fn clip_window(center: usize, lo: isize, hi: isize, len: usize) -> Option<(usize, usize)> {
    let start = center as isize + lo;
    let end = center as isize + hi;
    if end < 0 || start >= len as isize {
        return None;
    }
    Some((start.max(0) as usize, end.min(len as isize - 1) as usize))
}
