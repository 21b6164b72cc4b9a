use crate::frame::BinaryImage;
use crate::raster::{clip_window, from_rows};

/// Binary dilation with a square of side `size`: a pixel becomes true if ANY
/// pixel under the square is true.
///
/// For even sides the square extends one pixel further toward higher indices.
pub fn dilate_square(mask: &BinaryImage, size: usize) -> BinaryImage {
    let (lo, hi) = dilation_reach(size);
    let rows_done = sweep_rows(mask, lo, hi, false);
    sweep_cols(&rows_done, lo, hi, false)
}

/// Binary erosion with a square of side `size`: a pixel stays true only if ALL
/// pixels under the square are true. Out-of-image pixels are ignored, so
/// regions touching the border do not erode from outside.
///
/// For even sides the square extends one pixel further toward lower indices.
pub fn erode_square(mask: &BinaryImage, size: usize) -> BinaryImage {
    let (lo, hi) = erosion_reach(size);
    let rows_done = sweep_rows(mask, lo, hi, true);
    sweep_cols(&rows_done, lo, hi, true)
}

fn erosion_reach(size: usize) -> (isize, isize) {
    let n = size.max(1) as isize;
    (-(n / 2), (n - 1) / 2)
}

fn dilation_reach(size: usize) -> (isize, isize) {
    let n = size.max(1) as isize;
    (-((n - 1) / 2), n / 2)
}

/// 1D pass along each row. `all == true` computes AND over the window, otherwise OR.
fn sweep_rows(mask: &BinaryImage, lo: isize, hi: isize, all: bool) -> BinaryImage {
    let (h, w) = mask.dim();
    from_rows(h, w, |row, out| {
        let src = mask.row(row);
        for (col, px) in out.iter_mut().enumerate() {
            *px = match clip_window(col, lo, hi, w) {
                Some((c0, c1)) => {
                    if all {
                        (c0..=c1).all(|c| src[c])
                    } else {
                        (c0..=c1).any(|c| src[c])
                    }
                }
                None => all,
            };
        }
    })
}

fn sweep_cols(mask: &BinaryImage, lo: isize, hi: isize, all: bool) -> BinaryImage {
    let (h, w) = mask.dim();
    from_rows(h, w, |row, out| {
        let Some((r0, r1)) = clip_window(row, lo, hi, h) else {
            out.fill(all);
            return;
        };
        for (col, px) in out.iter_mut().enumerate() {
            *px = if all {
                (r0..=r1).all(|r| mask[[r, col]])
            } else {
                (r0..=r1).any(|r| mask[[r, col]])
            };
        }
    })
}
