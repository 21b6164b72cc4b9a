use std::collections::VecDeque;

use ndarray::Array2;

use crate::frame::BinaryImage;

/// Flood fill from `seed` through 8-connected pixels sharing the seed's value.
///
/// Returns the mask of reached pixels. An out-of-range seed reaches nothing.
pub fn flood(mask: &BinaryImage, seed: (usize, usize)) -> BinaryImage {
    let (h, w) = mask.dim();
    let mut reached = Array2::from_elem((h, w), false);
    if seed.0 >= h || seed.1 >= w {
        return reached;
    }

    let target = mask[seed];
    let mut queue = VecDeque::from([seed]);
    reached[seed] = true;

    while let Some((row, col)) = queue.pop_front() {
        for dr in -1..=1_isize {
            for dc in -1..=1_isize {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let nr = row as isize + dr;
                let nc = col as isize + dc;
                if nr < 0 || nr >= h as isize || nc < 0 || nc >= w as isize {
                    continue;
                }
                let next = (nr as usize, nc as usize);
                if !reached[next] && mask[next] == target {
                    reached[next] = true;
                    queue.push_back(next);
                }
            }
        }
    }

    reached
}

/// Close outlined regions: flood the background from the top-left corner and
/// invert, so every pixel the flood cannot reach becomes foreground.
///
/// Assumes the corner is background connected to the rest of the exterior.
/// When the corner itself is foreground the flood follows the outline
/// instead and the result is not a meaningful fill.
pub fn fill_from_corner(outlines: &BinaryImage) -> BinaryImage {
    let exterior = flood(outlines, (0, 0));
    exterior.mapv(|reached| !reached)
}
