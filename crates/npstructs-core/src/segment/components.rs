use std::collections::BTreeMap;

use ndarray::Array2;

use crate::frame::{BinaryImage, LabelRaster};

/// Statistics for a single labeled region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentStats {
    /// Label value of this region.
    pub label: u32,
    /// Number of pixels in the region.
    pub area: usize,
    /// Bounding box: (min_row, max_row, min_col, max_col).
    pub bbox: (usize, usize, usize, usize),
}

/// Label the 4-connected components of a binary mask using two-pass
/// labeling with union-find.
///
/// Labels are consecutive from 1 in raster-scan order of each component's
/// first pixel. Returns the label raster and the component count.
pub fn label_components(mask: &BinaryImage) -> (LabelRaster, usize) {
    let (h, w) = mask.dim();
    let mut labels = Array2::<u32>::zeros((h, w));
    if h == 0 || w == 0 {
        return (labels, 0);
    }

    let mut next_label: u32 = 1;
    // Union-find parent array. Index 0 unused; labels start at 1.
    let mut parent: Vec<u32> = vec![0; h * w / 2 + 2];

    // Pass 1: assign provisional labels.
    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] {
                continue;
            }

            let up = if row > 0 { labels[[row - 1, col]] } else { 0 };
            let left = if col > 0 { labels[[row, col - 1]] } else { 0 };

            match (up > 0, left > 0) {
                (false, false) => {
                    if next_label as usize >= parent.len() {
                        parent.resize(parent.len() * 2, 0);
                    }
                    parent[next_label as usize] = next_label;
                    labels[[row, col]] = next_label;
                    next_label += 1;
                }
                (true, false) => {
                    labels[[row, col]] = up;
                }
                (false, true) => {
                    labels[[row, col]] = left;
                }
                (true, true) => {
                    let smaller = up.min(left);
                    let larger = up.max(left);
                    labels[[row, col]] = smaller;
                    if smaller != larger {
                        union(&mut parent, smaller, larger);
                    }
                }
            }
        }
    }

    // Roots are the smallest provisional label of their set, and provisional
    // labels grow in scan order, so numbering roots in increasing order keeps
    // scan order of first appearance.
    let mut final_label = vec![0u32; next_label as usize];
    let mut count = 0usize;
    for i in 1..next_label as usize {
        let root = find(&parent, i as u32) as usize;
        if root == i {
            count += 1;
            final_label[i] = count as u32;
        } else {
            final_label[i] = final_label[root];
        }
    }

    // Pass 2: resolve labels.
    labels.mapv_inplace(|lbl| final_label[lbl as usize]);
    (labels, count)
}

/// Remove 4-connected components with fewer than `min_size` pixels.
pub fn remove_small_objects(mask: &BinaryImage, min_size: usize) -> BinaryImage {
    if min_size == 0 {
        return mask.clone();
    }
    let (labels, count) = label_components(mask);
    let mut sizes = vec![0usize; count + 1];
    for &lbl in labels.iter() {
        sizes[lbl as usize] += 1;
    }
    labels.mapv(|lbl| lbl != 0 && sizes[lbl as usize] >= min_size)
}

/// Per-region statistics of a label raster, ordered by label value.
pub fn region_stats(labels: &LabelRaster) -> Vec<ComponentStats> {
    let mut stats_map = BTreeMap::<u32, ComponentStats>::new();

    for ((row, col), &lbl) in labels.indexed_iter() {
        if lbl == 0 {
            continue;
        }
        let entry = stats_map.entry(lbl).or_insert(ComponentStats {
            label: lbl,
            area: 0,
            bbox: (row, row, col, col),
        });

        entry.area += 1;
        entry.bbox.0 = entry.bbox.0.min(row);
        entry.bbox.1 = entry.bbox.1.max(row);
        entry.bbox.2 = entry.bbox.2.min(col);
        entry.bbox.3 = entry.bbox.3.max(col);
    }

    stats_map.into_values().collect()
}

/// Pixel count of every non-background label, ordered by label value.
pub fn region_pixel_counts(labels: &LabelRaster) -> Vec<(u32, usize)> {
    region_stats(labels)
        .into_iter()
        .map(|s| (s.label, s.area))
        .collect()
}

/// Number of distinct non-background labels.
pub fn count_regions(labels: &LabelRaster) -> usize {
    region_stats(labels).len()
}

/// Returns true if the region's bounding box touches any edge of the image.
pub fn touches_border(bbox: (usize, usize, usize, usize), height: usize, width: usize) -> bool {
    let (min_row, max_row, min_col, max_col) = bbox;
    min_row == 0 || max_row + 1 >= height || min_col == 0 || max_col + 1 >= width
}

fn find(parent: &[u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        x = parent[x as usize];
    }
    x
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        // Merge larger root into smaller root to keep labels consistent.
        let (small, big) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[big as usize] = small;
    }
}
