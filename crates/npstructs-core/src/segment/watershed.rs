//! Marker-based watershed by priority flooding.
//!
//! Regions grow from the marker pixels over the elevation surface, lowest
//! elevation first. Pixels of equal elevation are claimed in the order they
//! were queued, so on a flat surface every mask-connected pixel simply takes
//! the label of the marker region it is connected to.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ndarray::Array2;

use crate::error::{LocateError, Result};
use crate::frame::{BinaryImage, LabelRaster};

const NEIGHBOURS_4: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

#[derive(Clone, Copy, Debug)]
struct QueueEntry {
    elevation: f32,
    age: u64,
    row: usize,
    col: usize,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    // Reversed: BinaryHeap pops the lowest elevation, then the oldest entry.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .elevation
            .total_cmp(&self.elevation)
            .then_with(|| other.age.cmp(&self.age))
    }
}

/// Flood `elevation` from the labeled `markers`, restricted to `mask` when given.
///
/// Marker pixels outside the mask are discarded. Pixels outside the mask, and
/// mask pixels not connected to any marker, stay 0.
pub fn watershed(
    elevation: &Array2<f32>,
    markers: &LabelRaster,
    mask: Option<&BinaryImage>,
) -> Result<LabelRaster> {
    let dim = elevation.dim();
    if markers.dim() != dim {
        return Err(LocateError::invalid_parameter(
            "markers",
            format!("shape {:?} does not match elevation {:?}", markers.dim(), dim),
        ));
    }
    if let Some(m) = mask {
        if m.dim() != dim {
            return Err(LocateError::invalid_parameter(
                "mask",
                format!("shape {:?} does not match elevation {:?}", m.dim(), dim),
            ));
        }
    }

    let (h, w) = dim;
    let inside = |r: usize, c: usize| mask.map_or(true, |m| m[[r, c]]);

    let mut output = Array2::<u32>::zeros(dim);
    let mut heap = BinaryHeap::new();
    let mut age: u64 = 0;

    for ((row, col), &lbl) in markers.indexed_iter() {
        if lbl == 0 || !inside(row, col) {
            continue;
        }
        output[[row, col]] = lbl;
        heap.push(QueueEntry {
            elevation: elevation[[row, col]],
            age,
            row,
            col,
        });
        age += 1;
    }

    while let Some(entry) = heap.pop() {
        let lbl = output[[entry.row, entry.col]];
        for (dr, dc) in NEIGHBOURS_4 {
            let nr = entry.row as isize + dr;
            let nc = entry.col as isize + dc;
            if nr < 0 || nr >= h as isize || nc < 0 || nc >= w as isize {
                continue;
            }
            let (nr, nc) = (nr as usize, nc as usize);
            if output[[nr, nc]] != 0 || !inside(nr, nc) {
                continue;
            }
            output[[nr, nc]] = lbl;
            heap.push(QueueEntry {
                elevation: elevation[[nr, nc]],
                age,
                row: nr,
                col: nc,
            });
            age += 1;
        }
    }

    Ok(output)
}
